//! Administrator authentication

mod credentials;
mod errors;
mod models;

pub use credentials::*;
pub use errors::*;
pub use models::*;
