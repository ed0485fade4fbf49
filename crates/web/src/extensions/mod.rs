//! Extension traits

mod depot;
mod result;

pub(crate) use depot::{DepotExt, Today};
pub(crate) use result::ResultExt;
