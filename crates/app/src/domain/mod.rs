//! Washbay Domain Concerns

pub mod bookings;
pub mod loyalty;
pub mod promotions;
pub mod reviews;
