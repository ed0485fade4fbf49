//! Washbay
//!
//! Booking, pricing and promotion code rules for a single-location car-wash
//! service. Nothing in this crate performs I/O: callers supply the current
//! date and a random number generator, and persist what comes back.

pub mod bookings;
pub mod codes;
pub mod html;
pub mod pricing;
pub mod promotions;
pub mod reviews;
