//! Bookings Data

use washbay::{bookings::BookingRequest, pricing::Quote};

/// New Booking Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub booking_id: String,
    pub request: BookingRequest,
    pub discount: u32,
    pub price: Quote,
    pub status: String,
}
