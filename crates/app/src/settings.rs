//! Application settings
//!
//! Built once at process start and shared read-only with every service.

use std::time::Duration;

use washbay::promotions::PromotionRules;

use crate::notifications::DEFAULT_MAIL_TIMEOUT;

/// Default service location.
pub const DEFAULT_SERVICE_LOCATION: &str = "Hyderabad Kukatpally Nexus Mall";

/// Default number of bookings accepted per date/time/location slot.
pub const DEFAULT_SLOT_CAPACITY: u32 = 3;

/// Attempts at a fresh booking ID before a collision is reported.
pub const DEFAULT_BOOKING_ID_ATTEMPTS: u32 = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSettings {
    /// The single location bookings are accepted for.
    pub service_location: String,

    /// Bookings accepted per slot before new submissions are turned away.
    /// Zero disables the cap.
    pub slot_capacity: u32,

    /// Insert attempts for a random booking ID.
    pub booking_id_attempts: u32,

    /// Whether promo codes are only valid at the location they were issued for.
    pub promo_location_scoping: bool,

    /// Promo code issuing parameters.
    pub promotions: PromotionRules,

    /// Address that receives a copy of every new booking.
    pub admin_email: String,

    /// Upper bound on each notification send.
    pub mail_timeout: Duration,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            service_location: DEFAULT_SERVICE_LOCATION.to_string(),
            slot_capacity: DEFAULT_SLOT_CAPACITY,
            booking_id_attempts: DEFAULT_BOOKING_ID_ATTEMPTS,
            promo_location_scoping: true,
            promotions: PromotionRules::default(),
            admin_email: String::new(),
            mail_timeout: DEFAULT_MAIL_TIMEOUT,
        }
    }
}
