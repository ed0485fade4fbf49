//! Booking Rules Config

use clap::{ArgAction, Args};
use washbay_app::settings::{AppSettings, DEFAULT_SERVICE_LOCATION, DEFAULT_SLOT_CAPACITY};

/// Booking and promotion rules.
#[derive(Debug, Args)]
pub struct BusinessConfig {
    /// The one location bookings are accepted for
    #[arg(long, env = "SERVICE_LOCATION", default_value = DEFAULT_SERVICE_LOCATION)]
    pub service_location: String,

    /// Bookings per date/time/location slot (0 disables the cap)
    #[arg(long, env = "SLOT_CAPACITY", default_value_t = DEFAULT_SLOT_CAPACITY)]
    pub slot_capacity: u32,

    /// Only accept promo codes at the location they were issued for
    #[arg(
        long,
        env = "PROMO_LOCATION_SCOPING",
        default_value_t = true,
        action = ArgAction::Set
    )]
    pub promo_location_scoping: bool,
}

impl BusinessConfig {
    /// Application settings for these rules plus mail delivery bounds.
    #[must_use]
    pub fn app_settings(&self, admin_email: &str, mail_timeout: std::time::Duration) -> AppSettings {
        AppSettings {
            service_location: self.service_location.clone(),
            slot_capacity: self.slot_capacity,
            promo_location_scoping: self.promo_location_scoping,
            admin_email: admin_email.to_string(),
            mail_timeout,
            ..AppSettings::default()
        }
    }
}
