//! Booking submissions

use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::promotions::{DATE_FORMAT, requested_code};

/// Status given to a booking when it is created.
pub const STATUS_BOOKED: &str = "Booked";

/// Status staff use while a booking awaits confirmation.
pub const STATUS_PENDING: &str = "Pending";

/// Raw booking form fields as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub car_model: String,
    pub service_type: String,
    pub date: String,
    pub time: String,
    pub car_size: String,
    pub location: String,
    pub promo_code: String,
}

/// A booking slot: bookings sharing one are capped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub date: Date,
    pub time: String,
    pub location: String,
}

/// A validated booking request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    pub name: String,
    pub email: Option<String>,
    pub phone: String,
    pub car_model: String,
    pub service_type: String,
    pub car_size: String,
    pub slot: Slot,
    pub promo_code: Option<String>,
}

/// Reasons a booking form is turned away before anything is saved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingFormError {
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("booking date {0:?} is not a YYYY-MM-DD date")]
    InvalidDate(String),

    #[error("bookings are only accepted at {expected}")]
    UnsupportedLocation { expected: String },
}

impl BookingForm {
    /// Validate required fields and the service location.
    ///
    /// `service_location` must match the submitted location exactly.
    pub fn validate(&self, service_location: &str) -> Result<BookingRequest, BookingFormError> {
        let name = self.name.trim();
        let phone = self.phone.trim();
        let service_type = self.service_type.trim();
        let date = self.date.trim();
        let time = self.time.trim();
        let location = self.location.trim();

        let missing: Vec<&'static str> = [
            ("name", name),
            ("phone", phone),
            ("service type", service_type),
            ("date", date),
            ("time", time),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
        .collect();

        if !missing.is_empty() {
            return Err(BookingFormError::MissingFields(missing));
        }

        if location != service_location {
            return Err(BookingFormError::UnsupportedLocation {
                expected: service_location.to_string(),
            });
        }

        let date = Date::strptime(DATE_FORMAT, date)
            .map_err(|_parse| BookingFormError::InvalidDate(date.to_string()))?;

        let email = self.email.trim();

        Ok(BookingRequest {
            name: name.to_string(),
            email: (!email.is_empty()).then(|| email.to_string()),
            phone: phone.to_string(),
            car_model: self.car_model.trim().to_string(),
            service_type: service_type.to_string(),
            car_size: self.car_size.trim().to_string(),
            slot: Slot {
                date,
                time: time.to_string(),
                location: location.to_string(),
            },
            promo_code: requested_code(Some(&self.promo_code)).map(ToString::to_string),
        })
    }
}
