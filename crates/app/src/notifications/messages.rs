//! Booking email bodies.
//!
//! Every customer-supplied value is HTML-escaped before it is interpolated.

use washbay::html::escape;

use crate::{domain::bookings::records::BookingRecord, notifications::EmailMessage};

pub const CONFIRMATION_SUBJECT: &str = "Washbay Booking Confirmation";
pub const ADMIN_ALERT_SUBJECT: &str = "New Booking Received - Washbay";
pub const TEST_SUBJECT: &str = "Test Email - Washbay";

fn item(label: &str, value: &str) -> String {
    format!("<li><strong>{label}:</strong> {}</li>", escape(value))
}

/// Confirmation sent to the customer who made the booking.
#[must_use]
pub fn booking_confirmation(booking: &BookingRecord, to: &str) -> EmailMessage {
    let items = [
        item("Booking ID", &booking.booking_id),
        item("Car Model", &booking.car_model),
        item("Service", &booking.service_type),
        item("Date", &booking.date),
        item("Time", &booking.time),
        item("Location", &booking.location),
        item("Price", &booking.total().to_string()),
        item("Discount", &format!("₹{}", booking.discount)),
    ]
    .concat();

    EmailMessage {
        to: to.to_string(),
        subject: CONFIRMATION_SUBJECT.to_string(),
        html: format!(
            "<h2>Booking Confirmed!</h2>\
             <p>Dear {},</p>\
             <p>Your booking has been confirmed with the following details:</p>\
             <ul>{items}</ul>\
             <p>Thank you for choosing Washbay!</p>",
            escape(&booking.name)
        ),
    }
}

/// Alert sent to the administrator address for every new booking.
#[must_use]
pub fn admin_booking_alert(booking: &BookingRecord, to: &str) -> EmailMessage {
    let items = [
        item("Booking ID", &booking.booking_id),
        item("Name", &booking.name),
        item("Email", booking.email.as_deref().unwrap_or("None")),
        item("Phone", &booking.phone),
        item("Car Model", &booking.car_model),
        item("Service", &booking.service_type),
        item("Date", &booking.date),
        item("Time", &booking.time),
        item("Car Size", &booking.car_size),
        item("Location", &booking.location),
        item("Promo Code", booking.promo_code.as_deref().unwrap_or("None")),
        item("Discount", &format!("₹{}", booking.discount)),
        item("Price", &booking.total().to_string()),
    ]
    .concat();

    EmailMessage {
        to: to.to_string(),
        subject: ADMIN_ALERT_SUBJECT.to_string(),
        html: format!(
            "<h2>New Booking Notification</h2>\
             <p>A new booking has been received:</p>\
             <ul>{items}</ul>\
             <p>Please check the admin dashboard for details.</p>"
        ),
    }
}

/// Delivery check message for operators.
#[must_use]
pub fn test_message(to: &str) -> EmailMessage {
    EmailMessage {
        to: to.to_string(),
        subject: TEST_SUBJECT.to_string(),
        html: "<p>This is a test email from Washbay.</p>".to_string(),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use washbay::pricing::Quote;

    use super::*;

    pub(crate) fn booking() -> BookingRecord {
        BookingRecord {
            id: 1,
            booking_id: "a1b2c3d4".to_string(),
            name: "<script>alert(1)</script>".to_string(),
            email: Some("asha@example.com".to_string()),
            phone: "9000000001".to_string(),
            car_model: "Swift".to_string(),
            service_type: "Normal Wash".to_string(),
            date: "2026-10-20".to_string(),
            time: "10:00".to_string(),
            car_size: "Big".to_string(),
            location: "Hyderabad Kukatpally Nexus Mall".to_string(),
            promo_code: Some("AB12CD34".to_string()),
            discount: 20,
            price: Quote::Fixed(800),
            status: "Booked".to_string(),
        }
    }

    #[test]
    fn confirmation_escapes_customer_text() {
        let message = booking_confirmation(&booking(), "asha@example.com");

        assert!(!message.html.contains("<script>"));
        assert!(message.html.contains("&lt;script&gt;"));
        assert!(message.html.contains("a1b2c3d4"));
        assert!(message.html.contains("₹780"));
    }

    #[test]
    fn admin_alert_lists_promo_code() {
        let message = admin_booking_alert(&booking(), "admin@washbay.test");

        assert_eq!(message.to, "admin@washbay.test");
        assert_eq!(message.subject, ADMIN_ALERT_SUBJECT);
        assert!(message.html.contains("AB12CD34"));
    }

    #[test]
    fn admin_alert_shows_none_for_missing_values() {
        let message = admin_booking_alert(
            &BookingRecord {
                email: None,
                promo_code: None,
                ..booking()
            },
            "admin@washbay.test",
        );

        assert!(message.html.contains("<strong>Email:</strong> None"));
        assert!(message.html.contains("<strong>Promo Code:</strong> None"));
    }
}
