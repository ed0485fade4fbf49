//! Booking tracking

use salvo::prelude::*;
use serde::Deserialize;
use tracing::error;
use washbay::html::escape;
use washbay_app::domain::bookings::{BookingsServiceError, records::BookingRecord};

use crate::{
    extensions::DepotExt,
    pages::layout::{Level, Page},
    state::State,
};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TrackForm {
    booking_id: String,
}

const FORM: &str = "<form method=\"post\" action=\"/track\">\
     <label>Booking ID <input name=\"booking_id\" required></label> \
     <button type=\"submit\">Track</button></form>";

fn details(booking: &BookingRecord) -> String {
    let rows = [
        ("Booking ID", booking.booking_id.clone()),
        ("Name", booking.name.clone()),
        ("Service", booking.service_type.clone()),
        ("Car model", booking.car_model.clone()),
        ("Car size", booking.car_size.clone()),
        ("Date", booking.date.clone()),
        ("Time", booking.time.clone()),
        ("Location", booking.location.clone()),
        (
            "Promo code",
            booking.promo_code.clone().unwrap_or_else(|| "None".to_string()),
        ),
        ("Discount", format!("₹{}", booking.discount)),
        ("Total", booking.total().to_string()),
        ("Status", booking.status.clone()),
    ];

    let cells: String = rows
        .iter()
        .map(|(label, value)| format!("<tr><th>{label}</th><td>{}</td></tr>", escape(value)))
        .collect();

    format!("<table class=\"booking\">{cells}</table>")
}

async fn lookup(state: &State, booking_id: String) -> Page {
    match state.app.bookings.track_booking(booking_id).await {
        Ok(booking) => Page::new(
            "Track booking",
            format!("<h1>Track booking</h1>\n{FORM}\n{}", details(&booking)),
        ),
        Err(BookingsServiceError::MissingBookingId) => {
            blank().notice(Level::Warning, "Please enter Booking ID.")
        }
        Err(BookingsServiceError::NotFound) => blank().notice(Level::Error, "Invalid Booking ID"),
        Err(source) => {
            error!("failed to fetch booking: {source}");

            blank().notice(Level::Error, "Error fetching booking details.")
        }
    }
}

fn blank() -> Page {
    Page::new("Track booking", format!("<h1>Track booking</h1>\n{FORM}"))
}

/// Shows the form, plus the booking when `booking_id` is in the query.
#[handler]
pub(crate) async fn get(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.state()?;

    let page = match req.query::<String>("booking_id") {
        Some(booking_id) if !booking_id.trim().is_empty() => lookup(&state, booking_id).await,
        _ => blank(),
    };

    page.render(depot, res);

    Ok(())
}

#[handler]
pub(crate) async fn post(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.state()?;
    let form = req.parse_form::<TrackForm>().await.unwrap_or_default();

    lookup(&state, form.booking_id).await.render(depot, res);

    Ok(())
}
