//! Admin dashboard and booking status updates

use std::fmt::Write as _;

use salvo::{flash::FlashDepotExt, prelude::*};
use serde::Deserialize;
use tracing::{error, info};
use washbay::{bookings::STATUS_PENDING, html::escape};
use washbay_app::domain::{
    bookings::{BookingsServiceError, records::BookingRecord},
    loyalty::records::LoyaltyRecord,
    promotions::records::PromotionRow,
    reviews::records::ReviewRecord,
};

use crate::{
    extensions::{DepotExt, ResultExt as _},
    pages::layout::{Level, Page},
};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StatusForm {
    booking_id: String,
    status: String,
}

fn table(headers: &[&str], rows: &str) -> String {
    let head: String = headers.iter().map(|h| format!("<th>{h}</th>")).collect();

    format!("<table><thead><tr>{head}</tr></thead><tbody>{rows}</tbody></table>")
}

fn bookings_table(bookings: &[BookingRecord]) -> String {
    let mut rows = String::new();

    for b in bookings {
        _ = write!(
            rows,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{} {}</td><td>{}</td><td>{}</td>\
             <td><form method=\"post\" action=\"/admin\">\
             <input type=\"hidden\" name=\"booking_id\" value=\"{}\">\
             <input name=\"status\" value=\"{}\" list=\"statuses\"> \
             <button type=\"submit\">Update</button></form></td></tr>",
            escape(&b.booking_id),
            escape(&b.name),
            escape(&b.phone),
            escape(&b.service_type),
            escape(&b.date),
            escape(&b.time),
            escape(b.promo_code.as_deref().unwrap_or("")),
            b.total(),
            escape(&b.booking_id),
            escape(&b.status),
        );
    }

    table(
        &["Booking ID", "Name", "Phone", "Service", "Slot", "Promo", "Total", "Status"],
        &rows,
    )
}

fn reviews_table(reviews: &[ReviewRecord]) -> String {
    let rows: String = reviews
        .iter()
        .map(|r| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                r.id,
                escape(&r.name),
                r.rating,
                escape(&r.message)
            )
        })
        .collect();

    table(&["ID", "Name", "Rating", "Message"], &rows)
}

fn promotions_table(promotions: &[PromotionRow]) -> String {
    let rows: String = promotions
        .iter()
        .map(|p| {
            format!(
                "<tr><td>{}</td><td>₹{}</td><td>{}</td><td>{}</td></tr>",
                escape(&p.code),
                p.discount,
                escape(&p.expiry_date),
                escape(p.location.as_deref().unwrap_or("Any"))
            )
        })
        .collect();

    table(&["Code", "Discount", "Expiry Date", "Location"], &rows)
}

fn loyalty_table(accounts: &[LoyaltyRecord]) -> String {
    let rows: String = accounts
        .iter()
        .map(|a| format!("<tr><td>{}</td><td>{}</td></tr>", escape(&a.phone), a.points))
        .collect();

    table(&["Phone", "Points"], &rows)
}

#[handler]
pub(crate) async fn get(depot: &mut Depot, res: &mut Response) -> Result<(), StatusError> {
    let state = depot.state()?;
    let admin = depot.admin()?.clone();
    let app = &state.app;

    let (bookings, reviews, promotions, loyalty) = tokio::join!(
        app.bookings.list_bookings(&admin),
        app.reviews.all_reviews(&admin),
        app.promotions.list_promotions(&admin),
        app.loyalty.list_accounts(&admin),
    );

    let loaded = (
        bookings.log_err("failed to load bookings"),
        reviews.log_err("failed to load reviews"),
        promotions.log_err("failed to load promotions"),
        loyalty.log_err("failed to load loyalty accounts"),
    );

    let (bookings, reviews, promotions, loyalty, failed) = match loaded {
        (Some(b), Some(r), Some(p), Some(l)) => (b, r, p, l, false),
        _ => (Vec::new(), Vec::new(), Vec::new(), Vec::new(), true),
    };

    let body = format!(
        "<h1>Dashboard</h1>\n<p>Signed in as {} | <a href=\"/admin/logout\">Log out</a></p>\n\
         <datalist id=\"statuses\"><option value=\"Booked\"><option value=\"{STATUS_PENDING}\">\
         <option value=\"Completed\"><option value=\"Cancelled\"></datalist>\n\
         <h2>Bookings</h2>\n<p><a href=\"/admin/export/bookings\">Export CSV</a></p>\n{}\n\
         <h2>Promo codes</h2>\n<form method=\"post\" action=\"/admin/promotions\">\
         <label><input type=\"checkbox\" name=\"unscoped\" value=\"true\"> Valid at any location</label> \
         <button type=\"submit\">Issue promo code</button></form>\n\
         <p><a href=\"/admin/export/promotions\">Export CSV</a></p>\n{}\n\
         <h2>Reviews</h2>\n<p><a href=\"/admin/export/reviews\">Export CSV</a></p>\n{}\n\
         <h2>Loyalty</h2>\n<p><a href=\"/admin/export/loyalty\">Export CSV</a></p>\n{}",
        escape(admin.username()),
        bookings_table(&bookings),
        promotions_table(&promotions),
        reviews_table(&reviews),
        loyalty_table(&loyalty),
    );

    let page = Page::new("Dashboard", body);

    if failed {
        page.notice(Level::Error, "Error loading admin data.")
    } else {
        page
    }
    .render(depot, res);

    Ok(())
}

#[handler]
pub(crate) async fn update_status(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.state()?;
    let admin = depot.admin()?.clone();
    let form = req.parse_form::<StatusForm>().await.unwrap_or_default();
    let booking_id = form.booking_id.clone();

    let result = state
        .app
        .bookings
        .update_status(&admin, form.booking_id, form.status)
        .await;

    let flash = depot.outgoing_flash_mut();

    match result {
        Ok(()) => {
            info!(admin = admin.username(), %booking_id, "booking status updated");

            flash.success("Status updated successfully!");
        }
        Err(BookingsServiceError::EmptyStatus) => {
            flash.warning("Please enter a status.");
        }
        Err(BookingsServiceError::MissingBookingId) => {
            flash.warning("Please enter Booking ID.");
        }
        Err(BookingsServiceError::NotFound) => {
            flash.error("Invalid Booking ID");
        }
        Err(source) => {
            error!("failed to update booking status: {source}");

            flash.error("Error updating status.");
        }
    }

    res.render(Redirect::other("/admin"));

    Ok(())
}
