//! CSV exports for the admin dashboard.
//!
//! Each export is a header row followed by one row per record, in the order
//! the records are given.

use csv::Writer;
use thiserror::Error;

use crate::{
    auth::AdminPrincipal,
    context::AppContext,
    domain::{
        bookings::{BookingsServiceError, records::BookingRecord},
        loyalty::{LoyaltyServiceError, records::LoyaltyRecord},
        promotions::{PromotionsServiceError, records::PromotionRow},
        reviews::{ReviewsServiceError, records::ReviewRecord},
    },
};

pub const BOOKINGS_HEADER: [&str; 12] = [
    "Booking ID",
    "Name",
    "Phone",
    "Car Model",
    "Service Type",
    "Date",
    "Time",
    "Car Size",
    "Location",
    "Promo Code",
    "Discount",
    "Status",
];

pub const REVIEWS_HEADER: [&str; 4] = ["ID", "Name", "Rating", "Message"];

pub const LOYALTY_HEADER: [&str; 2] = ["Phone", "Points"];

pub const PROMOTIONS_HEADER: [&str; 4] = ["Code", "Discount", "Expiry Date", "Location"];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write csv")]
    Csv(#[from] csv::Error),

    #[error("failed to flush csv buffer")]
    Flush(#[source] std::io::Error),

    #[error("failed to load bookings")]
    Bookings(#[from] BookingsServiceError),

    #[error("failed to load reviews")]
    Reviews(#[from] ReviewsServiceError),

    #[error("failed to load loyalty accounts")]
    Loyalty(#[from] LoyaltyServiceError),

    #[error("failed to load promo codes")]
    Promotions(#[from] PromotionsServiceError),
}

/// An export kind offered on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Bookings,
    Reviews,
    Loyalty,
    Promotions,
}

impl ExportKind {
    /// Download file name.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Bookings => "bookings.csv",
            Self::Reviews => "reviews.csv",
            Self::Loyalty => "loyalty.csv",
            Self::Promotions => "promotions.csv",
        }
    }
}

/// Load every record of `kind` and encode it as CSV.
pub async fn export(
    ctx: &AppContext,
    admin: &AdminPrincipal,
    kind: ExportKind,
) -> Result<Vec<u8>, ExportError> {
    match kind {
        ExportKind::Bookings => bookings_csv(&ctx.bookings.list_bookings(admin).await?),
        ExportKind::Reviews => reviews_csv(&ctx.reviews.all_reviews(admin).await?),
        ExportKind::Loyalty => loyalty_csv(&ctx.loyalty.list_accounts(admin).await?),
        ExportKind::Promotions => promotions_csv(&ctx.promotions.list_promotions(admin).await?),
    }
}

fn write_rows<const N: usize, I>(header: [&str; N], rows: I) -> Result<Vec<u8>, ExportError>
where
    I: IntoIterator<Item = [String; N]>,
{
    let mut writer = Writer::from_writer(Vec::new());

    writer.write_record(header)?;

    for row in rows {
        writer.write_record(&row)?;
    }

    writer
        .into_inner()
        .map_err(|error| ExportError::Flush(error.into_error()))
}

pub fn bookings_csv(bookings: &[BookingRecord]) -> Result<Vec<u8>, ExportError> {
    write_rows(
        BOOKINGS_HEADER,
        bookings.iter().map(|b| {
            [
                b.booking_id.clone(),
                b.name.clone(),
                b.phone.clone(),
                b.car_model.clone(),
                b.service_type.clone(),
                b.date.clone(),
                b.time.clone(),
                b.car_size.clone(),
                b.location.clone(),
                b.promo_code.clone().unwrap_or_default(),
                b.discount.to_string(),
                b.status.clone(),
            ]
        }),
    )
}

pub fn reviews_csv(reviews: &[ReviewRecord]) -> Result<Vec<u8>, ExportError> {
    write_rows(
        REVIEWS_HEADER,
        reviews.iter().map(|r| {
            [
                r.id.to_string(),
                r.name.clone(),
                r.rating.to_string(),
                r.message.clone(),
            ]
        }),
    )
}

pub fn loyalty_csv(accounts: &[LoyaltyRecord]) -> Result<Vec<u8>, ExportError> {
    write_rows(
        LOYALTY_HEADER,
        accounts
            .iter()
            .map(|a| [a.phone.clone(), a.points.to_string()]),
    )
}

pub fn promotions_csv(promotions: &[PromotionRow]) -> Result<Vec<u8>, ExportError> {
    write_rows(
        PROMOTIONS_HEADER,
        promotions.iter().map(|p| {
            [
                p.code.clone(),
                p.discount.to_string(),
                p.expiry_date.clone(),
                p.location.clone().unwrap_or_default(),
            ]
        }),
    )
}
