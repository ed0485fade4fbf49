//! Booking Records

use sqlx::{FromRow, Row, sqlite::SqliteRow};
use washbay::pricing::Quote;

/// Booking Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRecord {
    pub id: i64,
    pub booking_id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: String,
    pub car_model: String,
    pub service_type: String,
    pub date: String,
    pub time: String,
    pub car_size: String,
    pub location: String,
    pub promo_code: Option<String>,
    pub discount: u32,
    pub price: Quote,
    pub status: String,
}

impl BookingRecord {
    /// The quoted price with the booking's discount taken off.
    #[must_use]
    pub fn total(&self) -> Quote {
        self.price.after_discount(self.discount)
    }
}

fn non_negative(column: &str, value: i64) -> sqlx::Result<u32> {
    u32::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, SqliteRow> for BookingRecord {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        let discount = non_negative("discount", row.try_get("discount")?)?;

        let price = row
            .try_get::<Option<i64>, _>("price")?
            .map(|price| non_negative("price", price))
            .transpose()?;

        Ok(Self {
            id: row.try_get("id")?,
            booking_id: row.try_get("booking_id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            car_model: row.try_get("car_model")?,
            service_type: row.try_get("service_type")?,
            date: row.try_get("date")?,
            time: row.try_get("time")?,
            car_size: row.try_get("car_size")?,
            location: row.try_get("location")?,
            promo_code: row.try_get("promo_code")?,
            discount,
            price: Quote::from_stored(price),
            status: row.try_get("status")?,
        })
    }
}
