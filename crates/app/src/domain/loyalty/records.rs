//! Loyalty Records

use sqlx::{FromRow, Row, sqlite::SqliteRow};

/// Loyalty Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoyaltyRecord {
    pub phone: String,
    pub points: u32,
}

impl<'r> FromRow<'r, SqliteRow> for LoyaltyRecord {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        let points: i64 = row.try_get("points")?;

        let points = u32::try_from(points).map_err(|e| sqlx::Error::ColumnDecode {
            index: "points".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            phone: row.try_get("phone")?,
            points,
        })
    }
}
