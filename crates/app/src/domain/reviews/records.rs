//! Review Records

use sqlx::{FromRow, Row, sqlite::SqliteRow};

/// Review Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRecord {
    pub id: i64,
    pub name: String,
    pub rating: u8,
    pub message: String,
}

impl<'r> FromRow<'r, SqliteRow> for ReviewRecord {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        let rating: i64 = row.try_get("rating")?;

        let rating = u8::try_from(rating).map_err(|e| sqlx::Error::ColumnDecode {
            index: "rating".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            rating,
            message: row.try_get("message")?,
        })
    }
}
