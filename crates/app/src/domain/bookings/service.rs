//! Bookings Service

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    auth::AdminPrincipal,
    database::Db,
    domain::bookings::{
        BookingsServiceError, records::BookingRecord, repository::SqliteBookingsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct SqliteBookingsService {
    db: Db,
    repository: SqliteBookingsRepository,
}

impl SqliteBookingsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: SqliteBookingsRepository::new(),
        }
    }
}

#[async_trait]
impl BookingsService for SqliteBookingsService {
    #[tracing::instrument(name = "bookings.service.track_booking", skip(self), err)]
    async fn track_booking(&self, booking_id: String) -> Result<BookingRecord, BookingsServiceError> {
        let booking_id = booking_id.trim();

        if booking_id.is_empty() {
            return Err(BookingsServiceError::MissingBookingId);
        }

        let mut tx = self.db.begin().await?;

        let booking = self
            .repository
            .find_booking(&mut tx, booking_id)
            .await?
            .ok_or(BookingsServiceError::NotFound)?;

        tx.commit().await?;

        Ok(booking)
    }

    #[tracing::instrument(
        name = "bookings.service.list_bookings",
        skip(self, admin),
        fields(admin = admin.username()),
        err
    )]
    async fn list_bookings(
        &self,
        admin: &AdminPrincipal,
    ) -> Result<Vec<BookingRecord>, BookingsServiceError> {
        let mut tx = self.db.begin().await?;

        let bookings = self.repository.list_bookings(&mut tx).await?;

        tx.commit().await?;

        Ok(bookings)
    }

    #[tracing::instrument(
        name = "bookings.service.update_status",
        skip(self, admin),
        fields(admin = admin.username()),
        err
    )]
    async fn update_status(
        &self,
        admin: &AdminPrincipal,
        booking_id: String,
        status: String,
    ) -> Result<(), BookingsServiceError> {
        let status = status.trim();

        if status.is_empty() {
            return Err(BookingsServiceError::EmptyStatus);
        }

        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .update_status(&mut tx, booking_id.trim(), status)
            .await?;

        if rows_affected == 0 {
            return Err(BookingsServiceError::NotFound);
        }

        tx.commit().await?;

        info!(booking_id = %booking_id, status, "updated booking status");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait BookingsService: Send + Sync {
    /// Look a booking up by its public booking ID.
    async fn track_booking(&self, booking_id: String) -> Result<BookingRecord, BookingsServiceError>;

    /// Every booking in submission order.
    async fn list_bookings(
        &self,
        admin: &AdminPrincipal,
    ) -> Result<Vec<BookingRecord>, BookingsServiceError>;

    /// Replace a booking's status with any non-empty value.
    async fn update_status(
        &self,
        admin: &AdminPrincipal,
        booking_id: String,
        status: String,
    ) -> Result<(), BookingsServiceError>;
}
