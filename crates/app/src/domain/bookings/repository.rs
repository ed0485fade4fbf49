//! Bookings Repository

use sqlx::{Sqlite, Transaction, query, query_as, query_scalar};
use washbay::{bookings::Slot, promotions::DATE_FORMAT};

use crate::domain::bookings::{data::NewBooking, records::BookingRecord};

const CREATE_BOOKING_SQL: &str = include_str!("sql/create_booking.sql");
const COUNT_SLOT_BOOKINGS_SQL: &str = include_str!("sql/count_slot_bookings.sql");
const FIND_BOOKING_SQL: &str = include_str!("sql/find_booking.sql");
const LIST_BOOKINGS_SQL: &str = include_str!("sql/list_bookings.sql");
const UPDATE_BOOKING_STATUS_SQL: &str = include_str!("sql/update_booking_status.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteBookingsRepository;

impl SqliteBookingsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_booking(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        booking: &NewBooking,
    ) -> Result<BookingRecord, sqlx::Error> {
        let request = &booking.request;

        query_as::<Sqlite, BookingRecord>(CREATE_BOOKING_SQL)
            .bind(&booking.booking_id)
            .bind(&request.name)
            .bind(request.email.as_deref())
            .bind(&request.phone)
            .bind(&request.car_model)
            .bind(&request.service_type)
            .bind(request.slot.date.strftime(DATE_FORMAT).to_string())
            .bind(&request.slot.time)
            .bind(&request.car_size)
            .bind(&request.slot.location)
            .bind(request.promo_code.as_deref())
            .bind(i64::from(booking.discount))
            .bind(booking.price.rupees().map(i64::from))
            .bind(&booking.status)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn count_slot_bookings(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        slot: &Slot,
    ) -> Result<i64, sqlx::Error> {
        query_scalar::<Sqlite, i64>(COUNT_SLOT_BOOKINGS_SQL)
            .bind(slot.date.strftime(DATE_FORMAT).to_string())
            .bind(&slot.time)
            .bind(&slot.location)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_booking(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        booking_id: &str,
    ) -> Result<Option<BookingRecord>, sqlx::Error> {
        query_as::<Sqlite, BookingRecord>(FIND_BOOKING_SQL)
            .bind(booking_id)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_bookings(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
    ) -> Result<Vec<BookingRecord>, sqlx::Error> {
        query_as::<Sqlite, BookingRecord>(LIST_BOOKINGS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn update_status(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        booking_id: &str,
        status: &str,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_BOOKING_STATUS_SQL)
            .bind(booking_id)
            .bind(status)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}
