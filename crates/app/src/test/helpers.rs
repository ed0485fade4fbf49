//! Test Helpers

use washbay::{bookings::STATUS_BOOKED, pricing::Quote};

use crate::{
    domain::{
        bookings::{data::NewBooking, records::BookingRecord, repository::SqliteBookingsRepository},
        loyalty::{records::LoyaltyRecord, repository::SqliteLoyaltyRepository},
    },
    test::TestContext,
};

impl TestContext {
    /// Store a booking directly, bypassing the workflow.
    pub(crate) async fn seed_booking(
        &self,
        booking_id: &str,
        price: Quote,
        discount: u32,
    ) -> Result<BookingRecord, sqlx::Error> {
        let mut tx = self.db.begin().await?;

        let record = SqliteBookingsRepository::new()
            .create_booking(
                &mut tx,
                &NewBooking {
                    booking_id: booking_id.to_string(),
                    request: self.booking_request(),
                    discount,
                    price,
                    status: STATUS_BOOKED.to_string(),
                },
            )
            .await?;

        tx.commit().await?;

        Ok(record)
    }

    pub(crate) async fn award_point(&self, phone: &str) -> Result<LoyaltyRecord, sqlx::Error> {
        let mut tx = self.db.begin().await?;

        let record = SqliteLoyaltyRepository::new()
            .award_point(&mut tx, phone)
            .await?;

        tx.commit().await?;

        Ok(record)
    }
}
