//! Booking submission workflow
//!
//! Turns a submitted booking form into a stored booking: validation, price
//! lookup, promo verdict, slot cap, booking insert plus loyalty point in one
//! transaction, then best-effort notifications.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::civil::Date;
use mockall::automock;
use sqlx::{Sqlite, Transaction};
use thiserror::Error;
use tracing::{Span, info, warn};
use washbay::{
    bookings::{BookingForm, BookingFormError, BookingRequest, STATUS_BOOKED},
    codes::generate_booking_id,
    pricing::{Quote, quote},
    promotions::{PromoValidation, Rejection},
};

use crate::{
    database::{Db, is_unique_violation},
    domain::{
        bookings::{
            data::NewBooking, records::BookingRecord, repository::SqliteBookingsRepository,
        },
        loyalty::repository::SqliteLoyaltyRepository,
        promotions::{PromotionsService, PromotionsServiceError},
    },
    entropy::Entropy,
    notifications::{
        DeliveryReceipt, EmailMessage, NotificationError, Notifier,
        messages::{admin_booking_alert, booking_confirmation},
    },
    settings::AppSettings,
};

/// Shown when the confirmation email could not be sent. Provider detail
/// stays in the logs.
pub const CONFIRMATION_EMAIL_FAILED: &str =
    "Booking saved but we could not email your confirmation.";

/// A stored booking plus everything the customer is shown about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingConfirmation {
    pub booking: BookingRecord,

    /// Loyalty balance after this booking's point.
    pub loyalty_points: u32,

    /// Customer-facing notification problems. The booking stands regardless.
    pub warnings: Vec<String>,
}

impl BookingConfirmation {
    #[must_use]
    pub fn booking_id(&self) -> &str {
        &self.booking.booking_id
    }

    /// Price before the discount.
    #[must_use]
    pub fn price(&self) -> Quote {
        self.booking.price
    }

    #[must_use]
    pub fn discount(&self) -> u32 {
        self.booking.discount
    }
}

/// How a failed submission is reported to the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Bad input; reported inline, nothing written.
    Validation,

    /// Clashes with existing data; nothing written.
    Conflict,

    /// A referenced promo code does not exist.
    NotFound,

    /// Storage failed; the booking was not saved.
    Persistence,
}

#[derive(Debug, Error)]
pub enum SubmitBookingError {
    #[error(transparent)]
    Invalid(#[from] BookingFormError),

    #[error("promo code {code:?} rejected: {rejection}")]
    PromoRejected { code: String, rejection: Rejection },

    #[error("failed to validate promo code")]
    Promotions(#[source] PromotionsServiceError),

    #[error("slot already has {capacity} bookings")]
    SlotFull { capacity: u32 },

    #[error("no free booking ID after {attempts} attempts")]
    BookingIdExhausted { attempts: u32 },

    #[error("storage error")]
    Storage(#[from] sqlx::Error),
}

impl SubmitBookingError {
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Invalid(_)
            | Self::PromoRejected {
                rejection: Rejection::Expired,
                ..
            }
            | Self::Promotions(PromotionsServiceError::MalformedExpiry(_)) => {
                FailureKind::Validation
            }
            Self::PromoRejected {
                rejection: Rejection::UnknownCode,
                ..
            } => FailureKind::NotFound,
            Self::SlotFull { .. } | Self::BookingIdExhausted { .. } => FailureKind::Conflict,
            Self::Promotions(_) | Self::Storage(_) => FailureKind::Persistence,
        }
    }
}

#[derive(Clone)]
pub struct SqliteBookingWorkflow {
    db: Db,
    settings: Arc<AppSettings>,
    promotions: Arc<dyn PromotionsService>,
    notifier: Arc<dyn Notifier>,
    bookings: SqliteBookingsRepository,
    loyalty: SqliteLoyaltyRepository,
    entropy: Entropy,
}

impl SqliteBookingWorkflow {
    #[must_use]
    pub fn new(
        db: Db,
        settings: Arc<AppSettings>,
        promotions: Arc<dyn PromotionsService>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            db,
            settings,
            promotions,
            notifier,
            bookings: SqliteBookingsRepository::new(),
            loyalty: SqliteLoyaltyRepository::new(),
            entropy: Entropy::default(),
        }
    }

    /// Draw booking IDs from `entropy` instead of a fresh OS-seeded generator.
    #[must_use]
    pub fn with_entropy(mut self, entropy: Entropy) -> Self {
        self.entropy = entropy;
        self
    }

    async fn insert_booking(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        request: BookingRequest,
        discount: u32,
        price: Quote,
    ) -> Result<BookingRecord, SubmitBookingError> {
        let attempts = self.settings.booking_id_attempts.max(1);

        let mut booking = NewBooking {
            booking_id: String::new(),
            request,
            discount,
            price,
            status: STATUS_BOOKED.to_string(),
        };

        for attempt in 1..=attempts {
            booking.booking_id = self.entropy.draw(generate_booking_id);

            match self.bookings.create_booking(tx, &booking).await {
                Ok(record) => return Ok(record),
                Err(error) if is_unique_violation(&error) => {
                    warn!(attempt, "booking ID collision, drawing again");
                }
                Err(error) => return Err(error.into()),
            }
        }

        Err(SubmitBookingError::BookingIdExhausted { attempts })
    }

    async fn deliver(&self, message: EmailMessage) -> Result<DeliveryReceipt, NotificationError> {
        tokio::time::timeout(self.settings.mail_timeout, self.notifier.send(message))
            .await
            .unwrap_or_else(|_elapsed| Err(NotificationError::TimedOut))
    }

    /// Send the customer confirmation and the admin alert side by side.
    async fn notify(&self, booking: &BookingRecord) -> Vec<String> {
        let customer = async {
            match booking.email.as_deref() {
                Some(to) => Some(self.deliver(booking_confirmation(booking, to)).await),
                None => None,
            }
        };

        let admin = async {
            let to = self.settings.admin_email.as_str();

            if to.is_empty() {
                None
            } else {
                Some(self.deliver(admin_booking_alert(booking, to)).await)
            }
        };

        let (customer, admin) = tokio::join!(customer, admin);

        let mut warnings = Vec::new();

        if let Some(Err(error)) = customer {
            warn!(booking_id = %booking.booking_id, error = %error, "customer email failed");
            warnings.push(CONFIRMATION_EMAIL_FAILED.to_string());
        }

        if let Some(Err(error)) = admin {
            warn!(booking_id = %booking.booking_id, error = %error, "admin notification failed");
        }

        warnings
    }
}

#[async_trait]
impl BookingWorkflow for SqliteBookingWorkflow {
    #[tracing::instrument(
        name = "workflow.submit_booking",
        skip(self, form),
        fields(
            booking_id = tracing::field::Empty,
            discount = tracing::field::Empty,
            warnings = tracing::field::Empty
        ),
        err
    )]
    async fn submit_booking(
        &self,
        form: BookingForm,
        today: Date,
    ) -> Result<BookingConfirmation, SubmitBookingError> {
        let request = form.validate(&self.settings.service_location)?;
        let price = quote(&request.service_type, &request.car_size);

        let verdict = self
            .promotions
            .validate_code(
                request.promo_code.clone(),
                Some(request.slot.location.clone()),
                today,
            )
            .await
            .map_err(SubmitBookingError::Promotions)?;

        let discount = match verdict {
            PromoValidation::Valid { discount } => discount,
            PromoValidation::Rejected(rejection) => {
                return Err(SubmitBookingError::PromoRejected {
                    code: request.promo_code.unwrap_or_default(),
                    rejection,
                });
            }
        };

        let mut tx = self.db.begin_immediate().await?;

        let capacity = self.settings.slot_capacity;

        if capacity > 0 {
            let booked = self
                .bookings
                .count_slot_bookings(&mut tx, &request.slot)
                .await?;

            if booked >= i64::from(capacity) {
                return Err(SubmitBookingError::SlotFull { capacity });
            }
        }

        let booking = self.insert_booking(&mut tx, request, discount, price).await?;
        let account = self.loyalty.award_point(&mut tx, &booking.phone).await?;

        tx.commit().await?;

        let span = Span::current();

        span.record("booking_id", tracing::field::display(&booking.booking_id));
        span.record("discount", discount);

        info!(booking_id = %booking.booking_id, points = account.points, "booking stored");

        let warnings = self.notify(&booking).await;

        span.record("warnings", warnings.len());

        Ok(BookingConfirmation {
            booking,
            loyalty_points: account.points,
            warnings,
        })
    }
}

#[automock]
#[async_trait]
pub trait BookingWorkflow: Send + Sync {
    /// Validate and store a booking, award a loyalty point and notify.
    ///
    /// Nothing is written unless the whole submission is accepted.
    async fn submit_booking(
        &self,
        form: BookingForm,
        today: Date,
    ) -> Result<BookingConfirmation, SubmitBookingError>;
}
