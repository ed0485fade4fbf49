//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::{
        bookings::{BookingsService, SqliteBookingsService},
        loyalty::{LoyaltyService, SqliteLoyaltyService},
        promotions::{PromotionsService, SqlitePromotionsService},
        reviews::{ReviewsService, SqliteReviewsService},
    },
    notifications::{NotificationError, Notifier, SendGridConfig, SendGridNotifier},
    settings::AppSettings,
    workflow::{BookingWorkflow, SqliteBookingWorkflow},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply migrations")]
    Migrations(#[source] sqlx::migrate::MigrateError),

    #[error("failed to build mail client")]
    Notifier(#[source] NotificationError),
}

#[derive(Clone)]
pub struct AppContext {
    pub settings: Arc<AppSettings>,
    pub promotions: Arc<dyn PromotionsService>,
    pub bookings: Arc<dyn BookingsService>,
    pub loyalty: Arc<dyn LoyaltyService>,
    pub reviews: Arc<dyn ReviewsService>,
    pub workflow: Arc<dyn BookingWorkflow>,
    pub notifier: Arc<dyn Notifier>,
}

impl AppContext {
    /// Build application context from a database URL, applying pending
    /// migrations first.
    ///
    /// # Errors
    ///
    /// Returns an error when the database cannot be opened or migrated, or
    /// the mail client cannot be built.
    pub async fn from_database_url(
        url: &str,
        settings: AppSettings,
        mail: SendGridConfig,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migrations)?;

        let notifier: Arc<dyn Notifier> =
            Arc::new(SendGridNotifier::new(mail).map_err(AppInitError::Notifier)?);

        Ok(Self::new(Db::new(pool), settings, notifier))
    }

    /// Wire every service over an open database.
    #[must_use]
    pub fn new(db: Db, settings: AppSettings, notifier: Arc<dyn Notifier>) -> Self {
        let settings = Arc::new(settings);

        let promotions: Arc<dyn PromotionsService> = Arc::new(SqlitePromotionsService::new(
            db.clone(),
            settings.promotions,
            settings.promo_location_scoping,
        ));

        Self {
            workflow: Arc::new(SqliteBookingWorkflow::new(
                db.clone(),
                settings.clone(),
                promotions.clone(),
                notifier.clone(),
            )),
            bookings: Arc::new(SqliteBookingsService::new(db.clone())),
            loyalty: Arc::new(SqliteLoyaltyService::new(db.clone())),
            reviews: Arc::new(SqliteReviewsService::new(db)),
            promotions,
            notifier,
            settings,
        }
    }
}
