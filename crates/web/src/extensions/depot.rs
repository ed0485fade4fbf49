//! Depot helper extensions.

use std::{any::Any, sync::Arc};

use jiff::{Zoned, civil::Date};
use salvo::prelude::{Depot, StatusError};
use washbay_app::auth::AdminPrincipal;

use crate::state::State;

/// Overrides the current date for the request, e.g. in handler tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Today(pub(crate) Date);

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn state(&self) -> Result<Arc<State>, StatusError>;

    /// The principal placed by the admin middleware.
    fn admin(&self) -> Result<&AdminPrincipal, StatusError>;

    /// Today's local calendar date.
    fn today(&self) -> Date;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn state(&self) -> Result<Arc<State>, StatusError> {
        self.obtain_or_500::<Arc<State>>().cloned()
    }

    fn admin(&self) -> Result<&AdminPrincipal, StatusError> {
        self.obtain::<AdminPrincipal>()
            .map_err(|_ignored| StatusError::unauthorized())
    }

    fn today(&self) -> Date {
        self.obtain::<Today>()
            .map_or_else(|_missing| Zoned::now().date(), |today| today.0)
    }
}
