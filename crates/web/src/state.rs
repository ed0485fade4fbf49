//! State

use std::sync::Arc;

use washbay_app::{auth::AdminCredentials, context::AppContext};

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) admin: AdminCredentials,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, admin: AdminCredentials) -> Self {
        Self { app, admin }
    }

    #[must_use]
    pub(crate) fn shared(app: AppContext, admin: AdminCredentials) -> Arc<Self> {
        Arc::new(Self::new(app, admin))
    }
}
