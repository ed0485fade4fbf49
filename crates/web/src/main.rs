//! Washbay Web Server

use std::process;

use salvo::prelude::*;
use thiserror::Error;
use tracing::{error, info};
use washbay_app::context::{AppContext, AppInitError};

use crate::{
    config::{ServerConfig, auth::AdminConfigError},
    observability::ObservabilityError,
    router::RouterError,
    state::State,
};

mod admin;
mod config;
mod extensions;
mod healthcheck;
mod observability;
mod pages;
mod router;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;

#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Observability(#[from] ObservabilityError),

    #[error(transparent)]
    Session(#[from] AdminConfigError),

    #[error("failed to initialize app context: {0}")]
    App(#[from] AppInitError),

    #[error(transparent)]
    Router(#[from] RouterError),
}

/// Washbay web server entry point
#[tokio::main]
pub async fn main() {
    let config = ServerConfig::load().unwrap_or_else(|error| error.exit());

    if let Err(error) = run(config).await {
        #[expect(
            clippy::print_stderr,
            reason = "startup errors may happen before logging is initialized"
        )]
        {
            eprintln!("{error}");
        }

        process::exit(1);
    }
}

async fn run(config: ServerConfig) -> Result<(), StartupError> {
    observability::init(&config)?;

    let session_secret = config.auth.session_secret()?;

    let settings = config
        .business
        .app_settings(&config.mail.admin_email, config.mail.timeout());

    let app = AppContext::from_database_url(
        &config.database.database_url,
        settings,
        config.mail.sendgrid(),
    )
    .await?;

    let router = router::app_router(
        State::shared(app, config.auth.credentials()),
        &session_secret,
    )?;

    let addr = config.socket_addr();

    info!(
        service_location = %config.business.service_location,
        slot_capacity = config.business.slot_capacity,
        "Starting server on {addr}"
    );

    let listener = TcpListener::new(addr).bind().await;
    let server = Server::new(listener);
    let handle = server.handle();

    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    server.serve(router).await;

    Ok(())
}
