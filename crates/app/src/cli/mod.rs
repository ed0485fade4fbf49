use std::sync::Arc;

use clap::{Parser, Subcommand};
use washbay_app::{
    context::AppContext,
    database::{self, Db},
    notifications::{
        DEFAULT_MAIL_TIMEOUT, DEFAULT_SENDGRID_API_URL, SendGridConfig, SendGridNotifier,
    },
    settings::AppSettings,
};

mod admin;
mod db;
mod export;
mod mail;
mod promo;

#[derive(Debug, Parser)]
#[command(name = "washbay-app", about = "Washbay CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    Promo(promo::PromoCommand),
    Export(export::ExportArgs),
    Mail(mail::MailCommand),
    Admin(admin::AdminCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::Promo(command) => promo::run(command).await,
            Commands::Export(args) => export::run(args).await,
            Commands::Mail(command) => mail::run(command).await,
            Commands::Admin(command) => admin::run(command),
        }
    }
}

/// Open the database and bring its schema up to date.
pub(crate) async fn open_database(database_url: &str) -> Result<Db, String> {
    let pool = database::connect(database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    database::migrate(&pool)
        .await
        .map_err(|error| format!("failed to apply migrations: {error}"))?;

    Ok(Db::new(pool))
}

/// Services over an open database, with mail delivery switched off.
pub(crate) async fn open_context(database_url: &str) -> Result<AppContext, String> {
    let db = open_database(database_url).await?;

    let notifier = SendGridNotifier::new(SendGridConfig {
        api_key: None,
        api_url: DEFAULT_SENDGRID_API_URL.to_string(),
        from_email: String::new(),
        timeout: DEFAULT_MAIL_TIMEOUT,
    })
    .map_err(|error| format!("failed to build mail client: {error}"))?;

    Ok(AppContext::new(db, AppSettings::default(), Arc::new(notifier)))
}
