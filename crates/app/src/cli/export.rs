use std::{fs, path::PathBuf};

use clap::{Args, ValueEnum};
use washbay_app::{
    auth::AdminPrincipal,
    exports::{self, ExportKind},
};

use crate::cli::open_context;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ExportTarget {
    Bookings,
    Reviews,
    Loyalty,
    Promotions,
}

impl From<ExportTarget> for ExportKind {
    fn from(target: ExportTarget) -> Self {
        match target {
            ExportTarget::Bookings => Self::Bookings,
            ExportTarget::Reviews => Self::Reviews,
            ExportTarget::Loyalty => Self::Loyalty,
            ExportTarget::Promotions => Self::Promotions,
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct ExportArgs {
    /// What to export
    #[arg(value_enum)]
    target: ExportTarget,

    /// File to write; defaults to the standard file name in the current directory
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// SQLite connection string
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://washbay.db")]
    database_url: String,
}

pub(crate) async fn run(args: ExportArgs) -> Result<(), String> {
    let ctx = open_context(&args.database_url).await?;
    let kind = ExportKind::from(args.target);

    let csv = exports::export(&ctx, &AdminPrincipal::local_operator(), kind)
        .await
        .map_err(|error| format!("failed to export: {error}"))?;

    let path = args
        .output
        .unwrap_or_else(|| PathBuf::from(kind.file_name()));

    fs::write(&path, csv).map_err(|error| format!("failed to write {}: {error}", path.display()))?;

    println!("wrote {}", path.display());

    Ok(())
}
