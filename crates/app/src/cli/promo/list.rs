use clap::Args;
use washbay::promotions::PromotionRules;
use washbay_app::{
    auth::AdminPrincipal,
    domain::promotions::{PromotionsService, SqlitePromotionsService},
};

use crate::cli::open_database;

#[derive(Debug, Args)]
pub(crate) struct ListPromosArgs {
    /// SQLite connection string
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://washbay.db")]
    database_url: String,
}

pub(crate) async fn run(args: ListPromosArgs) -> Result<(), String> {
    let db = open_database(&args.database_url).await?;

    let service = SqlitePromotionsService::new(db, PromotionRules::default(), true);

    let rows = service
        .list_promotions(&AdminPrincipal::local_operator())
        .await
        .map_err(|error| format!("failed to list promo codes: {error}"))?;

    if rows.is_empty() {
        println!("no promo codes found");
        return Ok(());
    }

    for row in rows {
        println!(
            "{}\t₹{}\t{}\t{}",
            row.code,
            row.discount,
            row.expiry_date,
            row.location.as_deref().unwrap_or("any")
        );
    }

    Ok(())
}
