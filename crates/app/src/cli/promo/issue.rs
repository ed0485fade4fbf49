use clap::Args;
use jiff::Zoned;
use washbay::promotions::PromotionRules;
use washbay_app::{
    domain::promotions::{PromotionsService, SqlitePromotionsService},
    settings::DEFAULT_SERVICE_LOCATION,
};

use crate::cli::open_database;

#[derive(Debug, Args)]
pub(crate) struct IssuePromoArgs {
    /// SQLite connection string
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://washbay.db")]
    database_url: String,

    /// Location the code is restricted to
    #[arg(long, env = "SERVICE_LOCATION", default_value = DEFAULT_SERVICE_LOCATION)]
    location: String,

    /// Issue a code valid at every location
    #[arg(long, conflicts_with = "location")]
    unscoped: bool,
}

pub(crate) async fn run(args: IssuePromoArgs) -> Result<(), String> {
    let db = open_database(&args.database_url).await?;

    let service = SqlitePromotionsService::new(db, PromotionRules::default(), true);
    let location = (!args.unscoped).then_some(args.location);

    let issued = service
        .issue_code(location, Zoned::now().date())
        .await
        .map_err(|error| format!("failed to issue promo code: {error}"))?;

    println!("code: {}", issued.promo.code);
    println!("discount: ₹{}", issued.promo.discount);
    println!("expiry_date: {}", issued.promo.expiry_date);
    println!(
        "location: {}",
        issued.promo.location.as_deref().unwrap_or("any")
    );

    Ok(())
}
