use clap::Args;

use crate::cli::open_database;

#[derive(Debug, Args)]
pub(crate) struct MigrateArgs {
    /// SQLite connection string
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://washbay.db")]
    database_url: String,
}

pub(crate) async fn run(args: MigrateArgs) -> Result<(), String> {
    open_database(&args.database_url).await?;

    println!("database is up to date");

    Ok(())
}
