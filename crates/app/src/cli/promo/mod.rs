use clap::{Args, Subcommand};

mod issue;
mod list;

#[derive(Debug, Args)]
pub(crate) struct PromoCommand {
    #[command(subcommand)]
    command: PromoSubcommand,
}

#[derive(Debug, Subcommand)]
enum PromoSubcommand {
    Issue(issue::IssuePromoArgs),
    List(list::ListPromosArgs),
}

pub(crate) async fn run(command: PromoCommand) -> Result<(), String> {
    match command.command {
        PromoSubcommand::Issue(args) => issue::run(args).await,
        PromoSubcommand::List(args) => list::run(args).await,
    }
}
