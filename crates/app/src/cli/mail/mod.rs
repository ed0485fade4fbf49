use clap::{Args, Subcommand};


#[derive(Debug, Args)]
pub(crate) struct MailCommand {
    #[command(subcommand)]
    command: MailSubcommand,
}

#[derive(Debug, Subcommand)]
enum MailSubcommand {
    /// Send a test message through the configured provider
    Test(test::TestMailArgs),
}

pub(crate) async fn run(command: MailCommand) -> Result<(), String> {
    match command.command {
        MailSubcommand::Test(args) => test::run(args).await,
    }
}
