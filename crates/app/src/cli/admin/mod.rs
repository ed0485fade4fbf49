use clap::{Args, Subcommand};

mod hash_password;

#[derive(Debug, Args)]
pub(crate) struct AdminCommand {
    #[command(subcommand)]
    command: AdminSubcommand,
}

#[derive(Debug, Subcommand)]
enum AdminSubcommand {
    /// Print the digest to configure as `ADMIN_PASSWORD_SHA256`
    HashPassword(hash_password::HashPasswordArgs),
}

pub(crate) fn run(command: AdminCommand) -> Result<(), String> {
    match command.command {
        AdminSubcommand::HashPassword(args) => hash_password::run(&args),
    }
}
