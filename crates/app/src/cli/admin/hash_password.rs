use clap::Args;
use sha2::{Digest, Sha256};

#[derive(Debug, Args)]
pub(crate) struct HashPasswordArgs {
    /// Plaintext administrator password
    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    password: String,
}

pub(crate) fn run(args: &HashPasswordArgs) -> Result<(), String> {
    if args.password.is_empty() {
        return Err("password cannot be empty".to_string());
    }

    println!("{:x}", Sha256::digest(args.password.as_bytes()));

    Ok(())
}
