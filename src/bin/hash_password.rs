//! Print an Argon2 PHC string for an `[[accounts]]` entry.
//!
//! $ cargo run --bin hash_password -- 's3cret'

use clap::Parser;
use gatekeeper::application_impl::Argon2PasswordHasher;
use gatekeeper::application_port::CredentialHasher;

#[derive(Parser, Debug)]
struct Args {
    password: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let hash = Argon2PasswordHasher
        .hash_password(&args.password)
        .await
        .map_err(|e| anyhow::anyhow!(e))?;
    println!("{}", hash);
    Ok(())
}
