use anyhow::Result;
use clap::Parser;

use api_auth::services::token::create_token;

/// Generate access tokens (32 random bytes, hex encoded) for seeding the token store.
///
/// Each token is 64 hex characters, the exact length the `Authorization: Bearer` path accepts.
#[derive(Parser, Debug)]
#[command(name = "token-gen", version, about)]
struct Args {
    /// How many tokens to print
    #[arg(long, short = 'n', default_value_t = 1)]
    count: usize,

    /// Print `Authorization: Bearer <token>` lines instead of bare tokens
    #[arg(long, default_value_t = false)]
    bearer: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    for _ in 0..args.count {
        let token = create_token()?;
        if args.bearer {
            println!("Authorization: Bearer {token}");
        } else {
            println!("{token}");
        }
    }

    Ok(())
}
