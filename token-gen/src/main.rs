use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use bank_api::config::Config;
use bank_api::token::{SystemClock, TokenMakerKind, build_token_maker};

/// Issue or inspect access tokens with the same secret and maker the API uses.
///
/// Reads TOKEN_SYMMETRIC_KEY / TOKEN_MAKER / ACCESS_TOKEN_DURATION_SECONDS from the
/// environment (or .env), so a token printed here is accepted by a server started
/// with the same settings.
#[derive(Parser, Debug)]
#[command(name = "token-gen", version, about)]
struct Args {
    /// Override TOKEN_MAKER (symmetric|jwe|paseto|signature|jwt)
    #[arg(long)]
    maker: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a bearer token for IDENTITY
    Issue {
        identity: String,

        /// Lifetime in seconds (negative values produce an expired token).
        /// Default: ACCESS_TOKEN_DURATION_SECONDS
        #[arg(long, allow_hyphen_values = true)]
        duration_seconds: Option<i64>,

        /// Print only the token (no extra lines)
        #[arg(long, default_value_t = false)]
        quiet: bool,
    },
    /// Verify TOKEN and print its payload
    Verify { token: String },
}

/// `--duration-seconds` if given, else the configured default.
fn issue_duration(
    seconds: Option<i64>,
    default: chrono::Duration,
) -> Result<chrono::Duration> {
    match seconds {
        Some(secs) => chrono::Duration::try_seconds(secs)
            .with_context(|| format!("duration out of range: {secs} seconds")),
        None => Ok(default),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::from_env().context("load configuration")?;

    let kind = match args.maker.as_deref() {
        Some(s) => s
            .parse::<TokenMakerKind>()
            .map_err(|_| anyhow::anyhow!("unknown maker: {s}"))?,
        None => config.token_maker,
    };

    let maker = build_token_maker(kind, &config.token_symmetric_key, Arc::new(SystemClock))
        .context("build token maker")?;

    match args.command {
        Command::Issue {
            identity,
            duration_seconds,
            quiet,
        } => {
            let duration = issue_duration(duration_seconds, config.access_token_duration)?;

            let (token, payload) = maker
                .create_token(&identity, duration)
                .context("issue token")?;

            if quiet {
                println!("{token}");
            } else {
                println!("maker:      {kind}");
                println!("token_id:   {}", payload.id());
                println!("identity:   {}", payload.identity());
                println!("expires_at: {}", payload.expires_at().to_rfc3339());
                println!();
                println!("Authorization: Bearer {token}");
            }
        }
        Command::Verify { token } => {
            let payload = maker.verify_token(&token).context("verify token")?;
            println!("token_id:   {}", payload.id());
            println!("identity:   {}", payload.identity());
            println!("issued_at:  {}", payload.issued_at().to_rfc3339());
            println!("expires_at: {}", payload.expires_at().to_rfc3339());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn duration_flag_overrides_default() {
        let default = Duration::minutes(15);

        assert_eq!(issue_duration(None, default).unwrap(), default);
        assert_eq!(issue_duration(Some(60), default).unwrap(), Duration::seconds(60));
        assert_eq!(issue_duration(Some(-60), default).unwrap(), Duration::seconds(-60));
    }

    #[test]
    fn duration_flag_out_of_range_is_an_error() {
        let err = issue_duration(Some(i64::MAX), Duration::minutes(15)).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }
}
