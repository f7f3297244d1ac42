//! Mint a session token for local development.
//!
//! The token is signed with the same secret the server reads from
//! `STOCKROOM_SESSION_SECRET`, so it can be pasted into the sign-in screen
//! or sent as a bearer token.

use anyhow::{anyhow, Context};
use clap::Parser;
use stockroom_core::{Role, User};
use stockroom_web::{auth::jwt::SessionKeys, load_dotenv, WebConfig};

#[derive(Parser)]
#[command(name = "issue-session")]
#[command(about = "Issue a signed Stockroom session token")]
struct Args {
    /// User id placed in the token subject
    subject: String,

    /// Role: super_admin, admin or member
    #[arg(short, long, default_value = "member")]
    role: String,

    /// Granted permission, repeatable
    #[arg(short = 'p', long = "permission")]
    permissions: Vec<String>,

    /// Display name
    #[arg(short, long)]
    name: Option<String>,

    /// Token lifetime in hours (defaults to STOCKROOM_SESSION_TTL_HOURS)
    #[arg(long)]
    ttl_hours: Option<i64>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    load_dotenv()?;

    let config = WebConfig::from_env();
    if config.uses_default_secret() {
        eprintln!("warning: signing with the default development secret");
    }

    let role: Role = args.role.parse().map_err(|e: String| anyhow!(e))?;
    let mut user = User::new(args.subject, role, args.permissions);
    if let Some(name) = args.name {
        user = user.with_display_name(name);
    }

    let ttl = chrono::Duration::hours(args.ttl_hours.unwrap_or(config.session_ttl_hours));
    let token = SessionKeys::new(config.session_secret.as_bytes())
        .issue(&user, ttl)
        .context("failed to sign session token")?;

    println!("{}", token);
    Ok(())
}
