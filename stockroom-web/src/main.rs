//! Stockroom Web Server
//!
//! Inventory dashboard shell with a permission-filtered sidebar.

use anyhow::Context;
use clap::Parser;
use stockroom_web::server::StockroomServerBuilder;
use stockroom_web::{init_logging, load_dotenv, WebConfig};
use tracing::{info, warn};

/// Stockroom Web Server - inventory dashboard shell
#[derive(Parser)]
#[command(name = "stockroom-web")]
#[command(about = "Inventory dashboard with role/permission-gated navigation")]
#[command(version)]
struct Args {
    /// Server host to bind to
    #[arg(long)]
    host: Option<String>,

    /// Server port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable development mode
    #[arg(long)]
    dev: bool,

    /// Static files directory
    #[arg(long)]
    static_dir: Option<String>,

    /// TOML file with the menu model
    #[arg(long)]
    menu_file: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level);

    // Load environment variables
    if let Err(e) = load_dotenv() {
        warn!("{}", e);
    }

    let mut config = WebConfig::from_env();

    // Override with command line arguments
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    config.dev_mode |= args.dev;
    if args.static_dir.is_some() {
        config.static_dir = args.static_dir;
    }
    if args.menu_file.is_some() {
        config.menu_file = args.menu_file;
    }

    if let Some(menu_file) = &config.menu_file {
        info!("Menu model: {}", menu_file);
    }

    let server = StockroomServerBuilder::from_config(config)
        .build()
        .context("failed to build server")?;

    server.start().await.context("server failed")?;

    Ok(())
}
