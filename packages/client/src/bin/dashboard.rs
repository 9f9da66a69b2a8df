//! Terminal dashboard for the device backup event stream.
//!
//! Derives the WebSocket URL from the page the backup service serves,
//! prints every pushed log line and device state change, and answers
//! commands (`devices`, `log`, `stats`, `help`, `quit`) at the prompt.
//! A lost connection is not re-established.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin sweetdash -- --page-url http://backup.local:5000/
//! cargo run --bin sweetdash -- --socket-url ws://127.0.0.1:5000/ws --show-stats
//! ```

use std::io::IsTerminal;

use clap::Parser;

use sweetdash_client::{
    config::{DEFAULT_PAGE_URL, DashboardConfig},
    log_view::DEFAULT_LOG_CAPACITY,
    run_dashboard,
};
use sweetdash_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "sweetdash")]
#[command(about = "Terminal dashboard for the device backup event stream", long_about = None)]
struct Args {
    /// URL of the dashboard page; the event stream URL is derived from it
    #[arg(short = 'p', long, default_value = DEFAULT_PAGE_URL)]
    page_url: String,

    /// Event stream URL, overrides the one derived from the page URL
    #[arg(short = 'u', long)]
    socket_url: Option<String>,

    /// Maximum number of log lines kept
    #[arg(long, default_value_t = DEFAULT_LOG_CAPACITY as u16, value_parser = clap::value_parser!(u16).range(1..))]
    log_capacity: u16,

    /// Start with the stats display enabled
    #[arg(long)]
    show_stats: bool,

    /// Default log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    let config = match DashboardConfig::resolve(
        &args.page_url,
        args.socket_url,
        usize::from(args.log_capacity),
        args.show_stats,
    ) {
        Ok(config) if std::io::stdin().is_terminal() => config,
        Ok(config) => config.non_interactive(),
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(2);
        }
    };

    match run_dashboard(config).await {
        Ok(dashboard) if dashboard.is_disconnected() => std::process::exit(1),
        Ok(_) => {}
        Err(e) => {
            tracing::error!("Dashboard error: {}", e);
            std::process::exit(1);
        }
    }
}
