//! taskday CLI entry point

use clap::Parser;
use taskday::cli::{self, Cli, Commands};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_LOG_FILTER: &str = "taskday=info,tower_http=warn";

/// Logging is configured through RUST_LOG; empty or invalid filters fall
/// back to the default.
fn init_tracing() {
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|raw| {
            let raw = raw.trim();
            if raw.is_empty() {
                return None;
            }
            EnvFilter::try_new(raw).ok()
        })
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Commands::Serve(Default::default()));

    match command {
        Commands::Serve(args) => {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    eprintln!("Failed to create tokio runtime: {}", e);
                    std::process::exit(1);
                }
            };
            runtime.block_on(cli::web::execute(args));
        }
        Commands::Config { init } => {
            if let Err(e) = cli::config::execute(init) {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        }
    }
}
