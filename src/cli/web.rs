//! `taskday serve`

use std::sync::Arc;

use clap::Args;

use crate::api::{self, state::AppState};
use crate::storage::config::{self, Config};

/// Overrides for the `[server]` config section
#[derive(Debug, Default, Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,
    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,
    /// Don't automatically open browser
    #[arg(long)]
    pub no_open: bool,
}

impl ServeArgs {
    /// Layer command-line flags over the loaded config.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if self.no_open {
            config.server.open_browser = false;
        }
        config
    }
}

/// Execute the web server
pub async fn execute(args: ServeArgs) {
    let config = args.apply(config::load_config());
    let state = Arc::new(AppState::new(&config.session));

    if config.server.open_browser {
        let url = browser_url(&config.server.host, config.server.port);
        tokio::spawn(async move {
            tokio::time::sleep(tokio::time::Duration::from_millis(500)).await;
            println!("Opening browser: {}", url);
            if let Err(e) = open::that(&url) {
                tracing::warn!("Failed to open browser: {}", e);
            }
        });
    }

    if let Err(e) = api::start_server(&config.server.host, config.server.port, state).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// URL a local browser can reach, even when bound to all interfaces
fn browser_url(host: &str, port: u16) -> String {
    let host = match host {
        "0.0.0.0" | "::" | "[::]" => "localhost",
        other => other,
    };
    format!("http://{}:{}/", host, port)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let args = ServeArgs {
            port: Some(8080),
            host: None,
            no_open: true,
        };
        let config = args.apply(Config::default());
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert!(!config.server.open_browser);
    }

    #[test]
    fn test_no_flags_keep_config() {
        let mut base = Config::default();
        base.server.port = 4000;
        let config = ServeArgs::default().apply(base.clone());
        assert_eq!(config, base);
    }

    #[test]
    fn test_browser_url() {
        assert_eq!(browser_url("0.0.0.0", 3002), "http://localhost:3002/");
        assert_eq!(browser_url("127.0.0.1", 80), "http://127.0.0.1:80/");
    }
}
