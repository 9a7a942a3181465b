//! CLI module

pub mod config;
pub mod web;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "taskday")]
#[command(version)]
#[command(about = "Personal task tracker in the browser")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server (default)
    Serve(web::ServeArgs),
    /// Show the effective config
    Config {
        /// Write a default config file if none exists
        #[arg(long)]
        init: bool,
    },
}
