//! CLI argument parsing

mod common;

use clap::Parser;

use crate::catalog::{CountOptions, Credentials, Strategy, Year};
use crate::config::{defaults, env, scan};

pub use common::OutputFormat;

/// Movie catalog client CLI
#[derive(Parser, Debug)]
#[command(name = "moviectl")]
#[command(version)]
#[command(about = "Count movies per year in a paginated movie catalog", long_about = None)]
pub struct Cli {
    /// Catalog server host or IP address (optionally with http:// or https://)
    #[arg(short = 's', long, env = env::SERVER)]
    pub server: String,

    /// Catalog server port
    #[arg(short = 'P', long, default_value_t = defaults::PORT)]
    pub port: u16,

    /// Username for authentication
    #[arg(short = 'u', long, env = env::USERNAME)]
    pub username: String,

    /// Password for authentication
    #[arg(short = 'p', long, env = env::PASSWORD, hide_env_values = true)]
    pub password: String,

    /// Year to count movies for (repeatable)
    #[arg(
        short = 'Y',
        long = "year",
        short_alias = 'y',
        required = true,
        allow_negative_numbers = true
    )]
    pub years: Vec<Year>,

    /// Enable verbose output (same as --log-level debug)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, default_value = defaults::LOG_LEVEL)]
    pub log_level: String,

    /// How pages are discovered for each year
    #[arg(long, value_enum, default_value_t = Strategy::Boundary)]
    pub strategy: Strategy,

    /// Concurrent page workers per year (scan strategy only)
    #[arg(long, default_value_t = scan::DEFAULT_WORKERS, value_parser = parse_workers)]
    pub workers: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Do not show the progress spinner
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,
}

impl Cli {
    /// Log filter to initialise logging with
    pub fn effective_log_level(&self) -> &str {
        if self.verbose {
            defaults::VERBOSE_LOG_LEVEL
        } else {
            &self.log_level
        }
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.username, &self.password)
    }

    pub fn count_options(&self) -> CountOptions {
        CountOptions {
            strategy: self.strategy,
            workers: self.workers,
        }
    }
}

fn parse_workers(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}
