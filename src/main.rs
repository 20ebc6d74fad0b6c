//! moviectl - Main entry point

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use log::{debug, info, warn};

use moviectl::catalog::{count_years, CancelSource, CatalogClient, Session};
use moviectl::output::{log_completion, output_year_counts, report_failures};
use moviectl::ui::{create_spinner, finish_spinner_with_status};
use moviectl::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version go to stdout and succeed; usage errors exit 1
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    // Initialize logging
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(cli.effective_log_level()),
    )
    .init();

    run(cli).await
}

async fn run(cli: Cli) -> ExitCode {
    info!("Starting moviectl v{}", env!("CARGO_PKG_VERSION"));
    debug!(
        "CLI args: server={}, port={}, username={}, years={:?}, strategy={}, workers={}, output={}",
        cli.server, cli.port, cli.username, cli.years, cli.strategy, cli.workers, cli.output
    );

    let client = Arc::new(CatalogClient::new(&cli.server, cli.port));
    let session = match Session::login(client, cli.credentials()).await {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!(
        "Filtering movies by year(s): {}",
        cli.years
            .iter()
            .map(|year| year.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );

    // Ctrl-C cancels every in-flight search
    let source = CancelSource::new();
    let cancel = source.signal();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling remaining requests");
            source.cancel();
        }
    });

    let spinner = create_spinner(
        &format!("Counting movies for {} year(s)...", cli.years.len()),
        cli.quiet || cli.verbose,
    );

    let counts = count_years(&session, &cli.years, cli.count_options(), &cancel).await;

    debug!("Counted years: {:?}", counts.counts());

    let had_errors = report_failures(&counts, &spinner);
    finish_spinner_with_status(spinner, counts.counted(), had_errors);

    let cancelled: Vec<_> = counts.cancelled().collect();
    if !cancelled.is_empty() {
        info!("Cancelled before finishing: {:?}", cancelled);
    }

    output_year_counts(&cli.years, &counts, cli.output);
    log_completion(had_errors);

    if counts.counted() == 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
