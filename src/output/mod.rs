//! Output formatting module
//!
//! Handles different output formats: text, table, JSON

mod json;
mod table;
mod text;

use indicatif::ProgressBar;

use crate::catalog::{Year, YearCounts};
use crate::cli::OutputFormat;

pub use self::json::JsonFormatter;
pub use self::table::TableFormatter;
pub use self::text::TextFormatter;

/// Trait for output formatters
pub trait Formatter {
    /// Render the rows as the text to print
    fn render(&self, rows: &[YearRow]) -> String;

    /// Format and print the rows
    fn format(&self, rows: &[YearRow]) {
        let rendered = self.render(rows);
        if !rendered.is_empty() {
            println!("{}", rendered);
        }
    }
}

/// One counted year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRow {
    pub year: Year,
    pub movies: u64,
}

/// Rows for every counted year in request order
///
/// Years that failed or were cancelled are left out; a year requested twice
/// gets two rows.
pub fn year_rows(years: &[Year], counts: &YearCounts) -> Vec<YearRow> {
    years
        .iter()
        .filter_map(|&year| counts.count(year).map(|movies| YearRow { year, movies }))
        .collect()
}

/// `movie` or `movies`
pub fn movie_noun(count: u64) -> &'static str {
    if count == 1 {
        "movie"
    } else {
        "movies"
    }
}

/// Print counted years in the requested format
pub fn output_year_counts(years: &[Year], counts: &YearCounts, format: OutputFormat) {
    let rows = year_rows(years, counts);
    match format {
        OutputFormat::Text => TextFormatter.format(&rows),
        OutputFormat::Table => TableFormatter.format(&rows),
        OutputFormat::Json => JsonFormatter.format(&rows),
    }
}

/// Print one diagnostic line per failed year to stderr
///
/// Returns true if any year failed. Printing is suspended around an active
/// spinner so lines are not overwritten.
pub fn report_failures(counts: &YearCounts, spinner: &Option<ProgressBar>) -> bool {
    let mut failures: Vec<_> = counts.failures().collect();
    failures.sort_by_key(|(year, _)| *year);

    for (year, e) in &failures {
        let msg = format!("Error fetching movies for year {}: {}", year, e);
        if let Some(ref s) = spinner {
            s.suspend(|| eprintln!("{}", msg));
        } else {
            eprintln!("{}", msg);
        }
    }

    !failures.is_empty()
}

/// Log completion status to info log
pub fn log_completion(had_errors: bool) {
    if had_errors {
        log::info!("Completed with some errors");
    } else {
        log::info!("Completed successfully");
    }
}
