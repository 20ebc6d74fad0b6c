//! JSON output formatter

use serde::Serialize;

use super::{Formatter, YearRow};
use crate::catalog::Year;

/// Formatter for JSON output
pub struct JsonFormatter;

/// Serializable year count for JSON output
#[derive(Serialize)]
struct JsonYear {
    year: Year,
    movies: u64,
}

impl From<&YearRow> for JsonYear {
    fn from(row: &YearRow) -> Self {
        Self {
            year: row.year,
            movies: row.movies,
        }
    }
}

impl Formatter for JsonFormatter {
    fn render(&self, rows: &[YearRow]) -> String {
        let json_years: Vec<JsonYear> = rows.iter().map(JsonYear::from).collect();

        match serde_json::to_string_pretty(&json_years) {
            Ok(json) => json,
            Err(e) => {
                eprintln!("Error serializing to JSON: {}", e);
                String::new()
            }
        }
    }
}
