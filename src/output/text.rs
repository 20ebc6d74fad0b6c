//! Plain text output formatter

use super::{movie_noun, Formatter, YearRow};

/// Formatter for `Year 1950: 23 movies` lines
pub struct TextFormatter;

impl Formatter for TextFormatter {
    fn render(&self, rows: &[YearRow]) -> String {
        rows.iter()
            .map(|row| format!("Year {}: {} {}", row.year, row.movies, movie_noun(row.movies)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
