//! Table output formatter

use comfy_table::{presets::NOTHING, Table};

use super::{Formatter, YearRow};

/// Formatter for ASCII table output
pub struct TableFormatter;

impl Formatter for TableFormatter {
    fn render(&self, rows: &[YearRow]) -> String {
        let mut table = Table::new();
        table.load_preset(NOTHING).set_header(vec!["Year", "Movies"]);

        for row in rows {
            table.add_row(vec![row.year.to_string(), row.movies.to_string()]);
        }

        table.to_string()
    }
}
