//! Copy-ready text.
//!
//! These builders produce the exact strings a user copies. Clipboard access
//! itself belongs to the front end; the CLI simply prints them.

use crate::format::format_value;
use crate::types::{ComparisonRow, ConversionResult};

/// `"<display> <unit>"` for a single result
pub fn result_line(result: &ConversionResult) -> String {
    format!("{} {}", result.display, result.unit)
}

/// `"<display> <unit>"` for one row of a comparison table
pub fn row_line(row: &ComparisonRow) -> String {
    format!("{} {}", row.display, row.unit)
}

/// Multi-line block for a whole comparison table
///
/// The first line names the source value, followed by one
/// `"<label>: <display>"` line per row in table order.
pub fn table_block(source_value: f64, from: &str, rows: &[ComparisonRow]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(format!("Source: {} {}", format_value(source_value), from));
    for row in rows {
        lines.push(format!("{}: {}", row.label, row.display));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::build_comparison_table;
    use crate::types::{UnitDefinition, UnitTable};

    #[test]
    fn test_result_line() {
        let result = ConversionResult {
            value: 150.0,
            unit: "cm".into(),
            display: "150".into(),
        };
        assert_eq!(result_line(&result), "150 cm");
    }

    #[test]
    fn test_table_block() {
        let table = UnitTable::new(vec![
            UnitDefinition::new("m", "Meter (m)", 1.0),
            UnitDefinition::new("cm", "Centimeter (cm)", 0.01),
        ])
        .unwrap();
        let rows = build_comparison_table(&table, 2.0, "m").unwrap();

        assert_eq!(
            table_block(2.0, "m", &rows),
            "Source: 2 m\nMeter (m): 2\nCentimeter (cm): 200"
        );
    }

    #[test]
    fn test_row_line() {
        let rows = build_comparison_table(crate::units::default_table(), 1.0, "mile").unwrap();
        let km = rows.iter().find(|r| r.unit == "km").unwrap();
        assert_eq!(row_line(km), "1.609344 km");
    }

    #[test]
    fn test_table_block_without_rows() {
        assert_eq!(table_block(1.5, "ft", &[]), "Source: 1.5 ft");
    }
}
