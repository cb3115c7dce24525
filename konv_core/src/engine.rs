//! Conversion engine.
//!
//! All conversions are routed through the base unit (meter):
//! - `to_base` multiplies by the source unit's factor
//! - `from_base` divides by the target unit's factor
//! - `convert` composes the two with no intermediate rounding
//!
//! Every function takes the unit table explicitly and is free of side
//! effects. Raw user text is never parsed here; see [`crate::input`].

use crate::error::UnknownUnitError;
use crate::format::format_value;
use crate::types::{ComparisonRow, ConversionRequest, ConversionResult, UnitTable};

/// Convert `value` in `unit` to meters
pub fn to_base(table: &UnitTable, value: f64, unit: &str) -> Result<f64, UnknownUnitError> {
    let def = table.lookup(unit)?;
    Ok(value * def.factor)
}

/// Convert a value in meters to `unit`
///
/// A validated table never holds a zero factor; if one slips through the
/// result is NaN instead of a division by zero.
pub fn from_base(table: &UnitTable, base_value: f64, unit: &str) -> Result<f64, UnknownUnitError> {
    let def = table.lookup(unit)?;
    if def.factor == 0.0 {
        tracing::warn!("Unit '{}' has a zero factor", unit);
        return Ok(f64::NAN);
    }
    Ok(base_value / def.factor)
}

/// Convert `value` from one unit to another
///
/// Converting a unit to itself returns `value` unchanged.
pub fn convert(
    table: &UnitTable,
    value: f64,
    from: &str,
    to: &str,
) -> Result<f64, UnknownUnitError> {
    let base = to_base(table, value, from)?;
    if from == to {
        return Ok(value);
    }
    from_base(table, base, to)
}

/// How many `to` units make one `from` unit
pub fn scale(table: &UnitTable, from: &str, to: &str) -> Result<f64, UnknownUnitError> {
    convert(table, 1.0, from, to)
}

/// Convert and format a request in one step
pub fn convert_request(
    table: &UnitTable,
    request: &ConversionRequest,
) -> Result<ConversionResult, UnknownUnitError> {
    let value = convert(table, request.value, &request.from_unit, &request.to_unit)?;
    tracing::debug!(
        "Converted {} {} -> {} {}",
        request.value,
        request.from_unit,
        value,
        request.to_unit
    );
    Ok(ConversionResult {
        value,
        unit: request.to_unit.clone(),
        display: format_value(value),
    })
}

/// Equivalent values of `value` (in `from`) across every unit of the table
///
/// Rows follow table definition order and include `from` itself, whose
/// display always equals `format_value(value)`.
pub fn build_comparison_table(
    table: &UnitTable,
    value: f64,
    from: &str,
) -> Result<Vec<ComparisonRow>, UnknownUnitError> {
    // Fail on an unknown source before producing any rows
    table.lookup(from)?;

    table
        .iter()
        .map(|def| {
            let converted = convert(table, value, from, &def.symbol)?;
            Ok(ComparisonRow {
                unit: def.symbol.clone(),
                label: def.label.clone(),
                value: converted,
                display: format_value(converted),
            })
        })
        .collect()
}
