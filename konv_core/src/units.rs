//! Default unit table and table validation.
//!
//! Factors are meters per one unit. The meter is the base unit through which
//! every conversion is routed.

use crate::types::{UnitDefinition, UnitTable};
use crate::{Error, Result};
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Meters in one international mile
pub const MILE_IN_METERS: f64 = 1609.344;

/// Cached default table - built once and reused across all operations
static DEFAULT_TABLE: Lazy<UnitTable> = Lazy::new(|| UnitTable {
    units: default_definitions(),
});

/// Get a reference to the cached default unit table
pub fn default_table() -> &'static UnitTable {
    &DEFAULT_TABLE
}

/// The built-in unit definitions, in display order
pub fn default_definitions() -> Vec<UnitDefinition> {
    vec![
        UnitDefinition::new("km", "Kilometer (km)", 1000.0),
        UnitDefinition::new("m", "Meter (m)", 1.0),
        UnitDefinition::new("dm", "Decimeter (dm)", 0.1),
        UnitDefinition::new("cm", "Centimeter (cm)", 0.01),
        UnitDefinition::new("mm", "Millimeter (mm)", 0.001),
        UnitDefinition::new("mile", "Mile (mi)", MILE_IN_METERS),
        UnitDefinition::new("yd", "Yard (yd)", 0.9144),
        UnitDefinition::new("ft", "Foot (ft)", 0.3048),
        UnitDefinition::new("inch", "Inch (in)", 0.0254),
    ]
}

impl UnitTable {
    /// Build a table from definitions, validating them once
    pub fn new(units: Vec<UnitDefinition>) -> Result<Self> {
        let errors = validate_definitions(&units);
        if !errors.is_empty() {
            return Err(Error::UnitTable(errors.join("; ")));
        }
        tracing::debug!("Built unit table with {} units", units.len());
        Ok(Self { units })
    }
}

/// Validate a list of unit definitions
///
/// Returns a list of validation errors, or empty Vec if valid.
pub fn validate_definitions(units: &[UnitDefinition]) -> Vec<String> {
    let mut errors = Vec::new();

    if units.is_empty() {
        errors.push("Unit table is empty".to_string());
    }

    let mut seen = HashSet::new();
    for unit in units {
        if unit.symbol.trim().is_empty() {
            errors.push("Unit has empty symbol".to_string());
            continue;
        }
        if !seen.insert(unit.symbol.as_str()) {
            errors.push(format!("Duplicate unit symbol '{}'", unit.symbol));
        }
        if unit.label.trim().is_empty() {
            errors.push(format!("Unit '{}' has empty label", unit.symbol));
        }
        if !unit.factor.is_finite() || unit.factor <= 0.0 {
            errors.push(format!(
                "Unit '{}' has invalid factor {} (must be positive and finite)",
                unit.symbol, unit.factor
            ));
        }
    }

    errors
}
