//! Core domain types for the Konv length converter.
//!
//! This module defines the fundamental types used throughout the system:
//! - Unit definitions and the unit table
//! - Conversion requests and results
//! - Comparison table rows
//! - History records

use crate::error::UnknownUnitError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Unit Types
// ============================================================================

/// A length unit and its scale relative to the meter
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UnitDefinition {
    /// Unique key, e.g. `"km"`
    pub symbol: String,
    /// Display name, e.g. `"Kilometer (km)"`
    pub label: String,
    /// Meters per one unit. Always positive and finite in a validated table.
    pub factor: f64,
}

impl UnitDefinition {
    pub fn new(symbol: impl Into<String>, label: impl Into<String>, factor: f64) -> Self {
        Self {
            symbol: symbol.into(),
            label: label.into(),
            factor,
        }
    }
}

/// Ordered, validated set of unit definitions
///
/// The only way to obtain a table is through [`UnitTable::new`] (or the
/// cached default in [`crate::units`]), so every table in circulation has
/// unique symbols and positive factors. Definition order is preserved and is
/// the order of every listing and comparison table.
#[derive(Clone, Debug, PartialEq)]
pub struct UnitTable {
    pub(crate) units: Vec<UnitDefinition>,
}

impl UnitTable {
    /// Look up a unit by symbol
    pub fn get(&self, symbol: &str) -> Option<&UnitDefinition> {
        self.units.iter().find(|u| u.symbol == symbol)
    }

    /// Look up a unit by symbol, failing with [`UnknownUnitError`]
    pub fn lookup(&self, symbol: &str) -> Result<&UnitDefinition, UnknownUnitError> {
        self.get(symbol).ok_or_else(|| UnknownUnitError::new(symbol))
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.get(symbol).is_some()
    }

    /// Iterate units in definition order
    pub fn iter(&self) -> impl Iterator<Item = &UnitDefinition> {
        self.units.iter()
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.units.iter().map(|u| u.symbol.as_str())
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

// ============================================================================
// Conversion Types
// ============================================================================

/// A value to convert between two units of the table
#[derive(Clone, Debug, PartialEq)]
pub struct ConversionRequest {
    pub value: f64,
    pub from_unit: String,
    pub to_unit: String,
}

impl ConversionRequest {
    pub fn new(value: f64, from_unit: impl Into<String>, to_unit: impl Into<String>) -> Self {
        Self {
            value,
            from_unit: from_unit.into(),
            to_unit: to_unit.into(),
        }
    }

    /// The same request with source and target units exchanged
    pub fn swapped(&self) -> Self {
        Self {
            value: self.value,
            from_unit: self.to_unit.clone(),
            to_unit: self.from_unit.clone(),
        }
    }
}

/// Converted value together with its display string
#[derive(Clone, Debug, PartialEq)]
pub struct ConversionResult {
    pub value: f64,
    pub unit: String,
    pub display: String,
}

/// One row of a comparison table
#[derive(Clone, Debug, PartialEq)]
pub struct ComparisonRow {
    pub unit: String,
    pub label: String,
    pub value: f64,
    pub display: String,
}

// ============================================================================
// History Types
// ============================================================================

/// A committed conversion, as stored in the history file
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub recorded_at: DateTime<Utc>,
    pub input_value: f64,
    pub from_unit: String,
    pub to_unit: String,
    /// Formatted output, exactly as it was shown
    pub output: String,
}

impl HistoryEntry {
    /// Build a history record from an engine result
    pub fn from_result(request: &ConversionRequest, result: &ConversionResult) -> Self {
        Self {
            id: Uuid::new_v4(),
            recorded_at: Utc::now(),
            input_value: request.value,
            from_unit: request.from_unit.clone(),
            to_unit: result.unit.clone(),
            output: result.display.clone(),
        }
    }

    /// Schema checks applied when loading persisted history
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if !self.input_value.is_finite() {
            errors.push(format!("entry {} has non-finite input value", self.id));
        }
        if self.from_unit.is_empty() || self.to_unit.is_empty() {
            errors.push(format!("entry {} has an empty unit", self.id));
        }
        if self.output.is_empty() {
            errors.push(format!("entry {} has an empty output", self.id));
        }
        errors
    }
}
