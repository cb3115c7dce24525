//! Property-based tests for the conversion engine.
//!
//! These tests verify the properties every conversion must satisfy:
//! - Identity: converting a unit to itself returns the input unchanged
//! - Round trip: a -> b -> a returns the input within rounding tolerance
//! - Formatting never produces number-like text for non-finite values

use konv_core::{build_comparison_table, convert, default_table, format_value, SENTINEL};
use proptest::prelude::*;

// =============================================================================
// HELPER STRATEGIES
// =============================================================================

fn unit_strategy() -> impl Strategy<Value = String> {
    let symbols: Vec<String> = default_table().symbols().map(String::from).collect();
    prop::sample::select(symbols)
}

fn finite_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![
        -1.0e12..1.0e12f64,
        -1.0..1.0f64,
        Just(0.0),
    ]
}

fn positive_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![1.0e-9..1.0e-3f64, 1.0e-3..1.0e3f64, 1.0e3..1.0e12f64]
}

// =============================================================================
// CONVERSION PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn identity_conversion_is_exact(unit in unit_strategy(), v in finite_strategy()) {
        let out = convert(default_table(), v, &unit, &unit).unwrap();
        prop_assert_eq!(out, v);
    }

    #[test]
    fn round_trip_within_tolerance(
        a in unit_strategy(),
        b in unit_strategy(),
        v in positive_strategy(),
    ) {
        let table = default_table();
        let there = convert(table, v, &a, &b).unwrap();
        let back = convert(table, there, &b, &a).unwrap();
        let tolerance = v * 1e-12;
        prop_assert!((back - v).abs() <= tolerance, "{} -> {} -> {} gave {}", v, a, b, back);
    }

    #[test]
    fn comparison_table_matches_table_order(unit in unit_strategy(), v in finite_strategy()) {
        let table = default_table();
        let rows = build_comparison_table(table, v, &unit).unwrap();

        prop_assert_eq!(rows.len(), table.len());
        for (row, def) in rows.iter().zip(table.iter()) {
            prop_assert_eq!(&row.unit, &def.symbol);
        }

        let own = rows.iter().find(|r| r.unit == unit).unwrap();
        prop_assert_eq!(&own.display, &format_value(v));
    }

    #[test]
    fn finite_values_never_format_as_sentinel(v in finite_strategy()) {
        let display = format_value(v);
        prop_assert_ne!(display.as_str(), SENTINEL);
        prop_assert!(!display.is_empty());
    }

    #[test]
    fn fixed_output_has_at_most_six_fraction_digits(v in 1.0e-4..1.0e7f64) {
        let display = format_value(v);
        prop_assert!(!display.contains('e'));
        if let Some((_, fraction)) = display.split_once('.') {
            prop_assert!(fraction.len() <= 6);
            prop_assert!(!fraction.ends_with('0'));
        }
    }
}

#[test]
fn non_finite_values_format_as_sentinel() {
    for v in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        assert_eq!(format_value(v), SENTINEL);
    }
}
