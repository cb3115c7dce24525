#![forbid(unsafe_code)]

//! Core conversion engine and persistence for the Konv length converter.
//!
//! This crate provides:
//! - The unit table (symbol, label, meters per unit)
//! - The conversion engine and display formatting
//! - Input validation and copy-ready text
//! - History and preference persistence
//! - Configuration and logging

pub mod types;
pub mod error;
pub mod units;
pub mod engine;
pub mod format;
pub mod input;
pub mod clipboard;
pub mod config;
pub mod logging;
mod persist;
pub mod history;
pub mod preferences;

// Re-export commonly used types
pub use error::{Error, Result, UnknownUnitError};
pub use types::*;
pub use units::default_table;
pub use engine::{build_comparison_table, convert, convert_request, from_base, scale, to_base};
pub use format::{format_value, SENTINEL};
pub use input::parse_value;
pub use config::Config;
pub use history::HistoryStore;
pub use preferences::{Preferences, Theme};
