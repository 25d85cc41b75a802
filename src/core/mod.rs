//! # Core Module
//!
//! Core domain types, configuration, and calendar-day helpers for the
//! reminder engine.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Explicit acknowledgment state machine in the reminder module
//! - 1.0.0: Initial creation with config and reminder modules

pub mod config;
pub mod reminder;

// Re-export commonly used items
pub use config::Config;
pub use reminder::{
    date_string, end_of_day, format_interval, today_string, AckState, Reminder,
    DEFAULT_INTERVAL_MINUTES, INTERVAL_OPTIONS, MAX_TEXT_LENGTH,
};
