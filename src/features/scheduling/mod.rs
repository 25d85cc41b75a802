//! # Feature: Notification Scheduling
//!
//! Translates a reminder's repeat interval into the concrete set of
//! same-day notification triggers and requests/cancels them through the
//! host gateway.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

pub mod scheduler;

pub use scheduler::{trigger_instants, NotificationScheduler};
