//! # Feature: Acknowledgment & Reconciliation
//!
//! Daily acknowledgment handling and the reconciliation pass that repairs
//! reminder state on every app activation: stale flags are cleared and
//! missing notification sets are rescheduled.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Response handling made infallible; unknown reminders are no-ops
//! - 1.0.0: Initial release with reconcile and Yes/No dispatch

pub mod engine;

pub use engine::AcknowledgmentEngine;
