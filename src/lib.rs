// Core layer - shared types and configuration
pub mod core;

// Features layer - all feature modules
pub mod features;

// Infrastructure - host collaborator seams
pub mod notify;
pub mod storage;

// Application layer
pub mod manager;

// Re-export core config for convenience
pub use core::Config;

// Re-export feature items
pub use features::{
    // Acknowledgment & reconciliation
    AcknowledgmentEngine,
    // Scheduling
    NotificationScheduler,
};

// Re-export application and seam items
pub use manager::{list_acknowledged, list_active, ReminderManager, ReminderSnapshot};
pub use notify::{NotificationGateway, NotificationResponse};
pub use storage::{KeyValueStore, ReminderStore, StoreOutcome};
