//! # Notification Gateway
//!
//! Types and trait for the host notification subsystem. The engine never
//! talks to a device directly; the mobile shell (or the demo binary)
//! implements [`NotificationGateway`] and forwards action-button responses
//! back as [`NotificationResponse`] values.

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Category identifier carried by every reminder notification
pub const NOTIFICATION_CATEGORY: &str = "PINGIT_REMINDER";

/// Fixed title of every reminder notification
pub const NOTIFICATION_TITLE: &str = "🔔 PingIt";

/// Action identifier for the acknowledging "Yes" button
pub const ACTION_YES: &str = "YES";

/// Action identifier for the dismissing "No" button
pub const ACTION_NO: &str = "NO";

// ============================================================================
// Engine -> Host requests
// ============================================================================

/// A single action button offered on a reminder notification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationAction {
    pub identifier: String,
    pub button_title: String,
    /// Whether tapping the button brings the app to the foreground
    pub opens_app: bool,
}

/// Action category registered once at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationCategory {
    pub identifier: String,
    pub actions: Vec<NotificationAction>,
}

/// The Yes/No category used by all reminder notifications
pub fn reminder_category() -> NotificationCategory {
    NotificationCategory {
        identifier: NOTIFICATION_CATEGORY.to_string(),
        actions: vec![
            NotificationAction {
                identifier: ACTION_YES.to_string(),
                button_title: "✓ Yes".to_string(),
                opens_app: false,
            },
            NotificationAction {
                identifier: ACTION_NO.to_string(),
                button_title: "✗ No".to_string(),
                opens_app: false,
            },
        ],
    }
}

/// A request to fire one notification at a concrete future instant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationRequest {
    pub title: String,
    /// Reminder text shown as the notification body
    pub body: String,
    /// Payload linking the notification back to its reminder
    pub reminder_id: String,
    pub category: String,
    /// Local wall-clock instant at which the notification should fire.
    /// Interpreting this as an absolute instant is the host's concern.
    pub trigger_at: NaiveDateTime,
    pub sound: bool,
}

// ============================================================================
// Host -> Engine responses
// ============================================================================

/// An action-button response delivered by the host when the user taps
/// Yes or No on a fired notification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationResponse {
    /// One of [`ACTION_YES`] or [`ACTION_NO`]; anything else is ignored
    pub action_id: String,
    /// Reminder id recovered from the notification payload, if present
    pub reminder_id: Option<String>,
}

/// Host notification subsystem seam.
///
/// Implementations wrap whatever the platform offers: the device
/// notification API on mobile, or a logging stub in the demo shell. All
/// methods are best-effort from the engine's point of view.
#[async_trait]
pub trait NotificationGateway: Send + Sync {
    /// Ask the host for notification permission
    async fn request_permission(&self) -> bool;

    /// Register the action category used by reminder notifications
    async fn register_category(&self, category: NotificationCategory) -> Result<()>;

    /// Schedule a single notification, returning an opaque handle
    async fn schedule(&self, request: NotificationRequest) -> Result<String>;

    /// Cancel a previously scheduled notification by handle
    async fn cancel(&self, handle: &str) -> Result<()>;
}


#[cfg(test)]
mod tests {
    use super::*;

    // The engine holds gateways as trait objects
    fn _assert_object_safe(_: &dyn NotificationGateway) {}

    #[test]
    fn test_reminder_category_offers_yes_and_no() {
        let category = reminder_category();

        assert_eq!(category.identifier, NOTIFICATION_CATEGORY);
        assert_eq!(category.actions.len(), 2);
        assert_eq!(category.actions[0].identifier, ACTION_YES);
        assert_eq!(category.actions[1].identifier, ACTION_NO);
        // Neither button foregrounds the app
        assert!(category.actions.iter().all(|a| !a.opens_app));
    }
}
