//! # Reminder Lifecycle Manager
//!
//! Application layer tying scheduling, persistence, and in-memory state
//! together. The presentation layer calls the operations here and renders
//! the snapshots published on the watch channel; it holds no state of its
//! own.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.2.0: State snapshots published over a watch channel
//! - 1.1.0: Single-flight mutation discipline behind a mutex
//! - 1.0.0: Initial release with create/delete/refresh

use std::sync::Arc;

use anyhow::{bail, Result};
use chrono::Utc;
use log::{debug, info, warn};
use tokio::sync::{watch, Mutex};
use uuid::Uuid;

use crate::core::{format_interval, Reminder, INTERVAL_OPTIONS, MAX_TEXT_LENGTH};
use crate::features::acknowledgment::AcknowledgmentEngine;
use crate::features::scheduling::NotificationScheduler;
use crate::notify::NotificationResponse;
use crate::storage::ReminderStore;

/// Immutable state snapshot consumed by the presentation layer
#[derive(Debug, Clone, Default)]
pub struct ReminderSnapshot {
    /// Full collection in insertion order
    pub reminders: Vec<Reminder>,
    /// True until the first load after startup completes
    pub is_loading: bool,
}

impl ReminderSnapshot {
    /// Reminders not yet acknowledged today
    pub fn active(&self) -> Vec<&Reminder> {
        list_active(&self.reminders)
    }

    /// Reminders acknowledged today
    pub fn acknowledged(&self) -> Vec<&Reminder> {
        list_acknowledged(&self.reminders)
    }
}

/// Partition helper: reminders still waiting for today's acknowledgment
pub fn list_active(reminders: &[Reminder]) -> Vec<&Reminder> {
    reminders
        .iter()
        .filter(|r| !r.is_acknowledged_today())
        .collect()
}

/// Partition helper: reminders already acknowledged today
pub fn list_acknowledged(reminders: &[Reminder]) -> Vec<&Reminder> {
    reminders
        .iter()
        .filter(|r| r.is_acknowledged_today())
        .collect()
}

/// Orchestrates reminder creation, deletion, activation, and response
/// handling.
///
/// All mutating operations run single-flight behind one mutex: each
/// completes its persistence write before the next is admitted, which
/// keeps the store's read-modify-write cycles correct.
pub struct ReminderManager {
    store: Arc<ReminderStore>,
    scheduler: Arc<NotificationScheduler>,
    engine: AcknowledgmentEngine,
    state: Mutex<Vec<Reminder>>,
    snapshot_tx: watch::Sender<ReminderSnapshot>,
}

impl ReminderManager {
    pub fn new(store: Arc<ReminderStore>, scheduler: Arc<NotificationScheduler>) -> Self {
        let engine = AcknowledgmentEngine::new(store.clone(), scheduler.clone());
        let (snapshot_tx, _) = watch::channel(ReminderSnapshot {
            reminders: Vec::new(),
            is_loading: true,
        });
        ReminderManager {
            store,
            scheduler,
            engine,
            state: Mutex::new(Vec::new()),
            snapshot_tx,
        }
    }

    /// Subscribe to state snapshots. The latest snapshot is available
    /// immediately via `borrow`.
    pub fn subscribe(&self) -> watch::Receiver<ReminderSnapshot> {
        self.snapshot_tx.subscribe()
    }

    fn publish(&self, reminders: &[Reminder], is_loading: bool) {
        self.snapshot_tx.send_replace(ReminderSnapshot {
            reminders: reminders.to_vec(),
            is_loading,
        });
    }

    /// Request notification permission and register the Yes/No category.
    /// Returns whether notifications are available; a denial leaves the
    /// engine in silent no-notifications mode.
    pub async fn setup_notifications(&self) -> bool {
        self.scheduler.setup().await
    }

    /// Load, reconcile, and persist on app activation, then publish the
    /// reconciled state
    pub async fn activate(&self) {
        let mut state = self.state.lock().await;
        self.publish(&state, true);

        let (stored, _) = self.store.load().await;
        let reconciled = self.engine.reconcile(stored).await;
        if self.store.save_all(&reconciled).await.is_degraded() {
            warn!("Reconciled reminder state was not persisted");
        }

        *state = reconciled;
        self.publish(&state, false);
    }

    /// Create a reminder: validate, schedule the initial notification set,
    /// persist, and return it fully populated for immediate display
    pub async fn create(&self, text: &str, interval_minutes: u32) -> Result<Reminder> {
        let text = text.trim();
        if text.is_empty() {
            bail!("reminder text must not be empty");
        }
        if text.chars().count() > MAX_TEXT_LENGTH {
            bail!("reminder text must be at most {MAX_TEXT_LENGTH} characters");
        }
        if interval_minutes == 0 {
            bail!("reminder interval must be positive");
        }
        if !INTERVAL_OPTIONS.iter().any(|(value, _)| *value == interval_minutes) {
            debug!("Interval {interval_minutes} is not one of the standard options");
        }

        let mut state = self.state.lock().await;

        let mut reminder = Reminder {
            id: Uuid::new_v4().to_string(),
            text: text.to_string(),
            interval_minutes,
            created_at: Utc::now().timestamp_millis(),
            last_acknowledged_date: None,
            notification_ids: Vec::new(),
        };
        reminder.notification_ids = self.scheduler.schedule_for(&reminder).await;

        if self.store.upsert(reminder.clone()).await.is_degraded() {
            warn!("New reminder {} was not persisted", reminder.id);
        }
        state.push(reminder.clone());
        self.publish(&state, false);

        info!(
            "Created reminder {} repeating every {}",
            reminder.id,
            format_interval(interval_minutes)
        );
        Ok(reminder)
    }

    /// Delete a reminder and cancel its outstanding notifications.
    /// Unknown ids are a no-op.
    pub async fn delete(&self, id: &str) {
        let mut state = self.state.lock().await;
        let Some(position) = state.iter().position(|r| r.id == id) else {
            debug!("delete: no reminder with id {id}");
            return;
        };

        let reminder = state.remove(position);
        self.scheduler.cancel_for(&reminder.notification_ids).await;
        if self.store.remove(id).await.is_degraded() {
            warn!("Removal of reminder {id} was not persisted");
        }
        self.publish(&state, false);

        info!("Deleted reminder {id}");
    }

    /// Dispatch a Yes/No response from the host, then republish state
    pub async fn handle_response(&self, response: &NotificationResponse) {
        self.engine.handle_response(response).await;
        self.refresh().await;
    }

    /// Reload state from the store and publish, without reconciling
    pub async fn refresh(&self) {
        let mut state = self.state.lock().await;
        let (stored, _) = self.store.load().await;
        *state = stored;
        self.publish(&state, false);
    }
}
