//! Acknowledgment state transitions and schedule repair

use std::sync::Arc;

use chrono::{Local, NaiveDateTime};
use log::{debug, info, warn};

use crate::core::{date_string, today_string, AckState, Reminder};
use crate::features::scheduling::NotificationScheduler;
use crate::notify::{NotificationResponse, ACTION_NO, ACTION_YES};
use crate::storage::ReminderStore;

/// Drives the Active / AcknowledgedToday state machine and keeps the
/// notification set consistent with the current local day.
pub struct AcknowledgmentEngine {
    store: Arc<ReminderStore>,
    scheduler: Arc<NotificationScheduler>,
}

impl AcknowledgmentEngine {
    pub fn new(store: Arc<ReminderStore>, scheduler: Arc<NotificationScheduler>) -> Self {
        AcknowledgmentEngine { store, scheduler }
    }

    /// Repair acknowledgment flags and notification sets for the current
    /// day. Preserves input order and length; never schedules missed
    /// triggers retroactively. Does not persist; the caller saves the
    /// returned collection.
    pub async fn reconcile(&self, reminders: Vec<Reminder>) -> Vec<Reminder> {
        self.reconcile_at(reminders, Local::now().naive_local()).await
    }

    pub(crate) async fn reconcile_at(
        &self,
        reminders: Vec<Reminder>,
        now: NaiveDateTime,
    ) -> Vec<Reminder> {
        let today = date_string(now.date());
        let mut reconciled = Vec::with_capacity(reminders.len());

        for mut reminder in reminders {
            if reminder.state_on(&today) == AckState::AcknowledgedToday {
                reconciled.push(reminder);
                continue;
            }

            if reminder.last_acknowledged_date.take().is_some() {
                debug!("Cleared stale acknowledgment on reminder {}", reminder.id);
            }

            // Rebuilds schedules lost to a day rollover or a reinstall
            if reminder.notification_ids.is_empty() {
                reminder.notification_ids = self.scheduler.schedule_from(&reminder, now).await;
            }

            reconciled.push(reminder);
        }

        reconciled
    }

    /// Handle a Yes/No action response from the host. Missing payloads,
    /// unknown reminders, and unknown actions are ignored.
    pub async fn handle_response(&self, response: &NotificationResponse) {
        let Some(reminder_id) = response.reminder_id.as_deref() else {
            debug!("Ignoring notification response without a reminder id");
            return;
        };

        match response.action_id.as_str() {
            ACTION_YES => self.acknowledge(reminder_id).await,
            ACTION_NO => debug!("Reminder {reminder_id} dismissed, notifications continue"),
            other => debug!("Ignoring unknown notification action {other:?}"),
        }
    }

    /// Silence a reminder for the remainder of the local day: cancel its
    /// outstanding notifications, stamp today's date, and persist.
    pub async fn acknowledge(&self, reminder_id: &str) {
        let Some(mut reminder) = self.store.get(reminder_id).await else {
            debug!("Ignoring acknowledgment for unknown reminder {reminder_id}");
            return;
        };

        self.scheduler.cancel_for(&reminder.notification_ids).await;
        reminder.last_acknowledged_date = Some(today_string());
        reminder.notification_ids.clear();

        if self.store.upsert(reminder).await.is_degraded() {
            warn!("Acknowledgment of reminder {reminder_id} was not persisted");
        }
        info!("Reminder {reminder_id} acknowledged for today");
    }
}
