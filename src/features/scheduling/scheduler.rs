//! Interval-based trigger computation and gateway plumbing

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{Duration, Local, NaiveDateTime};
use log::{debug, info, warn};

use crate::core::{end_of_day, Reminder};
use crate::notify::{
    reminder_category, NotificationGateway, NotificationRequest, NOTIFICATION_CATEGORY,
    NOTIFICATION_TITLE,
};

/// Schedules and cancels reminder notifications against the host gateway.
///
/// Once permission has been denied the scheduler degrades to a silent
/// no-notifications mode: `schedule_for` returns the empty set and the UI
/// stays fully usable.
pub struct NotificationScheduler {
    gateway: Arc<dyn NotificationGateway>,
    enabled: AtomicBool,
}

impl NotificationScheduler {
    pub fn new(gateway: Arc<dyn NotificationGateway>) -> Self {
        NotificationScheduler {
            gateway,
            enabled: AtomicBool::new(true),
        }
    }

    /// Request permission and register the Yes/No action category.
    /// Returns whether notifications are available.
    pub async fn setup(&self) -> bool {
        let granted = self.gateway.request_permission().await;
        if !granted {
            info!("Notification permission denied, running without notifications");
            self.enabled.store(false, Ordering::SeqCst);
            return false;
        }

        if let Err(e) = self.gateway.register_category(reminder_category()).await {
            warn!("Failed to register notification category: {e}");
        }
        self.enabled.store(true, Ordering::SeqCst);
        true
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    /// Schedule the remainder-of-day notification set for a reminder,
    /// returning the granted handles in trigger order
    pub async fn schedule_for(&self, reminder: &Reminder) -> Vec<String> {
        self.schedule_from(reminder, Local::now().naive_local()).await
    }

    pub(crate) async fn schedule_from(
        &self,
        reminder: &Reminder,
        now: NaiveDateTime,
    ) -> Vec<String> {
        if !self.is_enabled() {
            return Vec::new();
        }

        let mut handles = Vec::new();
        for trigger_at in trigger_instants(now, reminder.interval_minutes) {
            let request = NotificationRequest {
                title: NOTIFICATION_TITLE.to_string(),
                body: reminder.text.clone(),
                reminder_id: reminder.id.clone(),
                category: NOTIFICATION_CATEGORY.to_string(),
                trigger_at,
                sound: true,
            };
            // Best-effort: a failed trigger is skipped, its siblings stand
            match self.gateway.schedule(request).await {
                Ok(handle) => handles.push(handle),
                Err(e) => warn!(
                    "Failed to schedule notification for reminder {}: {e}",
                    reminder.id
                ),
            }
        }

        debug!(
            "Scheduled {} notification(s) for reminder {}",
            handles.len(),
            reminder.id
        );
        handles
    }

    /// Best-effort cancellation; handles that already fired are ignored
    pub async fn cancel_for(&self, handles: &[String]) {
        for handle in handles {
            if let Err(e) = self.gateway.cancel(handle).await {
                debug!("Ignoring cancel failure for notification {handle}: {e}");
            }
        }
    }
}

/// Trigger instants at `now + interval`, `now + 2*interval`, ... capped at
/// 23:59:59.999 of the current day. Empty when the first trigger would
/// already land past day end.
pub fn trigger_instants(now: NaiveDateTime, interval_minutes: u32) -> Vec<NaiveDateTime> {
    let mut triggers = Vec::new();
    if interval_minutes == 0 {
        return triggers;
    }

    let interval = Duration::minutes(i64::from(interval_minutes));
    let day_end = end_of_day(now.date());
    let mut next = now + interval;
    while next <= day_end {
        triggers.push(next);
        next = next + interval;
    }
    triggers
}
