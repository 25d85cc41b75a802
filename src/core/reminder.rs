//! Reminder domain types and calendar-day helpers
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Explicit AckState enum replacing ad-hoc date comparisons
//! - 1.0.0: Initial release with Reminder type and interval options

use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Repeat intervals offered by the UI, with display labels.
/// Advisory only: the core accepts any positive interval.
pub const INTERVAL_OPTIONS: [(u32, &str); 5] = [
    (30, "30 minutes"),
    (60, "1 hour"),
    (120, "2 hours"),
    (180, "3 hours"),
    (240, "4 hours"),
];

/// Interval preselected by the create form
pub const DEFAULT_INTERVAL_MINUTES: u32 = 180;

/// Maximum reminder text length accepted by `create`
pub const MAX_TEXT_LENGTH: usize = 100;

/// A repeating reminder, the sole persisted entity.
///
/// Serialized as one element of a JSON array under a single storage key.
/// Field names are part of the on-disk contract and must stay camelCase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    /// UUID v4, stable for the reminder's lifetime
    pub id: String,
    /// User-supplied description, trimmed, 1-100 characters
    pub text: String,
    /// Minutes between re-notifications
    pub interval_minutes: u32,
    /// Creation timestamp, epoch milliseconds
    pub created_at: i64,
    /// Local calendar date (YYYY-MM-DD) of the most recent acknowledgment.
    /// Absent means never acknowledged or the acknowledgment expired.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_acknowledged_date: Option<String>,
    /// Handles of currently outstanding scheduled notifications, in
    /// scheduling order
    #[serde(default)]
    pub notification_ids: Vec<String>,
}

impl Reminder {
    /// Acknowledgment state relative to the given local date string
    pub fn state_on(&self, today: &str) -> AckState {
        AckState::of(self.last_acknowledged_date.as_deref(), today)
    }

    /// Whether the reminder was acknowledged on the current local date
    pub fn is_acknowledged_today(&self) -> bool {
        self.state_on(&today_string()) == AckState::AcknowledgedToday
    }
}

/// Daily acknowledgment state machine.
///
/// Active reminders re-notify every interval until day end; acknowledged
/// reminders stay silent and flip back to Active at the next day boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AckState {
    /// Not acknowledged today; carries zero or more outstanding notifications
    Active,
    /// Acknowledged today; no outstanding notifications until tomorrow
    AcknowledgedToday,
}

impl AckState {
    /// Pure function of (stored date, current date)
    pub fn of(last_acknowledged: Option<&str>, today: &str) -> Self {
        match last_acknowledged {
            Some(date) if date == today => AckState::AcknowledgedToday,
            _ => AckState::Active,
        }
    }
}

/// Current local calendar date as YYYY-MM-DD
pub fn today_string() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// Format a calendar date as YYYY-MM-DD
pub fn date_string(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Last schedulable instant of the given day, 23:59:59.999 wall clock
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_milli_opt(23, 59, 59, 999)
        .expect("23:59:59.999 is a valid wall-clock time")
}

/// Human-readable interval label such as "1 hour" or "90 minutes"
pub fn format_interval(minutes: u32) -> String {
    if let Some((_, label)) = INTERVAL_OPTIONS.iter().find(|(value, _)| *value == minutes) {
        return (*label).to_string();
    }

    if minutes < 60 {
        format!("{} minute{}", minutes, if minutes == 1 { "" } else { "s" })
    } else if minutes % 60 == 0 {
        let hours = minutes / 60;
        format!("{} hour{}", hours, if hours == 1 { "" } else { "s" })
    } else {
        let hours = minutes / 60;
        let mins = minutes % 60;
        format!(
            "{} hour{} {} minute{}",
            hours,
            if hours == 1 { "" } else { "s" },
            mins,
            if mins == 1 { "" } else { "s" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn reminder() -> Reminder {
        Reminder {
            id: "r1".to_string(),
            text: "drink water".to_string(),
            interval_minutes: 60,
            created_at: 1722945600000,
            last_acknowledged_date: None,
            notification_ids: vec!["n1".to_string()],
        }
    }

    #[test]
    fn test_ack_state_of() {
        assert_eq!(AckState::of(None, "2026-08-06"), AckState::Active);
        assert_eq!(
            AckState::of(Some("2026-08-06"), "2026-08-06"),
            AckState::AcknowledgedToday
        );
        assert_eq!(
            AckState::of(Some("2026-08-05"), "2026-08-06"),
            AckState::Active
        );
    }

    #[test]
    fn test_state_on_uses_stored_date() {
        let mut r = reminder();
        assert_eq!(r.state_on("2026-08-06"), AckState::Active);

        r.last_acknowledged_date = Some("2026-08-06".to_string());
        assert_eq!(r.state_on("2026-08-06"), AckState::AcknowledgedToday);
        assert_eq!(r.state_on("2026-08-07"), AckState::Active);
    }

    #[test]
    fn test_persisted_layout_uses_camel_case_names() {
        let json = serde_json::to_value(reminder()).unwrap();

        assert_eq!(json["id"], "r1");
        assert_eq!(json["text"], "drink water");
        assert_eq!(json["intervalMinutes"], 60);
        assert_eq!(json["createdAt"], 1722945600000i64);
        assert_eq!(json["notificationIds"][0], "n1");
        // Absent acknowledgment date is omitted, not serialized as null
        assert!(json.get("lastAcknowledgedDate").is_none());
    }

    #[test]
    fn test_reads_layout_written_by_the_mobile_app() {
        let raw = r#"[{
            "id": "8b0d7a52-3d6f-4f3e-9c1a-6a1f6d2e9b10",
            "text": "stretch",
            "intervalMinutes": 180,
            "createdAt": 1722945600000,
            "lastAcknowledgedDate": "2026-08-05",
            "notificationIds": ["a", "b"]
        }]"#;

        let reminders: Vec<Reminder> = serde_json::from_str(raw).unwrap();
        assert_eq!(reminders.len(), 1);
        assert_eq!(reminders[0].interval_minutes, 180);
        assert_eq!(
            reminders[0].last_acknowledged_date.as_deref(),
            Some("2026-08-05")
        );
        assert_eq!(reminders[0].notification_ids, vec!["a", "b"]);
    }

    #[test]
    fn test_reads_tolerate_missing_optional_fields() {
        let raw = r#"[{"id": "x", "text": "t", "intervalMinutes": 30, "createdAt": 0}]"#;

        let reminders: Vec<Reminder> = serde_json::from_str(raw).unwrap();
        assert_eq!(reminders[0].last_acknowledged_date, None);
        assert!(reminders[0].notification_ids.is_empty());
    }

    #[test]
    fn test_end_of_day() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        let end = end_of_day(date);

        assert_eq!(end.date().day(), 6);
        assert_eq!(end.format("%H:%M:%S%.3f").to_string(), "23:59:59.999");
    }

    #[test]
    fn test_format_interval() {
        assert_eq!(format_interval(30), "30 minutes");
        assert_eq!(format_interval(60), "1 hour");
        assert_eq!(format_interval(180), "3 hours");
        assert_eq!(format_interval(1), "1 minute");
        assert_eq!(format_interval(45), "45 minutes");
        assert_eq!(format_interval(90), "1 hour 30 minutes");
        assert_eq!(format_interval(61), "1 hour 1 minute");
    }
}
