//! # Persistence Store
//!
//! Durable storage of the reminder collection as one JSON array under a
//! single string key, mirroring the mobile app's key-value store. Storage
//! failures never propagate as errors: reads fall back to an empty
//! collection and writes report [`StoreOutcome::Degraded`], both logged.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Typed StoreOutcome instead of log-only failure reporting
//! - 1.0.0: Initial release with file and in-memory backends

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, error, warn};
use tokio::sync::Mutex;

use crate::core::Reminder;

/// Host key-value storage seam: a single string-keyed durable store
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// In-memory backend for tests and ephemeral sessions
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File backend: one JSON object mapping keys to values, the desktop
/// stand-in for the device store
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    async fn read_map(&self) -> HashMap<String, String> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_default(),
            Err(_) => HashMap::new(),
        }
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock().await;
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e).context("failed to read store file"),
        };
        let map: HashMap<String, String> =
            serde_json::from_str(&raw).context("store file is not valid JSON")?;
        Ok(map.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut map = self.read_map().await;
        map.insert(key.to_string(), value.to_string());
        let raw = serde_json::to_string_pretty(&map)?;
        tokio::fs::write(&self.path, raw)
            .await
            .context("failed to write store file")?;
        Ok(())
    }
}

/// Result of a store operation. Degraded means the collection on disk may
/// be stale; in-memory state remains the source of truth until the next
/// successful load.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOutcome {
    Ok,
    Degraded,
}

impl StoreOutcome {
    pub fn is_degraded(self) -> bool {
        self == StoreOutcome::Degraded
    }
}

/// The authoritative reminder collection, stored whole under one key.
///
/// Every operation is a read-modify-write of the entire collection;
/// concurrent mutation is last-write-wins. Read-modify-write cycles are
/// serialized through an internal mutex because the host may deliver a
/// notification response while a user-initiated mutation is in flight.
pub struct ReminderStore {
    backend: Arc<dyn KeyValueStore>,
    key: String,
    write_lock: Mutex<()>,
}

impl ReminderStore {
    pub fn new(backend: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        ReminderStore {
            backend,
            key: key.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Load the full collection. Failures yield an empty collection and
    /// `Degraded`; a missing key is an empty collection and `Ok`.
    pub async fn load(&self) -> (Vec<Reminder>, StoreOutcome) {
        match self.backend.get(&self.key).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(reminders) => (reminders, StoreOutcome::Ok),
                Err(e) => {
                    warn!("Failed to decode stored reminders: {e}");
                    (Vec::new(), StoreOutcome::Degraded)
                }
            },
            Ok(None) => (Vec::new(), StoreOutcome::Ok),
            Err(e) => {
                warn!("Failed to load reminders: {e}");
                (Vec::new(), StoreOutcome::Degraded)
            }
        }
    }

    /// Replace the full collection
    pub async fn save_all(&self, reminders: &[Reminder]) -> StoreOutcome {
        let raw = match serde_json::to_string(reminders) {
            Ok(raw) => raw,
            Err(e) => {
                error!("Failed to encode reminders: {e}");
                return StoreOutcome::Degraded;
            }
        };
        match self.backend.set(&self.key, &raw).await {
            Ok(()) => StoreOutcome::Ok,
            Err(e) => {
                error!("Failed to save reminders: {e}");
                StoreOutcome::Degraded
            }
        }
    }

    /// Fetch a single reminder by id
    pub async fn get(&self, id: &str) -> Option<Reminder> {
        let (reminders, _) = self.load().await;
        reminders.into_iter().find(|r| r.id == id)
    }

    /// Replace the reminder with the same id, or append it
    pub async fn upsert(&self, reminder: Reminder) -> StoreOutcome {
        let _guard = self.write_lock.lock().await;
        let (mut reminders, _) = self.load().await;
        match reminders.iter_mut().find(|r| r.id == reminder.id) {
            Some(slot) => *slot = reminder,
            None => reminders.push(reminder),
        }
        self.save_all(&reminders).await
    }

    /// Remove a reminder by id; unknown ids leave the store untouched
    pub async fn remove(&self, id: &str) -> StoreOutcome {
        let _guard = self.write_lock.lock().await;
        let (mut reminders, outcome) = self.load().await;
        let before = reminders.len();
        reminders.retain(|r| r.id != id);
        if reminders.len() == before {
            debug!("remove: no reminder with id {id}");
            return outcome;
        }
        self.save_all(&reminders).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    struct FailingStore;

    #[async_trait]
    impl KeyValueStore for FailingStore {
        async fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(anyhow!("backend unavailable"))
        }

        async fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(anyhow!("backend unavailable"))
        }
    }

    fn reminder(id: &str) -> Reminder {
        Reminder {
            id: id.to_string(),
            text: "water the plants".to_string(),
            interval_minutes: 60,
            created_at: 0,
            last_acknowledged_date: None,
            notification_ids: Vec::new(),
        }
    }

    fn store() -> ReminderStore {
        ReminderStore::new(Arc::new(MemoryStore::default()), "@pingit/reminders")
    }

    #[tokio::test]
    async fn test_load_on_empty_store() {
        let store = store();
        let (reminders, outcome) = store.load().await;

        assert!(reminders.is_empty());
        assert_eq!(outcome, StoreOutcome::Ok);
    }

    #[tokio::test]
    async fn test_save_and_load_preserves_order() {
        let store = store();
        let all = vec![reminder("a"), reminder("b"), reminder("c")];

        assert_eq!(store.save_all(&all).await, StoreOutcome::Ok);
        let (loaded, _) = store.load().await;
        let ids: Vec<&str> = loaded.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_upsert_replaces_in_place() {
        let store = store();
        let _ = store.save_all(&[reminder("a"), reminder("b")]).await;

        let mut updated = reminder("a");
        updated.text = "changed".to_string();
        let _ = store.upsert(updated).await;

        let (loaded, _) = store.load().await;
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].text, "changed");
        assert_eq!(loaded[1].id, "b");
    }

    #[tokio::test]
    async fn test_upsert_appends_new_reminder() {
        let store = store();
        let _ = store.upsert(reminder("a")).await;
        let _ = store.upsert(reminder("b")).await;

        let (loaded, _) = store.load().await;
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[1].id, "b");
    }

    #[tokio::test]
    async fn test_remove_unknown_id_is_a_noop() {
        let store = store();
        let _ = store.save_all(&[reminder("a")]).await;

        let outcome = store.remove("missing").await;
        assert_eq!(outcome, StoreOutcome::Ok);

        let (loaded, _) = store.load().await;
        assert_eq!(loaded.len(), 1);
    }

    #[tokio::test]
    async fn test_get_finds_by_id() {
        let store = store();
        let _ = store.save_all(&[reminder("a"), reminder("b")]).await;

        assert_eq!(store.get("b").await.map(|r| r.id), Some("b".to_string()));
        assert!(store.get("missing").await.is_none());
    }

    #[tokio::test]
    async fn test_failed_read_degrades_to_empty() {
        let store = ReminderStore::new(Arc::new(FailingStore), "@pingit/reminders");
        let (reminders, outcome) = store.load().await;

        assert!(reminders.is_empty());
        assert_eq!(outcome, StoreOutcome::Degraded);
    }

    #[tokio::test]
    async fn test_failed_write_reports_degraded() {
        let store = ReminderStore::new(Arc::new(FailingStore), "@pingit/reminders");
        let outcome = store.save_all(&[reminder("a")]).await;

        assert_eq!(outcome, StoreOutcome::Degraded);
    }

    #[tokio::test]
    async fn test_corrupt_payload_degrades_to_empty() {
        let backend = Arc::new(MemoryStore::default());
        backend.set("@pingit/reminders", "not json").await.unwrap();
        let store = ReminderStore::new(backend, "@pingit/reminders");

        let (reminders, outcome) = store.load().await;
        assert!(reminders.is_empty());
        assert_eq!(outcome, StoreOutcome::Degraded);
    }

    #[tokio::test]
    async fn test_file_store_roundtrip() {
        let path = std::env::temp_dir().join(format!("pingit-test-{}.json", uuid::Uuid::new_v4()));
        let file_store = FileStore::new(path.clone());

        assert_eq!(file_store.get("k").await.unwrap(), None);
        file_store.set("k", "v").await.unwrap();
        file_store.set("k2", "v2").await.unwrap();
        assert_eq!(file_store.get("k").await.unwrap(), Some("v".to_string()));
        assert_eq!(file_store.get("k2").await.unwrap(), Some("v2".to_string()));

        let _ = tokio::fs::remove_file(&path).await;
    }
}
