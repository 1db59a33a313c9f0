//! # Local Key-Value Store
//!
//! Small string entries persisted to `~/.agri-sahayak/store.json`: user
//! identity, the preferred locale, and one "last check" watermark per user
//! for weather alerts.
//!
//! Writes use atomic rename (write `.tmp`, then `rename()`) for crash safety.
//! There is no locking; last writer wins, which is acceptable because keys are
//! per-user and writes never race within one process.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};

/// Key holding the signed-in user's id. Cleared on logout.
pub const USER_ID_KEY: &str = "user_id";
/// Key holding the signed-in user's display name. Cleared on logout.
pub const USER_NAME_KEY: &str = "user_name";
/// Key holding the persisted locale (`en` or `hi`).
pub const LANGUAGE_KEY: &str = "language";

/// Per-user key for the weather-alerts unread watermark.
pub fn alerts_last_check_key(user_id: &str) -> String {
    format!("weather_alerts_last_check_{user_id}")
}

/// File-backed string map. Missing or unreadable files load as empty rather
/// than erroring; preferences are never worth refusing to start over.
pub struct Store {
    path: PathBuf,
    values: HashMap<String, String>,
}

impl Store {
    /// Opens the default store at `~/.agri-sahayak/store.json`.
    pub fn open() -> Self {
        let path = dirs::home_dir()
            .map(|h| h.join(".agri-sahayak").join("store.json"))
            .unwrap_or_else(|| PathBuf::from("store.json"));
        Self::open_at(path)
    }

    /// Opens a store at an explicit path (used by tests).
    pub fn open_at(path: PathBuf) -> Self {
        let values = match fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                warn!("store file {} is malformed, starting empty: {}", path.display(), e);
                HashMap::new()
            }),
            Err(_) => HashMap::new(),
        };
        debug!("store loaded from {} ({} entries)", path.display(), values.len());
        Self { path, values }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Sets a value and persists immediately. Persistence failures are logged
    /// and otherwise ignored; the in-memory value still sticks for this run.
    pub fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
        self.persist();
    }

    /// Removes a value and persists immediately.
    pub fn remove(&mut self, key: &str) {
        self.values.remove(key);
        self.persist();
    }

    fn persist(&self) {
        if let Err(e) = atomic_write_json(&self.path, &self.values) {
            warn!("failed to persist store to {}: {}", self.path.display(), e);
        }
    }
}

/// Atomically write `data` as JSON to `path` (via `.tmp` + rename).
fn atomic_write_json<T: serde::Serialize>(path: &Path, data: &T) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp_path = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(name: &str) -> Store {
        let path = std::env::temp_dir().join(format!(
            "agri-sahayak-store-test-{}-{}.json",
            name,
            std::process::id()
        ));
        let _ = fs::remove_file(&path);
        Store::open_at(path)
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let store = temp_store("missing");
        assert!(store.get(USER_ID_KEY).is_none());
    }

    #[test]
    fn test_set_get_roundtrip_through_disk() {
        let mut store = temp_store("roundtrip");
        store.set(USER_ID_KEY, "u1");
        store.set(USER_NAME_KEY, "Asha");

        // Re-open from the same path and verify persistence
        let reopened = Store::open_at(store.path.clone());
        assert_eq!(reopened.get(USER_ID_KEY), Some("u1"));
        assert_eq!(reopened.get(USER_NAME_KEY), Some("Asha"));
    }

    #[test]
    fn test_remove_clears_identity_keys() {
        let mut store = temp_store("remove");
        store.set(USER_ID_KEY, "u1");
        store.set(USER_NAME_KEY, "Asha");
        store.remove(USER_ID_KEY);
        store.remove(USER_NAME_KEY);

        assert!(store.get(USER_ID_KEY).is_none());
        assert!(store.get(USER_NAME_KEY).is_none());

        let reopened = Store::open_at(store.path.clone());
        assert!(reopened.get(USER_ID_KEY).is_none());
    }

    #[test]
    fn test_alerts_last_check_key_is_per_user() {
        assert_eq!(
            alerts_last_check_key("u1"),
            "weather_alerts_last_check_u1"
        );
        assert_ne!(alerts_last_check_key("u1"), alerts_last_check_key("u2"));
    }

    #[test]
    fn test_malformed_file_starts_empty() {
        let path = std::env::temp_dir().join(format!(
            "agri-sahayak-store-test-malformed-{}.json",
            std::process::id()
        ));
        fs::write(&path, "not json at all").unwrap();
        let store = Store::open_at(path);
        assert!(store.get(USER_ID_KEY).is_none());
    }
}
