use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Storage key the ledger snapshot is written under.
pub const DEFAULT_STORAGE_KEY: &str = "@DailyExpenses:data";

/// How long a stored snapshot stays valid.
pub const DEFAULT_RETENTION_DAYS: i64 = 30;

/// Host-configurable settings. Missing fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Key of the snapshot blob in the key-value store.
    pub storage_key: String,

    /// Snapshots older than this many days are discarded on restore.
    pub retention_days: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            retention_days: DEFAULT_RETENTION_DAYS,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings)
    }

    pub fn retention(&self) -> Duration {
        Duration::days(self.retention_days)
    }
}
