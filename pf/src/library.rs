//! Persisted records: saved prompts and default preferences
//!
//! Both live in the key-value store as JSON documents under fixed keys.
//! Reads are forgiving: an absent key, an unreadable store or malformed JSON
//! all yield the empty default, and a saved record that cannot be read is
//! skipped without dropping its neighbours. Writes are fire-and-forget: a failed write is
//! logged and the in-memory state stays authoritative.

use chrono::{DateTime, Utc};
use keystore::KeyValueStore;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::prompt::FormState;

/// Store key for the saved prompt collection
pub const SAVED_KEY: &str = "promptforge-saved";

/// Store key for the preferences record
pub const PREFERENCES_KEY: &str = "promptforge-preferences";

/// Saved prompt identifier (creation time in unix milliseconds)
pub type PromptId = i64;

/// A named snapshot of the form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedPrompt {
    pub id: PromptId,
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub form: FormState,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
}

impl SavedPrompt {
    pub fn new(id: PromptId, name: impl Into<String>, form: FormState, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: name.into(),
            form,
            created_at,
        }
    }
}

/// Defaults applied to an empty form at startup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Preferences {
    pub default_role: String,
    pub default_format: String,
}

impl Preferences {
    pub fn new(default_role: impl Into<String>, default_format: impl Into<String>) -> Self {
        Self {
            default_role: default_role.into(),
            default_format: default_format.into(),
        }
    }

    /// Pre-fill the form: a non-empty preference wins, otherwise the field keeps its value
    pub fn apply_to(&self, form: &mut FormState) {
        debug!(?self, "Preferences::apply_to: called");
        if !self.default_role.is_empty() {
            form.role = self.default_role.clone();
        }
        if !self.default_format.is_empty() {
            form.format = self.default_format.clone();
        }
    }

    pub fn is_empty(&self) -> bool {
        self.default_role.is_empty() && self.default_format.is_empty()
    }
}

/// Hands out saved prompt ids
///
/// Ids come from the wall clock but never repeat: when the clock has not moved
/// past the last id handed out, the next id is `last + 1`.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: PromptId,
}

impl IdGenerator {
    /// Start above every id already in use
    pub fn seeded(existing: &[SavedPrompt]) -> Self {
        let last = existing.iter().map(|p| p.id).max().unwrap_or(0);
        debug!(last, "IdGenerator::seeded: called");
        Self { last }
    }

    /// Next id given the current time in milliseconds
    pub fn next_at(&mut self, now_ms: i64) -> PromptId {
        let id = if now_ms > self.last { now_ms } else { self.last + 1 };
        self.last = id;
        id
    }

    /// Next id using the wall clock
    pub fn next(&mut self) -> PromptId {
        self.next_at(keystore::now_ms())
    }
}

fn read_key(store: &dyn KeyValueStore, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(e) => {
            warn!(%key, error = %e, "Failed to read store, using defaults");
            None
        }
    }
}

fn write_key(store: &dyn KeyValueStore, key: &str, value: &str) {
    if let Err(e) = store.set(key, value) {
        warn!(%key, error = %e, "Failed to persist value");
    }
}

/// Load the saved prompt collection
pub fn load_saved(store: &dyn KeyValueStore) -> Vec<SavedPrompt> {
    debug!("load_saved: called");
    let Some(raw) = read_key(store, SAVED_KEY) else {
        debug!("load_saved: no saved prompts");
        return Vec::new();
    };
    let records = match serde_json::from_str::<Vec<serde_json::Value>>(&raw) {
        Ok(records) => records,
        Err(e) => {
            warn!(error = %e, "Malformed saved prompts, starting empty");
            return Vec::new();
        }
    };
    let total = records.len();
    let saved: Vec<SavedPrompt> = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value::<SavedPrompt>(record) {
            Ok(prompt) => Some(prompt),
            Err(e) => {
                warn!(index, error = %e, "Skipping unreadable saved prompt");
                None
            }
        })
        .collect();
    info!(count = saved.len(), total, "Loaded saved prompts");
    saved
}

/// Persist the whole saved prompt collection, replacing the stored value
pub fn store_saved(store: &dyn KeyValueStore, saved: &[SavedPrompt]) {
    debug!(count = saved.len(), "store_saved: called");
    match serde_json::to_string(saved) {
        Ok(json) => write_key(store, SAVED_KEY, &json),
        Err(e) => warn!(error = %e, "Failed to serialize saved prompts"),
    }
}

/// Load the preferences record
pub fn load_preferences(store: &dyn KeyValueStore) -> Preferences {
    debug!("load_preferences: called");
    let Some(raw) = read_key(store, PREFERENCES_KEY) else {
        return Preferences::default();
    };
    match serde_json::from_str::<Preferences>(&raw) {
        Ok(prefs) => prefs,
        Err(e) => {
            warn!(error = %e, "Malformed preferences, using defaults");
            Preferences::default()
        }
    }
}

/// Persist the preferences record
pub fn store_preferences(store: &dyn KeyValueStore, prefs: &Preferences) {
    debug!(?prefs, "store_preferences: called");
    match serde_json::to_string(prefs) {
        Ok(json) => write_key(store, PREFERENCES_KEY, &json),
        Err(e) => warn!(error = %e, "Failed to serialize preferences"),
    }
}
