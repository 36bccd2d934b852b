// Task data model and persisted-record normalization

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A single user-entered task.
///
/// `order` is the display-position key: not required to be contiguous, and
/// after any reorder it is descending with storage position (first task has
/// the highest value). Display order always goes through the projector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub text: String,
    pub completed: bool,
    /// Creation time, milliseconds since epoch. Set once, never changed.
    pub created: i64,
    pub order: f64,
}

impl Task {
    /// Build a fresh task: new id, `created = now`, not completed.
    pub fn new(text: impl Into<String>, order: f64) -> Self {
        Self {
            id: generate_id(),
            text: text.into(),
            completed: false,
            created: now_ms(),
            order,
        }
    }

    /// Normalize one persisted record, tolerating any missing or mistyped
    /// field (blobs written before a field existed carry no version marker):
    /// - `id`: kept if a non-empty string, otherwise a fresh id
    /// - `text`: kept if a string, otherwise empty
    /// - `completed`: kept if a bool, otherwise false
    /// - `created`: kept if a non-zero integer, otherwise now
    /// - `order`: kept if numeric, otherwise falls back to `created`,
    ///   preserving relative chronological order for legacy records
    pub fn from_raw(raw: &Value) -> Self {
        let id = raw
            .get("id")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(generate_id);
        let text = raw
            .get("text")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let completed = raw.get("completed").and_then(Value::as_bool).unwrap_or(false);
        let created = raw
            .get("created")
            .and_then(Value::as_i64)
            .filter(|&ms| ms != 0)
            .unwrap_or_else(now_ms);
        let order = raw.get("order").and_then(Value::as_f64).unwrap_or(created as f64);

        Self {
            id,
            text,
            completed,
            created,
            order,
        }
    }

    /// Effective sort key: `order`, falling back to `created` when `order`
    /// is zero or NaN. This mirrors the legacy `order || created` chain and
    /// must stay that way for records migrated from before `order` existed.
    pub fn effective_order(&self) -> f64 {
        if self.order == 0.0 || self.order.is_nan() {
            self.created as f64
        } else {
            self.order
        }
    }
}

/// Fresh opaque task id. UUIDv7, so ids also sort by creation time.
pub fn generate_id() -> String {
    Uuid::now_v7().to_string()
}

/// Current time in milliseconds since epoch.
pub fn now_ms() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("System time before Unix epoch")
        .as_millis() as i64
}
