// Task store: canonical collection ownership, mutations, and blob persistence

use crate::error::{Error, Result};
use crate::model::Task;
use crate::reorder;
use crate::storage::BlobStorage;
use serde_json::Value;
use tracing::{debug, warn};

/// Storage key the task blob lives under. Kept as-is so existing data loads.
pub const TASKS_KEY: &str = "todos_app_data";

/// Collection counts for the host's stat display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
}

/// Owner of the canonical task collection and sole writer of persisted state.
///
/// Every mutating operation persists synchronously before returning; there
/// is no batching. A failed write does NOT roll back the in-memory mutation:
/// the error comes back so the host can warn that a reload may lose data,
/// and the in-memory collection stays authoritative for the session.
///
/// Unknown-id operations are silent no-ops reported as `Ok(false)`; stale
/// references and double-clicks are expected, not errors.
pub struct TaskStore<S: BlobStorage> {
    storage: S,
    tasks: Vec<Task>,
}

impl<S: BlobStorage> TaskStore<S> {
    /// Open a store over the given adapter and load whatever it holds.
    pub fn open(storage: S) -> Self {
        let mut store = Self {
            storage,
            tasks: Vec::new(),
        };
        store.load();
        store
    }

    /// Read-only view of the collection in storage order. Display order is
    /// derived through the projector, never read off this directly.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Look up a single task by id.
    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Access the underlying adapter, e.g. for slots the store does not own.
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Add a task with a fresh id, `created = now`, and an `order` one past
    /// the current maximum so it sorts last under ascending order. Text that
    /// is empty after trimming is rejected before any mutation; trimming
    /// itself is the caller's job, the text is stored as given.
    pub fn create(&mut self, text: &str) -> Result<String> {
        if text.trim().is_empty() {
            return Err(Error::InvalidInput);
        }

        let task = Task::new(text, self.max_order() + 1.0);
        let id = task.id.clone();
        debug!(id = %id, "task created");
        self.tasks.push(task);
        self.persist()?;
        Ok(id)
    }

    /// Delete the task with the given id. `Ok(false)` if absent.
    pub fn remove(&mut self, id: &str) -> Result<bool> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            return Ok(false);
        }
        debug!(id, "task removed");
        self.persist()?;
        Ok(true)
    }

    /// Flip a task's completed flag. `Ok(false)` if absent.
    pub fn toggle_complete(&mut self, id: &str) -> Result<bool> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(false);
        };
        task.completed = !task.completed;
        self.persist()?;
        Ok(true)
    }

    /// Replace a task's text, leaving `order` and `created` untouched.
    /// Empty text is rejected; the UI decides whether that means delete.
    /// `Ok(false)` if the id is absent.
    pub fn edit_text(&mut self, id: &str, new_text: &str) -> Result<bool> {
        if new_text.trim().is_empty() {
            return Err(Error::InvalidInput);
        }
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(false);
        };
        task.text = new_text.to_string();
        self.persist()?;
        Ok(true)
    }

    /// Remove every completed task. Returns how many were removed.
    pub fn clear_completed(&mut self) -> Result<usize> {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.completed);
        let removed = before - self.tasks.len();
        if removed > 0 {
            debug!(removed, "completed tasks cleared");
            self.persist()?;
        }
        Ok(removed)
    }

    /// Move `from_id` immediately before `to_id` and renumber the whole
    /// collection descending with storage position. `Ok(false)` when either
    /// id is absent or both are equal.
    pub fn reorder(&mut self, from_id: &str, to_id: &str) -> Result<bool> {
        if !reorder::reorder(&mut self.tasks, from_id, to_id) {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// Replace the collection with whatever the adapter holds.
    ///
    /// Each record is normalized field by field (see `Task::from_raw`). A
    /// blob that does not parse as a JSON array resets the collection to
    /// empty; corruption is logged and never fatal.
    pub fn load(&mut self) {
        let blob = match self.storage.get(TASKS_KEY) {
            Ok(Some(blob)) => blob,
            Ok(None) => {
                self.tasks = Vec::new();
                return;
            }
            Err(err) => {
                warn!(error = %err, "could not read task blob, starting empty");
                self.tasks = Vec::new();
                return;
            }
        };

        match serde_json::from_str::<Vec<Value>>(&blob) {
            Ok(raw) => {
                self.tasks = raw.iter().map(Task::from_raw).collect();
                debug!(count = self.tasks.len(), "tasks loaded");
            }
            Err(err) => {
                warn!(error = %Error::DataCorruption(err), "resetting to empty collection");
                self.tasks = Vec::new();
            }
        }
    }

    /// Serialize the full collection into the adapter.
    pub fn persist(&mut self) -> Result<()> {
        let blob = serde_json::to_string(&self.tasks)?;
        if let Err(err) = self.storage.set(TASKS_KEY, &blob) {
            warn!(error = %err, "failed to persist tasks, in-memory state retained");
            return Err(err);
        }
        Ok(())
    }

    /// Pretty-printed (2-space indent) JSON of the full collection, for the
    /// export/download affordance. Read-only.
    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.tasks)?)
    }

    /// Total/active/completed counts.
    pub fn stats(&self) -> Stats {
        let total = self.tasks.len();
        let completed = self.tasks.iter().filter(|t| t.completed).count();
        Stats {
            total,
            active: total - completed,
            completed,
        }
    }

    /// Drop every task and delete the persisted blob (the sign-out path).
    pub fn clear_all(&mut self) -> Result<()> {
        self.tasks.clear();
        self.storage.remove(TASKS_KEY)
    }

    fn max_order(&self) -> f64 {
        // NaN counts as zero here, same as the falsy chain in the legacy data.
        self.tasks.iter().fold(0.0, |max, t| {
            let order = if t.order.is_nan() { 0.0 } else { t.order };
            max.max(order)
        })
    }
}
