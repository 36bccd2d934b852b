// Taskly - task list core: store, view projection, reordering, blob persistence

pub mod error;
pub mod model;
pub mod project;
pub mod reorder;
pub mod storage;
pub mod store;
pub mod theme;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use model::{Task, generate_id, now_ms};
pub use project::{SortMode, StatusFilter, project};
pub use storage::{BlobStorage, FileStorage, MemoryStorage};
pub use store::{Stats, TASKS_KEY, TaskStore};
pub use theme::{THEME_KEY, Theme, load_theme, save_theme, toggle_theme};
