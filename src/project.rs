// View projection: pure search/filter/sort over the task collection

use crate::model::Task;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Completion-status filter applied to the projected list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(StatusFilter::All),
            "active" => Ok(StatusFilter::Active),
            "completed" => Ok(StatusFilter::Completed),
            other => Err(format!("unknown status filter: {other:?} (expected all, active, or completed)")),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => write!(f, "all"),
            StatusFilter::Active => write!(f, "active"),
            StatusFilter::Completed => write!(f, "completed"),
        }
    }
}

/// Sort applied after filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Descending by effective order: highest `order` first.
    #[default]
    Newest,
    /// Ascending by effective order.
    Oldest,
    /// Ascending by case-folded text.
    Alpha,
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(SortMode::Newest),
            "oldest" => Ok(SortMode::Oldest),
            "alpha" => Ok(SortMode::Alpha),
            other => Err(format!("unknown sort mode: {other:?} (expected newest, oldest, or alpha)")),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortMode::Newest => write!(f, "newest"),
            SortMode::Oldest => write!(f, "oldest"),
            SortMode::Alpha => write!(f, "alpha"),
        }
    }
}

/// Derive the display list from the collection.
///
/// Pure function of its arguments: the input is never mutated and the
/// returned tasks are clones. Search keeps tasks whose case-folded text
/// contains the case-folded (trimmed) query; an empty query matches all.
/// Sorting is stable, so tasks with equal keys keep their prior relative
/// order. That matters after legacy-data migration, where several tasks
/// can share an effective order.
pub fn project(tasks: &[Task], query: &str, status: StatusFilter, sort: SortMode) -> Vec<Task> {
    let needle = query.trim().to_lowercase();

    let mut out: Vec<Task> = tasks
        .iter()
        .filter(|t| needle.is_empty() || t.text.to_lowercase().contains(&needle))
        .filter(|t| match status {
            StatusFilter::All => true,
            StatusFilter::Active => !t.completed,
            StatusFilter::Completed => t.completed,
        })
        .cloned()
        .collect();

    match sort {
        SortMode::Newest => out.sort_by(|a, b| b.effective_order().total_cmp(&a.effective_order())),
        SortMode::Oldest => out.sort_by(|a, b| a.effective_order().total_cmp(&b.effective_order())),
        SortMode::Alpha => out.sort_by(|a, b| a.text.to_lowercase().cmp(&b.text.to_lowercase())),
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, text: &str, completed: bool, created: i64, order: f64) -> Task {
        Task {
            id: id.to_string(),
            text: text.to_string(),
            completed,
            created,
            order,
        }
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let tasks = vec![
            task("a", "Buy milk", false, 1, 1.0),
            task("b", "Read book", false, 2, 2.0),
        ];

        let out = project(&tasks, "bu", StatusFilter::All, SortMode::Newest);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].text, "Buy milk");
    }

    #[test]
    fn test_empty_query_matches_all() {
        let tasks = vec![
            task("a", "Buy milk", false, 1, 1.0),
            task("b", "Read book", true, 2, 2.0),
        ];

        let out = project(&tasks, "", StatusFilter::All, SortMode::Newest);
        assert_eq!(out.len(), 2);

        // Whitespace-only query trims to empty
        let out = project(&tasks, "   ", StatusFilter::All, SortMode::Newest);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_status_filters() {
        let tasks = vec![
            task("a", "one", false, 1, 1.0),
            task("b", "two", true, 2, 2.0),
            task("c", "three", false, 3, 3.0),
        ];

        let active = project(&tasks, "", StatusFilter::Active, SortMode::Oldest);
        assert_eq!(active.iter().map(|t| t.id.as_str()).collect::<Vec<_>>(), ["a", "c"]);

        let completed = project(&tasks, "", StatusFilter::Completed, SortMode::Oldest);
        assert_eq!(completed.iter().map(|t| t.id.as_str()).collect::<Vec<_>>(), ["b"]);

        let all = project(&tasks, "", StatusFilter::All, SortMode::Oldest);
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_sort_newest_descends_by_order() {
        let tasks = vec![
            task("a", "one", false, 1, 1.0),
            task("c", "three", false, 3, 3.0),
            task("b", "two", false, 2, 2.0),
        ];

        let out = project(&tasks, "", StatusFilter::All, SortMode::Newest);
        let orders: Vec<f64> = out.iter().map(Task::effective_order).collect();
        assert!(orders.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(out.iter().map(|t| t.id.as_str()).collect::<Vec<_>>(), ["c", "b", "a"]);
    }

    #[test]
    fn test_sort_oldest_ascends_by_order() {
        let tasks = vec![
            task("b", "two", false, 2, 2.0),
            task("a", "one", false, 1, 1.0),
            task("c", "three", false, 3, 3.0),
        ];

        let out = project(&tasks, "", StatusFilter::All, SortMode::Oldest);
        assert_eq!(out.iter().map(|t| t.id.as_str()).collect::<Vec<_>>(), ["a", "b", "c"]);
    }

    #[test]
    fn test_sort_uses_created_fallback_for_zero_order() {
        // Legacy records can carry order 0; they sort by created instead.
        let tasks = vec![
            task("legacy", "old", false, 5000, 0.0),
            task("new", "new", false, 1, 10.0),
        ];

        let out = project(&tasks, "", StatusFilter::All, SortMode::Newest);
        assert_eq!(out[0].id, "legacy");
    }

    #[test]
    fn test_sort_alpha_is_case_folded() {
        let tasks = vec![
            task("b", "banana", false, 1, 1.0),
            task("a", "Apple", false, 2, 2.0),
            task("c", "cherry", false, 3, 3.0),
        ];

        let out = project(&tasks, "", StatusFilter::All, SortMode::Alpha);
        let texts: Vec<&str> = out.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["Apple", "banana", "cherry"]);
    }

    #[test]
    fn test_sort_is_stable_on_equal_keys() {
        let tasks = vec![
            task("first", "x", false, 100, 7.0),
            task("second", "y", false, 200, 7.0),
            task("third", "z", false, 300, 7.0),
        ];

        let out = project(&tasks, "", StatusFilter::All, SortMode::Oldest);
        assert_eq!(
            out.iter().map(|t| t.id.as_str()).collect::<Vec<_>>(),
            ["first", "second", "third"]
        );
    }

    #[test]
    fn test_input_is_not_mutated() {
        let tasks = vec![
            task("b", "two", false, 2, 2.0),
            task("a", "one", false, 1, 1.0),
        ];
        let snapshot = tasks.clone();

        let _ = project(&tasks, "one", StatusFilter::All, SortMode::Alpha);
        assert_eq!(tasks, snapshot);
    }

    #[test]
    fn test_mode_string_forms() {
        assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!("active".parse::<StatusFilter>().unwrap(), StatusFilter::Active);
        assert_eq!("completed".parse::<StatusFilter>().unwrap(), StatusFilter::Completed);
        assert!("done".parse::<StatusFilter>().is_err());

        assert_eq!("newest".parse::<SortMode>().unwrap(), SortMode::Newest);
        assert_eq!("oldest".parse::<SortMode>().unwrap(), SortMode::Oldest);
        assert_eq!("alpha".parse::<SortMode>().unwrap(), SortMode::Alpha);
        assert!("za".parse::<SortMode>().is_err());

        assert_eq!(StatusFilter::Active.to_string(), "active");
        assert_eq!(SortMode::Alpha.to_string(), "alpha");
    }
}
