// Reorder engine: splice the moved task, then renumber the whole collection

use crate::model::Task;
use tracing::debug;

/// Move the task `from_id` immediately before `to_id`'s position, then
/// reassign every task's `order` from its new storage position.
///
/// Returns false without touching the list when either id is absent or the
/// ids are equal. On success the whole collection is renumbered, not just
/// the affected range; unrelated tasks' stored `order` values change too.
pub fn reorder(tasks: &mut Vec<Task>, from_id: &str, to_id: &str) -> bool {
    if from_id == to_id {
        return false;
    }
    let Some(from_idx) = tasks.iter().position(|t| t.id == from_id) else {
        return false;
    };
    let Some(mut to_idx) = tasks.iter().position(|t| t.id == to_id) else {
        return false;
    };

    let moved = tasks.remove(from_idx);
    // The target shifts left once the source above it is spliced out.
    if from_idx < to_idx {
        to_idx -= 1;
    }
    tasks.insert(to_idx, moved);

    assign_descending(tasks);
    debug!(from_id, to_id, "collection reordered");
    true
}

/// Recompute every `order` from storage position: N at the top, 1 at the
/// bottom. The projector's "newest" sort relies on this descending
/// convention, so the first stored task displays first.
pub fn assign_descending(tasks: &mut [Task]) {
    let n = tasks.len();
    for (idx, task) in tasks.iter_mut().enumerate() {
        task.order = (n - idx) as f64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, order: f64) -> Task {
        Task {
            id: id.to_string(),
            text: id.to_string(),
            completed: false,
            created: 1000,
            order,
        }
    }

    fn ids(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.id.as_str()).collect()
    }

    fn orders(tasks: &[Task]) -> Vec<f64> {
        tasks.iter().map(|t| t.order).collect()
    }

    #[test]
    fn test_move_last_before_first() {
        let mut tasks = vec![task("a", 3.0), task("b", 2.0), task("c", 1.0)];

        assert!(reorder(&mut tasks, "c", "a"));
        assert_eq!(ids(&tasks), ["c", "a", "b"]);
        assert_eq!(orders(&tasks), [3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_move_first_before_last() {
        let mut tasks = vec![task("a", 3.0), task("b", 2.0), task("c", 1.0)];

        assert!(reorder(&mut tasks, "a", "c"));
        assert_eq!(ids(&tasks), ["b", "a", "c"]);
        assert_eq!(orders(&tasks), [3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_reorder_is_idempotent() {
        let mut tasks = vec![task("a", 3.0), task("b", 2.0), task("c", 1.0)];

        assert!(reorder(&mut tasks, "c", "a"));
        assert_eq!(ids(&tasks), ["c", "a", "b"]);

        // Repeating the same drop must not shuffle anything further
        assert!(reorder(&mut tasks, "c", "a"));
        assert_eq!(ids(&tasks), ["c", "a", "b"]);
        assert_eq!(orders(&tasks), [3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_unknown_id_is_noop() {
        let mut tasks = vec![task("a", 2.0), task("b", 1.0)];
        let snapshot = tasks.clone();

        assert!(!reorder(&mut tasks, "a", "missing"));
        assert!(!reorder(&mut tasks, "missing", "b"));
        assert_eq!(tasks, snapshot);
    }

    #[test]
    fn test_equal_ids_is_noop() {
        let mut tasks = vec![task("a", 2.0), task("b", 1.0)];
        let snapshot = tasks.clone();

        assert!(!reorder(&mut tasks, "a", "a"));
        assert_eq!(tasks, snapshot);
    }

    #[test]
    fn test_single_element_is_noop() {
        let mut tasks = vec![task("only", 1.0)];

        assert!(!reorder(&mut tasks, "only", "only"));
        assert_eq!(tasks[0].order, 1.0);
    }

    #[test]
    fn test_assign_descending() {
        let mut tasks = vec![task("a", 9.0), task("b", 9.0), task("c", 9.0), task("d", 9.0)];
        assign_descending(&mut tasks);
        assert_eq!(orders(&tasks), [4.0, 3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_assign_descending_empty() {
        let mut tasks: Vec<Task> = Vec::new();
        assign_descending(&mut tasks);
        assert!(tasks.is_empty());
    }

    #[test]
    fn test_move_middle() {
        let mut tasks = vec![task("a", 4.0), task("b", 3.0), task("c", 2.0), task("d", 1.0)];

        assert!(reorder(&mut tasks, "b", "d"));
        assert_eq!(ids(&tasks), ["a", "c", "b", "d"]);
        assert_eq!(orders(&tasks), [4.0, 3.0, 2.0, 1.0]);
    }
}
