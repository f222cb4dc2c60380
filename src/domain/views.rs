use super::enums::TaskPhase;
use super::task::Task;
use chrono::{DateTime, Local};

/// A flattened row for rendering the task list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatRow {
    /// Depth in the tree (0 = task, 1 = sub-task)
    pub depth: usize,
    /// Whether this is the last sub-task of its parent
    pub is_last: bool,
    /// Index into the active task slice
    pub task_index: usize,
    /// Sub-task index (None for task rows)
    pub subtask_index: Option<usize>,
}

/// Flatten tasks and their sub-tasks into a linear list for rendering
pub fn flatten_tasks(tasks: &[Task]) -> Vec<FlatRow> {
    let mut rows = Vec::new();

    for (task_idx, task) in tasks.iter().enumerate() {
        rows.push(FlatRow {
            depth: 0,
            is_last: false,
            task_index: task_idx,
            subtask_index: None,
        });

        let subtask_count = task.subtasks.len();
        for st_idx in 0..subtask_count {
            rows.push(FlatRow {
                depth: 1,
                is_last: st_idx + 1 == subtask_count,
                task_index: task_idx,
                subtask_index: Some(st_idx),
            });
        }
    }

    rows
}

/// Checkbox glyph for a task row
pub fn checkbox(phase: TaskPhase) -> &'static str {
    match phase {
        TaskPhase::Active => "○",
        TaskPhase::Completing => "◉",
    }
}

/// Checkbox glyph for a sub-task row
pub fn subtask_checkbox(completed: bool) -> &'static str {
    if completed {
        "[x]"
    } else {
        "[ ]"
    }
}

/// Get tree connector for sub-tasks
pub fn tree_connector(is_last: bool) -> &'static str {
    if is_last {
        "└─"
    } else {
        "├─"
    }
}

/// Header date, e.g. "17 Oct • Saturday"
pub fn header_date(now: DateTime<Local>) -> String {
    now.format("%-d %b • %A").to_string()
}
