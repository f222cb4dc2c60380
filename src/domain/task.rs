use chrono::{DateTime, Local};
use std::fmt;
use uuid::Uuid;

/// Stable identifier of a task, assigned once at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(Uuid);

impl TaskId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Short form is enough for log lines
        let full = self.0.simple().to_string();
        write!(f, "{}", &full[..8])
    }
}

/// Identifier of a sub-task, unique within its parent task only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubTaskId(u32);

impl From<u32> for SubTaskId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for SubTaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A nested checklist entry belonging to exactly one task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubTask {
    pub id: SubTaskId,
    pub title: String,
    pub completed: bool,
}

impl SubTask {
    /// Flip the completed flag
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }
}

/// A to-do item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Unique ID, never reused
    pub id: TaskId,
    /// Non-empty title
    pub title: String,
    /// Free text, may be empty
    pub description: String,
    /// True only while the task sits in the undo slot
    pub completed: bool,
    /// Category chip selected at creation ("Today", "Upcoming", ...)
    pub category: String,
    /// Free-form label ("Inbox" when none was given)
    pub tag: String,
    /// Ordered checklist
    pub subtasks: Vec<SubTask>,
    /// When the task was created
    pub created_at: DateTime<Local>,
    /// Next sub-task id to hand out; ids stay unique even after removals
    next_subtask_id: u32,
}

impl Task {
    pub fn new(title: String, description: String, category: String, tag: String) -> Self {
        Self {
            id: TaskId::new(),
            title,
            description,
            completed: false,
            category,
            tag,
            subtasks: Vec::new(),
            created_at: Local::now(),
            next_subtask_id: 1,
        }
    }

    /// Append a sub-task and return a copy of it
    pub fn add_subtask(&mut self, title: String) -> SubTask {
        let subtask = SubTask {
            id: SubTaskId(self.next_subtask_id),
            title,
            completed: false,
        };
        self.next_subtask_id += 1;
        self.subtasks.push(subtask.clone());
        subtask
    }

    pub fn subtask_mut(&mut self, id: SubTaskId) -> Option<&mut SubTask> {
        self.subtasks.iter_mut().find(|st| st.id == id)
    }

    /// Number of completed sub-tasks and the total, for the "2/3" badge
    pub fn subtask_progress(&self) -> (usize, usize) {
        let done = self.subtasks.iter().filter(|st| st.completed).count();
        (done, self.subtasks.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn task(title: &str) -> Task {
        Task::new(title.to_string(), String::new(), "Today".to_string(), "Inbox".to_string())
    }

    #[test]
    fn test_task_new() {
        let task = task("Work");
        assert_eq!(task.title, "Work");
        assert!(!task.completed);
        assert!(task.subtasks.is_empty());
        assert_eq!(task.tag, "Inbox");
    }

    #[test]
    fn test_task_ids_are_unique() {
        assert_ne!(task("a").id, task("b").id);
    }

    #[test]
    fn test_subtask_ids_increase_within_parent() {
        let mut task = task("Work");
        let first = task.add_subtask("Draft".to_string());
        let second = task.add_subtask("Review".to_string());

        assert_ne!(first.id, second.id);
        assert_eq!(task.subtasks.len(), 2);
        assert_eq!(task.subtasks[1].title, "Review");
    }

    #[test]
    fn test_subtask_toggle_does_not_touch_parent() {
        let mut task = task("Work");
        let st = task.add_subtask("Draft".to_string());

        if let Some(subtask) = task.subtask_mut(st.id) {
            subtask.toggle();
        }

        assert!(task.subtasks[0].completed);
        assert!(!task.completed);
        assert_eq!(task.subtask_progress(), (1, 1));
    }
}
