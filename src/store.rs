use crate::domain::{SubTask, SubTaskId, Task, TaskId};
use thiserror::Error;
use tracing::debug;

/// Why a store operation was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    #[error("title is empty")]
    EmptyTitle,
    #[error("task {0} not found")]
    TaskNotFound(TaskId),
    #[error("sub-task {1} not found in task {0}")]
    SubTaskNotFound(TaskId, SubTaskId),
}

/// Ordered collection of active tasks
#[derive(Debug, Clone)]
pub struct TaskStore {
    tasks: Vec<Task>,
    default_tag: String,
}

impl TaskStore {
    pub fn new(default_tag: impl Into<String>) -> Self {
        Self {
            tasks: Vec::new(),
            default_tag: default_tag.into(),
        }
    }

    /// Active tasks in insertion order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.get(id).is_some()
    }

    fn get_mut(&mut self, id: TaskId) -> Result<&mut Task, TaskError> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TaskError::TaskNotFound(id))
    }

    /// Append a new task. A blank `tag` falls back to the store's default tag.
    pub fn add_task(
        &mut self,
        title: &str,
        description: &str,
        category: &str,
        tag: Option<&str>,
    ) -> Result<Task, TaskError> {
        let title = non_empty(title)?;
        let tag = tag
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(&self.default_tag)
            .to_string();

        let task = Task::new(title, description.to_string(), category.trim().to_string(), tag);
        debug!(id = %task.id, title = %task.title, "task added");
        self.tasks.push(task.clone());
        Ok(task)
    }

    /// Remove and return the task, if it is still here
    pub fn remove_task(&mut self, id: TaskId) -> Option<Task> {
        let index = self.tasks.iter().position(|t| t.id == id)?;
        debug!(%id, "task removed");
        Some(self.tasks.remove(index))
    }

    /// Put a previously removed task back at the end of the list
    pub fn restore(&mut self, task: Task) {
        if self.contains(task.id) {
            debug!(id = %task.id, "restore skipped, id already present");
            return;
        }
        debug!(id = %task.id, "task restored");
        self.tasks.push(task);
    }

    pub fn edit_title(&mut self, id: TaskId, title: &str) -> Result<(), TaskError> {
        let title = non_empty(title)?;
        self.get_mut(id)?.title = title;
        Ok(())
    }

    pub fn edit_description(&mut self, id: TaskId, description: &str) -> Result<(), TaskError> {
        self.get_mut(id)?.description = description.to_string();
        Ok(())
    }

    pub fn add_subtask(&mut self, task_id: TaskId, title: &str) -> Result<SubTask, TaskError> {
        let title = non_empty(title)?;
        let subtask = self.get_mut(task_id)?.add_subtask(title);
        debug!(task = %task_id, subtask = %subtask.id, "sub-task added");
        Ok(subtask)
    }

    /// Flip a sub-task's completed flag and return the new value.
    /// The parent task is left untouched.
    pub fn toggle_subtask(&mut self, task_id: TaskId, subtask_id: SubTaskId) -> Result<bool, TaskError> {
        let subtask = self
            .get_mut(task_id)?
            .subtask_mut(subtask_id)
            .ok_or(TaskError::SubTaskNotFound(task_id, subtask_id))?;
        subtask.toggle();
        Ok(subtask.completed)
    }
}

fn non_empty(title: &str) -> Result<String, TaskError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(TaskError::EmptyTitle);
    }
    Ok(trimmed.to_string())
}
