pub mod enums;
pub mod metrics;
pub mod task;
pub mod views;

pub use enums::{FormField, Screen, TaskPhase, UiMode};
pub use task::{SubTask, SubTaskId, Task, TaskId};
pub use views::{checkbox, flatten_tasks, header_date, subtask_checkbox, tree_connector};
