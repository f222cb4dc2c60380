//! Task completion with a delayed removal and a single-slot undo window.
//!
//! Completing a task goes through three timed steps:
//!
//! 1. `toggle_task` marks the task as completing. It stays in the list so the
//!    user sees the check.
//! 2. After `completing_delay` the task leaves the list and lands in the undo
//!    slot. Only one task fits there; a newer completion replaces the older one
//!    and the older one is gone for good.
//! 3. After `undo_window` the slot is cleared. `undo` before that puts the
//!    task back at the end of the list.

use crate::domain::{SubTask, SubTaskId, Task, TaskId, TaskPhase};
use crate::scheduler::{Clock, Scheduler, TimerHandle};
use crate::store::{TaskError, TaskStore};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Delays driving the completion flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Completing → removed (visual feedback before the row disappears)
    pub completing_delay: Duration,
    /// How long a removed task can still be restored
    pub undo_window: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            completing_delay: Duration::from_millis(500),
            undo_window: Duration::from_millis(3000),
        }
    }
}

/// What a state change touched. Sent once per mutating call, never for no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Change {
    /// The active list or a task in it changed
    pub tasks: bool,
    /// The undo slot was filled, replaced or cleared
    pub undo: bool,
}

impl Change {
    const TASKS: Self = Self { tasks: true, undo: false };
    const UNDO: Self = Self { tasks: false, undo: true };
    const BOTH: Self = Self { tasks: true, undo: true };
}

type Listener = Box<dyn FnMut(Change)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerEvent {
    FinishCompleting(TaskId),
    ExpireUndo(TaskId),
}

/// Removed task waiting out its undo window
#[derive(Debug)]
struct UndoSlot {
    task: Task,
    expiry: TimerHandle,
}

/// Owns the task store and runs the complete/undo state machine
pub struct Controller {
    store: TaskStore,
    scheduler: Scheduler<TimerEvent>,
    timing: Timing,
    /// Tasks in the Completing phase and their removal timers
    completing: HashMap<TaskId, TimerHandle>,
    undo_slot: Option<UndoSlot>,
    listeners: Vec<Listener>,
}

impl Controller {
    pub fn new(store: TaskStore, timing: Timing, clock: Box<dyn Clock>) -> Self {
        Self {
            store,
            scheduler: Scheduler::new(clock),
            timing,
            completing: HashMap::new(),
            undo_slot: None,
            listeners: Vec::new(),
        }
    }

    /// Register a callback invoked synchronously after every state change
    pub fn subscribe(&mut self, listener: impl FnMut(Change) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn notify(&mut self, change: Change) {
        for listener in &mut self.listeners {
            listener(change);
        }
    }

    /// Active tasks in insertion order (Completing tasks included)
    pub fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.store.get(id)
    }

    /// Phase of a task still in the active list
    pub fn phase(&self, id: TaskId) -> Option<TaskPhase> {
        if !self.store.contains(id) {
            return None;
        }
        if self.completing.contains_key(&id) {
            Some(TaskPhase::Completing)
        } else {
            Some(TaskPhase::Active)
        }
    }

    /// Task sitting in the undo slot, if any
    pub fn pending_undo(&self) -> Option<&Task> {
        self.undo_slot.as_ref().map(|slot| &slot.task)
    }

    /// Time left to undo the pending task
    pub fn undo_remaining(&self) -> Option<Duration> {
        let slot = self.undo_slot.as_ref()?;
        self.scheduler.remaining(slot.expiry)
    }

    /// Create a task with the default tag
    pub fn add_task(&mut self, title: &str, description: &str, category: &str) -> Option<Task> {
        self.add_task_tagged(title, description, category, None)
    }

    /// Create a task; a missing or blank tag falls back to the default tag
    pub fn add_task_tagged(
        &mut self,
        title: &str,
        description: &str,
        category: &str,
        tag: Option<&str>,
    ) -> Option<Task> {
        match self.store.add_task(title, description, category, tag) {
            Ok(task) => {
                self.notify(Change::TASKS);
                Some(task)
            }
            Err(err) => {
                rejected("add_task", &err);
                None
            }
        }
    }

    /// Start completing an active task. Ignored for unknown ids and for tasks
    /// already completing.
    pub fn toggle_task(&mut self, id: TaskId) {
        let Some(task) = self.store.get(id) else {
            rejected("toggle_task", &TaskError::TaskNotFound(id));
            return;
        };
        if task.completed || self.completing.contains_key(&id) {
            debug!(%id, "toggle ignored, task already completing");
            return;
        }

        let timer = self
            .scheduler
            .schedule(self.timing.completing_delay, TimerEvent::FinishCompleting(id));
        self.completing.insert(id, timer);
        debug!(%id, "task completing");
        self.notify(Change::TASKS);
    }

    /// Restore the task in the undo slot. No-op when the slot is empty.
    pub fn undo(&mut self) {
        let Some(slot) = self.undo_slot.take() else {
            debug!("undo ignored, nothing to restore");
            return;
        };
        self.scheduler.cancel(slot.expiry);

        let mut task = slot.task;
        task.completed = false;
        debug!(id = %task.id, "undo");
        self.store.restore(task);
        self.notify(Change::BOTH);
    }

    pub fn edit_title(&mut self, id: TaskId, title: &str) {
        match self.store.edit_title(id, title) {
            Ok(()) => self.notify(Change::TASKS),
            Err(err) => rejected("edit_title", &err),
        }
    }

    pub fn edit_description(&mut self, id: TaskId, description: &str) {
        match self.store.edit_description(id, description) {
            Ok(()) => self.notify(Change::TASKS),
            Err(err) => rejected("edit_description", &err),
        }
    }

    pub fn add_subtask(&mut self, task_id: TaskId, title: &str) -> Option<SubTask> {
        match self.store.add_subtask(task_id, title) {
            Ok(subtask) => {
                self.notify(Change::TASKS);
                Some(subtask)
            }
            Err(err) => {
                rejected("add_subtask", &err);
                None
            }
        }
    }

    pub fn toggle_subtask(&mut self, task_id: TaskId, subtask_id: SubTaskId) {
        match self.store.toggle_subtask(task_id, subtask_id) {
            Ok(_) => self.notify(Change::TASKS),
            Err(err) => rejected("toggle_subtask", &err),
        }
    }

    /// Fire every due timer. Call this from the event loop tick.
    pub fn advance(&mut self) {
        for event in self.scheduler.pop_due() {
            match event {
                TimerEvent::FinishCompleting(id) => self.finish_completing(id),
                TimerEvent::ExpireUndo(id) => self.expire_undo(id),
            }
        }
    }

    fn finish_completing(&mut self, id: TaskId) {
        self.completing.remove(&id);
        let Some(mut task) = self.store.remove_task(id) else {
            return;
        };
        task.completed = true;

        if let Some(previous) = self.undo_slot.take() {
            // Single slot: the earlier task can no longer be restored
            self.scheduler.cancel(previous.expiry);
            debug!(id = %previous.task.id, "undo slot overwritten");
        }

        let expiry = self
            .scheduler
            .schedule(self.timing.undo_window, TimerEvent::ExpireUndo(id));
        self.undo_slot = Some(UndoSlot { task, expiry });
        debug!(%id, "task removed, undo window open");
        self.notify(Change::BOTH);
    }

    fn expire_undo(&mut self, id: TaskId) {
        if !matches!(&self.undo_slot, Some(slot) if slot.task.id == id) {
            return;
        }
        self.undo_slot = None;
        debug!(%id, "undo window expired");
        self.notify(Change::UNDO);
    }
}

fn rejected(op: &str, err: &TaskError) {
    debug!(op, %err, "ignored");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::testing::ManualClock;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    const DELAY: Duration = Duration::from_millis(500);
    const WINDOW: Duration = Duration::from_millis(3000);

    fn create_controller() -> (Controller, ManualClock) {
        let clock = ManualClock::new();
        let controller = Controller::new(
            TaskStore::new("Inbox"),
            Timing::default(),
            Box::new(clock.clone()),
        );
        (controller, clock)
    }

    fn step(controller: &mut Controller, clock: &ManualClock, by: Duration) {
        clock.advance(by);
        controller.advance();
    }

    fn ids(controller: &Controller) -> Vec<TaskId> {
        controller.tasks().iter().map(|t| t.id).collect()
    }

    fn record_changes(controller: &mut Controller) -> Rc<RefCell<Vec<Change>>> {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&changes);
        controller.subscribe(move |change| sink.borrow_mut().push(change));
        changes
    }

    #[test]
    fn test_add_task() {
        let (mut ctl, _) = create_controller();

        let task = ctl.add_task("Work", "Trabajar", "Today").unwrap();

        assert_eq!(ctl.tasks().len(), 1);
        assert!(!task.completed);
        assert!(task.subtasks.is_empty());
        assert_eq!(task.tag, "Inbox");
        assert_eq!(ctl.phase(task.id), Some(TaskPhase::Active));
    }

    #[test]
    fn test_add_blank_title_is_noop() {
        let (mut ctl, _) = create_controller();
        let changes = record_changes(&mut ctl);

        assert!(ctl.add_task("", "", "Today").is_none());
        assert!(ctl.add_task("   ", "", "Today").is_none());

        assert!(ctl.tasks().is_empty());
        assert!(changes.borrow().is_empty());
    }

    #[test]
    fn test_toggle_marks_completing_then_removes() {
        let (mut ctl, clock) = create_controller();
        let task = ctl.add_task("Work", "", "Today").unwrap();

        ctl.toggle_task(task.id);
        assert_eq!(ctl.phase(task.id), Some(TaskPhase::Completing));
        assert!(ctl.pending_undo().is_none());

        step(&mut ctl, &clock, DELAY - Duration::from_millis(1));
        assert_eq!(ctl.phase(task.id), Some(TaskPhase::Completing));

        step(&mut ctl, &clock, Duration::from_millis(1));
        assert!(ctl.tasks().is_empty());
        assert_eq!(ctl.phase(task.id), None);
        let pending = ctl.pending_undo().unwrap();
        assert_eq!(pending.id, task.id);
        assert!(pending.completed);
        assert_eq!(ctl.undo_remaining(), Some(WINDOW));
    }

    #[test]
    fn test_undo_restores_task() {
        let (mut ctl, clock) = create_controller();
        let task = ctl.add_task("Work", "Trabajar", "Today").unwrap();
        ctl.add_subtask(task.id, "Draft").unwrap();
        let before = ctl.get(task.id).unwrap().clone();

        ctl.toggle_task(task.id);
        step(&mut ctl, &clock, DELAY);
        step(&mut ctl, &clock, WINDOW - Duration::from_millis(1));
        ctl.undo();

        assert_eq!(ctl.tasks(), &[before]);
        assert!(ctl.pending_undo().is_none());
        assert_eq!(ctl.phase(task.id), Some(TaskPhase::Active));

        // The cancelled expiry must not fire later
        step(&mut ctl, &clock, WINDOW);
        assert_eq!(ctl.tasks().len(), 1);
    }

    #[test]
    fn test_expiry_is_permanent() {
        let (mut ctl, clock) = create_controller();
        let task = ctl.add_task("Work", "", "Today").unwrap();

        ctl.toggle_task(task.id);
        step(&mut ctl, &clock, DELAY);
        step(&mut ctl, &clock, WINDOW);

        assert!(ctl.tasks().is_empty());
        assert!(ctl.pending_undo().is_none());
        assert_eq!(ctl.undo_remaining(), None);

        ctl.undo();
        assert!(ctl.tasks().is_empty());
    }

    #[test]
    fn test_undo_before_removal_is_noop() {
        let (mut ctl, clock) = create_controller();
        let task = ctl.add_task("Work", "", "Today").unwrap();

        ctl.toggle_task(task.id);
        ctl.undo();
        assert_eq!(ctl.phase(task.id), Some(TaskPhase::Completing));

        step(&mut ctl, &clock, DELAY);
        assert!(ctl.tasks().is_empty());
        assert!(ctl.pending_undo().is_some());
    }

    #[test]
    fn test_second_completion_overwrites_undo_slot() {
        let (mut ctl, clock) = create_controller();
        let a = ctl.add_task("A", "", "Today").unwrap();
        let b = ctl.add_task("B", "", "Today").unwrap();

        ctl.toggle_task(a.id);
        step(&mut ctl, &clock, DELAY);
        step(&mut ctl, &clock, Duration::from_millis(1000));

        ctl.toggle_task(b.id);
        step(&mut ctl, &clock, DELAY);
        assert_eq!(ctl.pending_undo().map(|t| t.id), Some(b.id));

        ctl.undo();
        assert_eq!(ids(&ctl), vec![b.id]);

        // A is gone; nothing left to restore
        ctl.undo();
        assert_eq!(ids(&ctl), vec![b.id]);
    }

    #[test]
    fn test_overwritten_slot_keeps_full_window() {
        let (mut ctl, clock) = create_controller();
        let a = ctl.add_task("A", "", "Today").unwrap();
        let b = ctl.add_task("B", "", "Today").unwrap();

        ctl.toggle_task(a.id);
        step(&mut ctl, &clock, DELAY);
        step(&mut ctl, &clock, Duration::from_millis(2000));
        ctl.toggle_task(b.id);
        step(&mut ctl, &clock, DELAY);

        // A's expiry would have fired here; B must still be restorable
        step(&mut ctl, &clock, Duration::from_millis(1000));
        assert_eq!(ctl.pending_undo().map(|t| t.id), Some(b.id));

        step(&mut ctl, &clock, Duration::from_millis(2000));
        assert!(ctl.pending_undo().is_none());
    }

    #[test]
    fn test_double_toggle_is_noop() {
        let (mut ctl, clock) = create_controller();
        let task = ctl.add_task("Work", "", "Today").unwrap();
        let changes = record_changes(&mut ctl);

        ctl.toggle_task(task.id);
        step(&mut ctl, &clock, Duration::from_millis(300));
        ctl.toggle_task(task.id);
        step(&mut ctl, &clock, Duration::from_millis(200));

        assert!(ctl.tasks().is_empty());
        assert_eq!(changes.borrow().len(), 2);
    }

    #[test]
    fn test_toggle_unknown_or_buffered_is_noop() {
        let (mut ctl, clock) = create_controller();
        let task = ctl.add_task("Work", "", "Today").unwrap();
        ctl.toggle_task(task.id);
        step(&mut ctl, &clock, DELAY);

        ctl.toggle_task(task.id);
        ctl.toggle_task(TaskId::new());

        step(&mut ctl, &clock, DELAY);
        assert_eq!(ctl.pending_undo().map(|t| t.id), Some(task.id));
    }

    #[test]
    fn test_concurrent_completions_last_wins() {
        let (mut ctl, clock) = create_controller();
        let a = ctl.add_task("A", "", "Today").unwrap();
        let b = ctl.add_task("B", "", "Today").unwrap();

        ctl.toggle_task(a.id);
        step(&mut ctl, &clock, Duration::from_millis(100));
        ctl.toggle_task(b.id);
        step(&mut ctl, &clock, DELAY);

        assert!(ctl.tasks().is_empty());
        assert_eq!(ctl.pending_undo().map(|t| t.id), Some(b.id));
    }

    #[test]
    fn test_scenario_work_and_surf() {
        let (mut ctl, clock) = create_controller();
        let work = ctl.add_task("Work", "", "Today").unwrap();
        let surf = ctl.add_task("Surf", "", "Today").unwrap();

        ctl.toggle_task(work.id);
        step(&mut ctl, &clock, DELAY);
        assert_eq!(ids(&ctl), vec![surf.id]);
        assert_eq!(ctl.pending_undo().map(|t| t.id), Some(work.id));

        ctl.undo();
        assert_eq!(ids(&ctl), vec![surf.id, work.id]);
        assert!(ctl.pending_undo().is_none());
    }

    #[test]
    fn test_edits_during_completing_apply() {
        let (mut ctl, _) = create_controller();
        let task = ctl.add_task("Work", "", "Today").unwrap();

        ctl.toggle_task(task.id);
        ctl.edit_title(task.id, "Deep work");
        ctl.edit_description(task.id, "Focus");

        let task = ctl.get(task.id).unwrap();
        assert_eq!(task.title, "Deep work");
        assert_eq!(task.description, "Focus");
    }

    #[test]
    fn test_edits_on_buffered_task_are_noop() {
        let (mut ctl, clock) = create_controller();
        let task = ctl.add_task("Work", "", "Today").unwrap();
        ctl.toggle_task(task.id);
        step(&mut ctl, &clock, DELAY);

        ctl.edit_title(task.id, "Changed");
        assert!(ctl.add_subtask(task.id, "Draft").is_none());

        ctl.undo();
        assert_eq!(ctl.get(task.id).unwrap().title, "Work");
        assert!(ctl.get(task.id).unwrap().subtasks.is_empty());
    }

    #[test]
    fn test_subtasks_do_not_roll_up() {
        let (mut ctl, _) = create_controller();
        let task = ctl.add_task("Work", "", "Today").unwrap();
        let st = ctl.add_subtask(task.id, "Draft").unwrap();

        ctl.toggle_subtask(task.id, st.id);

        let task = ctl.get(task.id).unwrap();
        assert!(task.subtasks[0].completed);
        assert!(!task.completed);
        assert_eq!(ctl.phase(task.id), Some(TaskPhase::Active));
    }

    #[test]
    fn test_one_notification_per_call() {
        let (mut ctl, clock) = create_controller();
        let changes = record_changes(&mut ctl);

        let task = ctl.add_task("Work", "", "Today").unwrap();
        ctl.edit_title(task.id, "  ");
        ctl.toggle_subtask(task.id, SubTaskId::from(7));
        ctl.toggle_task(task.id);
        step(&mut ctl, &clock, DELAY);
        ctl.undo();
        ctl.undo();

        assert_eq!(
            *changes.borrow(),
            vec![Change::TASKS, Change::TASKS, Change::BOTH, Change::BOTH]
        );
    }

    #[test]
    fn test_expiry_notifies_undo_only() {
        let (mut ctl, clock) = create_controller();
        let task = ctl.add_task("Work", "", "Today").unwrap();
        ctl.toggle_task(task.id);
        step(&mut ctl, &clock, DELAY);

        let changes = record_changes(&mut ctl);
        step(&mut ctl, &clock, WINDOW);

        assert_eq!(*changes.borrow(), vec![Change::UNDO]);
    }
}
