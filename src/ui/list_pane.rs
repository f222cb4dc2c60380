use crate::app::AppState;
use crate::controller::Controller;
use crate::domain::{
    checkbox, flatten_tasks, header_date, subtask_checkbox, tree_connector, SubTask, Task, TaskPhase,
};
use crate::ui::styles::{
    border_style, completing_style, default_style, done_style, hint_style, selected_style, tag_style,
    title_style, tree_style,
};
use chrono::{DateTime, Local};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Render the "Today" heading with the date underneath
pub fn render_header(f: &mut Frame, now: DateTime<Local>, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(" Today", title_style())),
        Line::from(Span::styled(format!(" {}", header_date(now)), hint_style())),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

/// Render the task list with nested sub-tasks
pub fn render_list_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style());

    let tasks = app.controller.tasks();
    if tasks.is_empty() {
        let empty = Paragraph::new(Line::styled(" Nothing left for today. Press a to add a task.", hint_style()))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = flatten_tasks(tasks)
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let task = &tasks[row.task_index];
            let line = match row.subtask_index {
                Some(st_idx) => create_subtask_line(&task.subtasks[st_idx], row.is_last),
                None => create_task_line(task, phase_of(&app.controller, task)),
            };
            let style = if idx == app.selected_index && !app.ui_mode.is_form() {
                selected_style()
            } else {
                default_style()
            };
            ListItem::new(line).style(style)
        })
        .collect();

    // The state scrolls the list so the selected row stays in view
    let mut state = ListState::default();
    state.select(Some(app.selected_index));
    f.render_stateful_widget(List::new(items).block(block), area, &mut state);
}

fn phase_of(controller: &Controller, task: &Task) -> TaskPhase {
    controller.phase(task.id).unwrap_or(TaskPhase::Active)
}

/// Create a single line for a task
/// Format: ○ Work [Home] 1/2 · Trabajar
pub fn create_task_line(task: &Task, phase: TaskPhase) -> Line<'static> {
    let title_style = match phase {
        TaskPhase::Completing => completing_style(),
        TaskPhase::Active => default_style(),
    };

    let mut spans = vec![
        Span::raw(format!(" {} ", checkbox(phase))),
        Span::styled(task.title.clone(), title_style),
        Span::raw(" "),
        Span::styled(format!("[{}]", task.tag), tag_style()),
    ];

    if !task.subtasks.is_empty() {
        let (done, total) = task.subtask_progress();
        spans.push(Span::styled(format!(" {}/{}", done, total), hint_style()));
    }

    if !task.description.is_empty() {
        spans.push(Span::styled(format!(" · {}", task.description), hint_style()));
    }

    Line::from(spans)
}

/// Create a nested line for a sub-task
pub fn create_subtask_line(subtask: &SubTask, is_last: bool) -> Line<'static> {
    let style = if subtask.completed { done_style() } else { default_style() };
    Line::from(vec![
        Span::styled(format!("   {} ", tree_connector(is_last)), tree_style()),
        Span::styled(format!("{} ", subtask_checkbox(subtask.completed)), style),
        Span::styled(subtask.title.clone(), style),
    ])
}
