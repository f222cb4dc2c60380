use crate::app::AppState;
use crate::domain::subtask_checkbox;
use crate::ui::{
    layout::create_modal_area,
    styles::{done_style, hint_style, modal_bg_style, modal_title_style, selected_style, tag_style, title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the detail modal for the task being inspected
pub fn render_detail_modal(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(task) = app.detail() else {
        return;
    };

    let modal_area = create_modal_area(area);
    f.render_widget(Clear, modal_area);

    let mut lines = vec![
        Line::raw(""),
        Line::from(vec![
            Span::styled("Title:       ", title_style()),
            Span::raw(task.title.as_str()),
        ]),
        Line::from(vec![
            Span::styled("Description: ", title_style()),
            if task.description.is_empty() {
                Span::styled("(none)", hint_style())
            } else {
                Span::raw(task.description.as_str())
            },
        ]),
        Line::from(vec![
            Span::styled("Category:    ", title_style()),
            Span::raw(task.category.as_str()),
            Span::raw("  "),
            Span::styled(format!("[{}]", task.tag), tag_style()),
        ]),
        Line::raw(""),
    ];

    let (done, total) = task.subtask_progress();
    lines.push(Line::styled(format!("Sub-tasks ({}/{})", done, total), title_style()));

    for (i, subtask) in task.subtasks.iter().enumerate() {
        let style = if i == app.detail_selected {
            selected_style()
        } else if subtask.completed {
            done_style()
        } else {
            modal_bg_style()
        };
        lines.push(Line::styled(
            format!("  {} {}", subtask_checkbox(subtask.completed), subtask.title),
            style,
        ));
    }

    lines.push(Line::styled("  + Add Sub-task (s)", hint_style()));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" Task ", modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}
