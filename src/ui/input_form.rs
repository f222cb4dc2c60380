use crate::app::{AppState, InputFormState};
use crate::domain::{FormField, UiMode};
use crate::ui::{
    layout::create_modal_area,
    styles::{chip_selected_style, hint_style, modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Modal title for the current form
fn form_title(mode: UiMode) -> &'static str {
    match mode {
        UiMode::AddingSubtask => " Add Sub-task ",
        UiMode::EditingTitle => " Edit Title ",
        UiMode::EditingDescription => " Edit Description ",
        _ => " New Task ",
    }
}

/// Label line plus a "> text█" line for one text field
fn text_field<'a>(field: FormField, value: &'a str, editing: bool) -> [Line<'a>; 2] {
    let label = format!("{}:", field.label());
    let label = if editing {
        Line::from(vec![Span::raw(label), Span::styled(" (editing)", hint_style())])
    } else {
        Line::raw(label)
    };
    let value = Line::from(vec![
        Span::raw("> "),
        Span::styled(value, modal_title_style()),
        if editing {
            Span::styled("█", modal_title_style()) // Cursor
        } else {
            Span::raw("")
        },
    ]);
    [label, value]
}

/// Category chips, the picked one highlighted
fn category_chips<'a>(categories: &'a [String], picked: usize, editing: bool) -> Line<'a> {
    let mut spans = vec![Span::raw("  ")];
    for (i, category) in categories.iter().enumerate() {
        let chip = format!(" {} ", category);
        if i == picked {
            spans.push(Span::styled(chip, chip_selected_style()));
        } else {
            spans.push(Span::raw(chip));
        }
        spans.push(Span::raw(" "));
    }
    if editing {
        spans.push(Span::styled("←/→", hint_style()));
    }
    Line::from(spans)
}

fn add_task_lines<'a>(form: &'a InputFormState, categories: &'a [String]) -> Vec<Line<'a>> {
    let mut lines = vec![Line::raw("")];

    lines.extend(text_field(FormField::Title, &form.title, form.field == FormField::Title));
    lines.push(Line::raw(""));
    lines.extend(text_field(
        FormField::Description,
        &form.description,
        form.field == FormField::Description,
    ));
    lines.push(Line::raw(""));

    lines.push(Line::raw(format!("{}:", FormField::Category.label())));
    lines.push(category_chips(
        categories,
        form.category_index,
        form.field == FormField::Category,
    ));
    lines.push(Line::raw(""));

    lines.extend(text_field(FormField::Tag, &form.tag, form.field == FormField::Tag));
    lines.push(Line::raw(""));
    lines.push(Line::styled("Tab to switch fields  ·  Enter to save  ·  Esc to cancel", hint_style()));
    lines
}

/// Render the input form for adding or editing
pub fn render_input_form(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(form) = &app.input_form else {
        return;
    };

    let modal_area = create_modal_area(area);

    // Clear the area behind the form
    f.render_widget(Clear, modal_area);

    let lines = if app.ui_mode == UiMode::AddingTask {
        add_task_lines(form, &app.categories)
    } else {
        let mut lines = vec![Line::raw("")];
        let field = if app.ui_mode == UiMode::EditingDescription {
            FormField::Description
        } else {
            FormField::Title
        };
        lines.extend(text_field(field, &form.title, true));
        lines.push(Line::raw(""));
        lines.push(Line::styled("Enter to save  ·  Esc to cancel", hint_style()));
        lines
    };

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(form_title(app.ui_mode), modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}
