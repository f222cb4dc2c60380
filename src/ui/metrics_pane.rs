use crate::domain::metrics::{max_value, today_message, DayMetric, SAMPLE_WEEK, STREAK_DAYS, TODAY};
use crate::ui::styles::{attempts_style, border_style, focus_style, hint_style, title_style};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Wrap},
    Frame,
};

/// One bar group per day: attempts then focus
fn day_group(day: &DayMetric) -> BarGroup<'static> {
    let bars = [
        Bar::default().value(day.attempts).style(attempts_style()),
        Bar::default().value(day.focus).style(focus_style()),
    ];
    BarGroup::default().label(Line::from(day.label)).bars(&bars)
}

fn week_chart(week: &[DayMetric]) -> BarChart<'static> {
    let mut chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title(Span::styled(" This week ", title_style())),
        )
        .bar_width(3)
        .bar_gap(0)
        .group_gap(2)
        .max(max_value(week));

    for day in week {
        chart = chart.data(day_group(day));
    }
    chart
}

fn today_card(today: &DayMetric, streak_days: u32) -> Paragraph<'static> {
    let lines = vec![
        Line::from(vec![
            Span::styled("Attempts ", attempts_style()),
            Span::raw(today.attempts.to_string()),
            Span::raw("   "),
            Span::styled("Focus ", focus_style()),
            Span::raw(today.focus.to_string()),
        ]),
        Line::raw(""),
        Line::raw(today_message(today)),
        Line::raw(""),
        Line::raw(format!("Streak: {} days", streak_days)),
    ];

    Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title(Span::styled(format!(" Today · {} ", today.label), title_style())),
        )
        .wrap(Wrap { trim: true })
}

/// Render the metrics screen
pub fn render_metrics_pane(f: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),   // Week chart
            Constraint::Length(7), // Today card
            Constraint::Length(1), // Hints
        ])
        .split(area);

    f.render_widget(week_chart(&SAMPLE_WEEK), chunks[0]);
    f.render_widget(today_card(&TODAY, STREAK_DAYS), chunks[1]);
    f.render_widget(
        Paragraph::new(Line::styled(" Esc back to pause · q quit", hint_style())),
        chunks[2],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::test_support::{buffer_text, draw};

    #[test]
    fn test_render_metrics_pane() {
        let text = buffer_text(&draw(80, 30, |f, area| render_metrics_pane(f, area)));

        assert!(text.contains("This week"));
        assert!(text.contains("Mon"));
        assert!(text.contains("Sun"));
        assert!(text.contains("Today · Thursday"));
        assert!(text.contains("Attempts 12   Focus 8"));
        assert!(text.contains("Streak: 5 days"));
    }
}
