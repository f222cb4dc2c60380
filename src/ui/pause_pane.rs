use crate::gate::{GatePhase, PauseGate};
use crate::ui::{
    layout::centered_rect,
    styles::{button_style, gauge_style, hint_style, title_style},
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Gauge, Paragraph},
    Frame,
};

/// Render the pause gate: countdown, then nothing, then the continue button
pub fn render_pause_pane(f: &mut Frame, gate: &PauseGate, area: Rect) {
    let inner = centered_rect(area, 40, 7);

    match gate.phase() {
        GatePhase::Counting(left) => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(1), // "Breathe..."
                    Constraint::Length(1), // question
                    Constraint::Length(1), // seconds
                    Constraint::Length(1),
                    Constraint::Length(1), // gauge
                ])
                .split(inner);

            let breathe = Paragraph::new(Line::styled("Breathe...", title_style())).alignment(Alignment::Center);
            f.render_widget(breathe, chunks[0]);

            let question = Paragraph::new(Line::styled("Are you sure you want to go in?", hint_style()))
                .alignment(Alignment::Center);
            f.render_widget(question, chunks[1]);

            let seconds = Paragraph::new(Line::raw(left.to_string())).alignment(Alignment::Center);
            f.render_widget(seconds, chunks[2]);

            let gauge = Gauge::default()
                .gauge_style(gauge_style())
                .ratio(gate.progress().clamp(0.0, 1.0))
                .label("");
            f.render_widget(gauge, chunks[4]);
        }
        GatePhase::Hidden => {}
        GatePhase::Ready => {
            let lines = vec![
                Line::from(Span::styled("  Continue  ", button_style())),
                Line::raw(""),
                Line::styled("Enter to continue · q to quit", hint_style()),
            ];
            let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
            f.render_widget(paragraph, centered_rect(area, 40, 3));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::testing::ManualClock;
    use crate::ui::test_support::{buffer_text, draw};
    use std::time::Duration;

    fn create_gate() -> (PauseGate, ManualClock) {
        let clock = ManualClock::new();
        let gate = PauseGate::new(5, Duration::from_millis(500), Box::new(clock.clone()));
        (gate, clock)
    }

    #[test]
    fn test_render_countdown() {
        let (mut gate, clock) = create_gate();
        clock.advance(Duration::from_secs(1));
        gate.advance();

        let text = buffer_text(&draw(60, 12, |f, area| render_pause_pane(f, &gate, area)));
        assert!(text.contains("Breathe..."));
        assert!(text.contains("4"));
        assert!(!text.contains("Continue"));
    }

    #[test]
    fn test_render_hidden_then_ready() {
        let (mut gate, clock) = create_gate();
        for _ in 0..5 {
            clock.advance(Duration::from_secs(1));
            gate.advance();
        }

        let hidden = buffer_text(&draw(60, 12, |f, area| render_pause_pane(f, &gate, area)));
        assert!(hidden.trim().is_empty());

        clock.advance(Duration::from_millis(500));
        gate.advance();
        let ready = buffer_text(&draw(60, 12, |f, area| render_pause_pane(f, &gate, area)));
        assert!(ready.contains("Continue"));
    }
}
