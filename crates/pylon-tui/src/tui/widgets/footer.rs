// Footer widget: roster message or transport notice, plus the submit button.

use pylon_core::form::{FormPhase, FormState};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

const BUTTON_WIDTH: u16 = 16;

pub fn render(frame: &mut Frame, area: Rect, form: &FormState, button_focused: bool) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(BUTTON_WIDTH)])
        .split(area);

    let message = Paragraph::new(message_line(form)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(message, columns[0]);

    let (label, style) = button(form.phase(), button_focused);
    let button = Paragraph::new(Span::styled(label, style))
        .centered()
        .block(Block::default().borders(Borders::ALL).border_style(
            if button_focused {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            },
        ));
    frame.render_widget(button, columns[1]);
}

/// Selection error first, then the transport notice, else a quiet hint.
pub fn message_line(form: &FormState) -> Line<'static> {
    if let Some(err) = &form.selection_error {
        return Line::from(Span::styled(
            err.to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }
    if let Some(notice) = &form.transport_notice {
        return Line::from(Span::styled(
            notice.clone(),
            Style::default().fg(Color::Yellow),
        ));
    }
    if form.errors.any() {
        return Line::from(Span::styled(
            "Fill in the required fields",
            Style::default().fg(Color::Red),
        ));
    }
    Line::from(Span::styled(
        "Pick your players, then submit",
        Style::default().fg(Color::Gray),
    ))
}

fn button(phase: &FormPhase, focused: bool) -> (&'static str, Style) {
    match phase {
        FormPhase::Submitting => (
            "Submitting...",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC),
        ),
        _ if focused => (
            "[ Submit ]",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        _ => ("[ Submit ]", Style::default().add_modifier(Modifier::BOLD)),
    }
}
