// Confirmation shown in place of the form once the entry is sent.

use pylon_core::form::SubmissionReceipt;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

pub const THANK_YOU: &str = "Thank you for your submission!";

pub fn render(frame: &mut Frame, area: Rect, receipt: &SubmissionReceipt) {
    let lines = vec![
        Line::from(Span::styled(
            THANK_YOU,
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        Line::raw(format!("Team: {}", receipt.team_name)),
        Line::raw(format!(
            "Submitted {}",
            receipt.submitted_at.format("%b %-d, %Y at %-I:%M %p")
        )),
    ];

    let [middle] = Layout::vertical([Constraint::Length(lines.len() as u16 + 2)])
        .flex(Flex::Center)
        .areas(area);

    let paragraph = Paragraph::new(lines)
        .centered()
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, middle);
}
