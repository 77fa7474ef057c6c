// Header widget: contest name and payment note.

use pylon_core::config::ContestInfo;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

pub fn render(frame: &mut Frame, area: Rect, contest: &ContestInfo) {
    let mut spans = vec![Span::styled(
        contest.name.clone(),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(note) = &contest.payment_note {
        spans.push(Span::styled("  |  ", Style::default().fg(Color::Gray)));
        spans.push(Span::styled(note.clone(), Style::default().fg(Color::White)));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}
