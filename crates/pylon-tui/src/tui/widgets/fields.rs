// Identity field widget: one bordered text box per field.
//
// A field flagged by the last submit gets a red border and a "Required"
// caption until it holds a value. The focused box shows a trailing cursor.

use pylon_core::form::FormState;
use pylon_core::validate::FieldId;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

pub fn render(frame: &mut Frame, area: Rect, form: &FormState, field: FieldId, focused: bool) {
    let missing = form.errors.get(field);

    let border_style = match (missing, focused) {
        (true, _) => Style::default().fg(Color::Red),
        (false, true) => Style::default().fg(Color::Cyan),
        (false, false) => Style::default(),
    };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled(
            field.label(),
            if focused {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            },
        ));
    if missing {
        block = block.title_bottom(Span::styled(
            "Required",
            Style::default().fg(Color::Red),
        ));
    }

    let mut spans = vec![Span::raw(visible_tail(
        form.fields.get(field),
        area.width.saturating_sub(3) as usize,
    ))];
    if focused {
        spans.push(Span::styled(
            "_",
            Style::default().add_modifier(Modifier::SLOW_BLINK),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

/// The last `width` characters of `text`, so the end being typed stays visible.
fn visible_tail(text: &str, width: usize) -> String {
    let count = text.chars().count();
    text.chars().skip(count.saturating_sub(width)).collect()
}
