// Quit confirmation overlay, drawn over the form when
// `ViewState::confirm_quit` is set.

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

const DIALOG_WIDTH: u16 = 38;
const DIALOG_HEIGHT: u16 = 3;

pub fn render(frame: &mut Frame, area: Rect) {
    let dialog = centered(area);
    frame.render_widget(Clear, dialog);

    let key = |k: &'static str, color: Color| {
        Span::styled(k, Style::default().fg(color).add_modifier(Modifier::BOLD))
    };
    let text = Line::from(vec![
        Span::raw("Quit without submitting? ("),
        key("y", Color::Green),
        Span::raw("/"),
        key("n", Color::Red),
        Span::raw(")"),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    frame.render_widget(Paragraph::new(text).centered().block(block), dialog);
}

/// The dialog rectangle, centered and clamped to `area`.
fn centered(area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(DIALOG_HEIGHT.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [dialog] = Layout::horizontal([Constraint::Length(DIALOG_WIDTH.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    dialog
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn dialog_sits_in_the_middle() {
        let area = Rect::new(0, 0, 100, 30);
        let dialog = centered(area);
        assert_eq!((dialog.width, dialog.height), (DIALOG_WIDTH, DIALOG_HEIGHT));
        let left = dialog.x;
        let right = area.width - dialog.x - dialog.width;
        assert!(left.abs_diff(right) <= 1);
    }

    #[test]
    fn dialog_shrinks_to_tiny_areas() {
        let area = Rect::new(0, 0, 12, 2);
        let dialog = centered(area);
        assert!(dialog.width <= 12 && dialog.height <= 2);
    }

    #[test]
    fn prompt_is_drawn() {
        let mut terminal = Terminal::new(TestBackend::new(60, 9)).unwrap();
        terminal.draw(|frame| render(frame, frame.area())).unwrap();
        let buf = terminal.backend().buffer();
        let middle: String = (0..buf.area.width).map(|x| buf[(x, 4)].symbol()).collect();
        assert!(middle.contains("Quit without submitting? (y/n)"));
    }
}
