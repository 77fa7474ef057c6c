// Help bar widget: key hints for the focused element.

use pylon_core::form::FormPhase;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::{Focus, ViewState};

pub fn render(frame: &mut Frame, area: Rect, view: &ViewState, phase: &FormPhase) {
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        hint_text(view, phase),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

pub fn hint_text(view: &ViewState, phase: &FormPhase) -> &'static str {
    if view.confirm_quit {
        return " y:Quit | n:Stay";
    }
    match phase {
        FormPhase::Submitting => " Sending entry... | Ctrl+C:Quit",
        FormPhase::Submitted(_) => " Enter/q:Exit",
        FormPhase::Editing | FormPhase::Blocked => match view.focus {
            Focus::Field(_) => " Type to edit | Enter:Next field | Tab:Next | Esc:Players | Ctrl+S:Submit",
            Focus::Grid(_) => {
                " Space:Pick | j/k:Move | PgUp/PgDn:Page | 1-5:Sort | Tab:Next | Ctrl+S:Submit | Esc:Quit"
            }
            Focus::Submit => " Enter:Submit | Shift+Tab:Back | Esc:Quit",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pylon_core::candidate::ListKind;

    #[test]
    fn hints_follow_focus() {
        let mut view = ViewState::default();
        assert!(hint_text(&view, &FormPhase::Editing).contains("Enter:Next field"));
        view.focus = Focus::Grid(ListKind::Rookie);
        assert!(hint_text(&view, &FormPhase::Blocked).contains("Space:Pick"));
        view.focus = Focus::Submit;
        assert!(hint_text(&view, &FormPhase::Editing).contains("Enter:Submit"));
    }

    #[test]
    fn quit_prompt_and_locked_phases_override_focus() {
        let mut view = ViewState::default();
        assert!(hint_text(&view, &FormPhase::Submitting).contains("Sending entry"));
        view.confirm_quit = true;
        assert_eq!(hint_text(&view, &FormPhase::Editing), " y:Quit | n:Stay");
    }

    #[test]
    fn render_does_not_panic() {
        let backend = ratatui::backend::TestBackend::new(80, 1);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), &ViewState::default(), &FormPhase::Editing))
            .unwrap();
    }
}
