// Candidate grid widget: one table per list with a checkbox column.
//
// Rows follow the list's current sort; the active sort column carries an
// arrow in its header and the number key that selects it. The returning
// grid's title reports the running touchdown total against the cap.

use pylon_core::candidate::{Candidate, ListKind};
use pylon_core::form::FormState;
use pylon_core::selector::CandidateList;
use pylon_core::sort::{SortColumn, SortDirection};
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Row, Table, TableState};
use ratatui::Frame;

use crate::tui::{Focus, ViewState};

/// Render the grid for `kind` into the given area.
pub fn render(frame: &mut Frame, area: Rect, form: &FormState, kind: ListKind, view: &ViewState) {
    let list = form.selector.list(kind);
    let focused = view.focus == Focus::Grid(kind);

    let header = Row::new(header_cells(list)).style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = list
        .sorted_view()
        .iter()
        .map(|c| candidate_row(c, list))
        .collect();

    // Headers carry a sort arrow and key hint, e.g. "TDs ▼ [5]"
    let mut widths = vec![
        Constraint::Length(3),
        Constraint::Min(16),
        Constraint::Min(16),
        Constraint::Length(10),
        Constraint::Length(10),
    ];
    if list.spec().supports(SortColumn::Touchdowns) {
        widths.push(Constraint::Length(10));
    }

    let table = Table::new(rows, widths)
        .header(header)
        .block(grid_block(form, kind, focused))
        .row_highlight_style(if focused {
            Style::default().bg(Color::DarkGray)
        } else {
            Style::default()
        })
        .highlight_symbol(if focused { ">> " } else { "   " });

    let mut table_state = TableState::default().with_selected(Some(view.cursor(kind)));
    frame.render_stateful_widget(table, area, &mut table_state);
}

fn grid_block(form: &FormState, kind: ListKind, focused: bool) -> Block<'static> {
    let list = form.selector.list(kind);
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Line::from(grid_title(form, kind)));

    if kind != ListKind::Returning {
        return block;
    }

    let total = form.touchdown_total();
    let total_style = if total > form.selector.touchdown_cap() {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Green)
    };
    let selected = list.selection().len();
    block.title_top(
        Line::from(vec![
            Span::styled(format!("Selected TD Total: {total}"), total_style),
            Span::raw(format!(" | {selected} picked ")),
        ])
        .right_aligned(),
    )
}

/// Grid caption, e.g. "Returning Players (Pick 6, Max 48 combined)".
pub fn grid_title(form: &FormState, kind: ListKind) -> String {
    let target = form.selector.list(kind).spec().target_size;
    match kind {
        ListKind::Returning => format!(
            "{} (Pick {}, Max {} combined)",
            kind.label(),
            target,
            form.selector.touchdown_cap()
        ),
        ListKind::Rookie => format!("{} (Pick {})", kind.label(), target),
    }
}

fn header_cells(list: &CandidateList) -> Vec<Cell<'static>> {
    let sort = list.sort_state();
    let mut cells = vec![Cell::from("")];
    for (i, column) in list.spec().columns.iter().enumerate() {
        let arrow = match sort.direction {
            _ if sort.column() != Some(*column) => "",
            SortDirection::Ascending => " ▲",
            SortDirection::Descending => " ▼",
            SortDirection::None => "",
        };
        cells.push(Cell::from(format!("{}{} [{}]", column.title(), arrow, i + 1)));
    }
    cells
}

fn candidate_row(candidate: &Candidate, list: &CandidateList) -> Row<'static> {
    let selected = list.selection().contains(candidate.id);
    let mut cells = vec![
        Cell::from(if selected { "[x]" } else { "[ ]" }),
        Cell::from(candidate.first_name.clone()),
        Cell::from(candidate.last_name.clone()),
        Cell::from(candidate.position.clone()),
        Cell::from(candidate.team.clone()),
    ];
    if list.spec().supports(SortColumn::Touchdowns) {
        cells.push(Cell::from(candidate.touchdowns().to_string()));
    }

    let style = if selected {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    Row::new(cells).style(style)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pylon_core::candidate::ListSpec;
    use pylon_core::selector::RosterSelector;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn candidate(id: u32, first: &str, last: &str, td: Option<u32>) -> Candidate {
        Candidate {
            id,
            first_name: first.to_string(),
            last_name: last.to_string(),
            position: "RB".to_string(),
            team: "TST".to_string(),
            td,
        }
    }

    fn form() -> FormState {
        let players = vec![
            candidate(1, "Derrick", "Henry", Some(17)),
            candidate(2, "Alvin", "Kamara", Some(21)),
            candidate(3, "Nick", "Chubb", Some(12)),
        ];
        let rookies = vec![candidate(144, "Najee", "Harris", None)];
        FormState::new(RosterSelector::new(
            CandidateList::new(ListSpec::returning(6), players),
            CandidateList::new(ListSpec::rookies(1, 144), rookies),
            48,
        ))
    }

    fn draw(form: &FormState, kind: ListKind, view: &ViewState) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(100, 8)).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), form, kind, view))
            .unwrap();
        let buf = terminal.backend().buffer();
        (0..buf.area.height)
            .map(|y| (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect())
            .collect()
    }

    #[test]
    fn titles_describe_pick_rules() {
        let form = form();
        assert_eq!(
            grid_title(&form, ListKind::Returning),
            "Returning Players (Pick 6, Max 48 combined)"
        );
        assert_eq!(grid_title(&form, ListKind::Rookie), "Rookies (Pick 1)");
    }

    #[test]
    fn returning_grid_shows_total_and_touchdowns() {
        let mut form = form();
        form.toggle_selection(ListKind::Returning, 2);
        let lines = draw(&form, ListKind::Returning, &ViewState::default());
        assert!(lines[0].contains("Selected TD Total: 21"));
        assert!(lines[0].contains("1 picked"));
        assert!(lines[1].contains("TDs [5]"));
        let kamara = lines.iter().find(|l| l.contains("Kamara")).unwrap();
        assert!(kamara.contains("[x]"));
        assert!(kamara.contains("21"));
    }

    #[test]
    fn rows_follow_sort_and_header_marks_it() {
        let mut form = form();
        form.set_sort(ListKind::Returning, "td", SortDirection::Descending);
        let lines = draw(&form, ListKind::Returning, &ViewState::default());
        assert!(lines[1].contains("TDs ▼ [5]"));
        // Header is row 1; first data row is row 2
        assert!(lines[2].contains("Kamara"));
        assert!(lines[4].contains("Chubb"));
    }

    #[test]
    fn rookie_grid_has_no_touchdown_column() {
        let form = form();
        let lines = draw(&form, ListKind::Rookie, &ViewState::default());
        assert!(lines[0].contains("Rookies (Pick 1)"));
        assert!(!lines[0].contains("Selected TD Total"));
        assert!(!lines[1].contains("TDs"));
        assert!(lines[2].contains("[ ]"));
        assert!(lines[2].contains("Harris"));
    }

    #[test]
    fn focused_grid_marks_cursor_row() {
        let form = form();
        let view = ViewState {
            focus: Focus::Grid(ListKind::Returning),
            player_row: 1,
            ..ViewState::default()
        };
        let lines = draw(&form, ListKind::Returning, &view);
        assert!(lines[3].contains(">>"));
        assert!(lines[3].contains("Kamara"));
        assert!(!lines[2].contains(">>"));
    }
}
