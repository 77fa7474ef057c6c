// Screen layout: panel arrangement and sizing.
//
// +--------------------------------------------------+
// | Header (3 rows): contest name, payment note       |
// +------------+------------+------------+------------+
// | First Name | Last Name  | Email      | Team Name  |  (3 rows)
// +------------+------------+------------+------------+
// | Returning Players grid (fill)                     |
// +--------------------------------------------------+
// | Rookies grid (10 rows)                            |
// +--------------------------------------------------+
// | Footer (3 rows): messages, submit button          |
// +--------------------------------------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas for each form zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    pub header: Rect,
    /// Everything between header and help bar. The thank-you notice
    /// replaces this whole area once the entry is sent.
    pub body: Rect,
    /// One input box per identity field, in field order.
    pub fields: [Rect; 4],
    pub players: Rect,
    pub rookies: Rect,
    pub footer: Rect,
    pub help_bar: Rect,
}

pub fn build_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // header
            Constraint::Length(3),  // identity fields
            Constraint::Min(8),     // returning players
            Constraint::Length(10), // rookies
            Constraint::Length(3),  // footer
            Constraint::Length(1),  // help bar
        ])
        .split(area);

    let header = vertical[0];
    let fields_row = vertical[1];
    let players = vertical[2];
    let rookies = vertical[3];
    let footer = vertical[4];
    let help_bar = vertical[5];

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(fields_row);
    let fields = [columns[0], columns[1], columns[2], columns[3]];

    AppLayout {
        header,
        body: fields_row.union(footer),
        fields,
        players,
        rookies,
        footer,
        help_bar,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
