// Column sorting for the candidate grids.
//
// A list is displayed either in dataset order (direction `None`) or stably
// sorted on one column. Descending order is the ascending order reversed, so
// the two directions always mirror each other.

use std::cmp::Ordering;

use crate::candidate::{Candidate, ListSpec};

/// Sort direction of a grid column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Ascending,
    Descending,
    /// Dataset order.
    #[default]
    None,
}

impl SortDirection {
    /// Parse the grid's direction keys ("ASC", "DESC", "NONE").
    pub fn from_key(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "ASC" => Some(SortDirection::Ascending),
            "DESC" => Some(SortDirection::Descending),
            "NONE" => Some(SortDirection::None),
            _ => None,
        }
    }

    pub fn as_key(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
            SortDirection::None => "NONE",
        }
    }

    /// Next direction when the active column is chosen again:
    /// ascending -> descending -> none -> ascending.
    pub fn next(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::None,
            SortDirection::None => SortDirection::Ascending,
        }
    }
}

/// A sortable candidate attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortColumn {
    FirstName,
    LastName,
    Position,
    Team,
    Touchdowns,
}

impl SortColumn {
    /// Column key as used by the grid and the sort state.
    pub fn key(&self) -> &'static str {
        match self {
            SortColumn::FirstName => "firstName",
            SortColumn::LastName => "lastName",
            SortColumn::Position => "position",
            SortColumn::Team => "team",
            SortColumn::Touchdowns => "td",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "firstName" => Some(SortColumn::FirstName),
            "lastName" => Some(SortColumn::LastName),
            "position" => Some(SortColumn::Position),
            "team" => Some(SortColumn::Team),
            "td" => Some(SortColumn::Touchdowns),
            _ => None,
        }
    }

    /// Header text for the grid.
    pub fn title(&self) -> &'static str {
        match self {
            SortColumn::FirstName => "First name",
            SortColumn::LastName => "Last name",
            SortColumn::Position => "Pos",
            SortColumn::Team => "Team",
            SortColumn::Touchdowns => "TDs",
        }
    }

    /// Ascending comparison of two candidates on this column. Text columns
    /// compare lexicographically, touchdowns numerically.
    pub fn compare(&self, a: &Candidate, b: &Candidate) -> Ordering {
        match self {
            SortColumn::FirstName => a.first_name.cmp(&b.first_name),
            SortColumn::LastName => a.last_name.cmp(&b.last_name),
            SortColumn::Position => a.position.cmp(&b.position),
            SortColumn::Team => a.team.cmp(&b.team),
            SortColumn::Touchdowns => a.touchdowns().cmp(&b.touchdowns()),
        }
    }
}

/// The active column/direction pair of one list.
///
/// The column is kept as a raw key: the grid may hand us anything, and an
/// unknown key simply leaves the list in dataset order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub column_key: String,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        SortState {
            column_key: SortColumn::LastName.key().to_string(),
            direction: SortDirection::None,
        }
    }
}

impl SortState {
    pub fn new(column_key: impl Into<String>, direction: SortDirection) -> Self {
        SortState {
            column_key: column_key.into(),
            direction,
        }
    }

    pub fn column(&self) -> Option<SortColumn> {
        SortColumn::from_key(&self.column_key)
    }

    /// The state after the user picks `column` in the grid header: the
    /// active column cycles its direction, a new column starts ascending.
    pub fn cycle(&self, column: SortColumn) -> SortState {
        if self.column() == Some(column) {
            SortState::new(column.key(), self.direction.next())
        } else {
            SortState::new(column.key(), SortDirection::Ascending)
        }
    }
}

// ---------------------------------------------------------------------------
// SortedView
// ---------------------------------------------------------------------------

/// A display ordering over a borrowed candidate list.
///
/// Holds row -> dataset index mappings only; iterate it as often as needed.
#[derive(Debug, Clone)]
pub struct SortedView<'a> {
    candidates: &'a [Candidate],
    /// `None` when rows are in dataset order.
    order: Option<Vec<usize>>,
}

impl<'a> SortedView<'a> {
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Candidate displayed at `row`.
    pub fn get(&self, row: usize) -> Option<&'a Candidate> {
        let candidates = self.candidates;
        match &self.order {
            Some(order) => order.get(row).and_then(|&i| candidates.get(i)),
            None => candidates.get(row),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Candidate> + '_ {
        (0..self.len()).filter_map(move |row| self.get(row))
    }

    /// Row at which the candidate with `id` is displayed.
    pub fn row_of(&self, id: u32) -> Option<usize> {
        self.iter().position(|c| c.id == id)
    }
}

/// Order `candidates` according to `state`.
///
/// Columns the list does not offer (e.g. touchdowns on the rookie list) and
/// unrecognized keys fall back to dataset order.
pub fn sorted_view<'a>(
    candidates: &'a [Candidate],
    spec: &ListSpec,
    state: &SortState,
) -> SortedView<'a> {
    let column = match (state.direction, state.column()) {
        (SortDirection::None, _) | (_, None) => None,
        (_, Some(col)) if !spec.supports(col) => None,
        (_, Some(col)) => Some(col),
    };

    let Some(column) = column else {
        return SortedView {
            candidates,
            order: None,
        };
    };

    let mut order: Vec<usize> = (0..candidates.len()).collect();
    // `sort_by` is stable: ties keep dataset order before any reversal.
    order.sort_by(|&a, &b| column.compare(&candidates[a], &candidates[b]));
    if state.direction == SortDirection::Descending {
        order.reverse();
    }

    SortedView {
        candidates,
        order: Some(order),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::ListSpec;

    fn player(id: u32, first: &str, last: &str, pos: &str, team: &str, td: u32) -> Candidate {
        Candidate {
            id,
            first_name: first.to_string(),
            last_name: last.to_string(),
            position: pos.to_string(),
            team: team.to_string(),
            td: Some(td),
        }
    }

    fn sample() -> Vec<Candidate> {
        vec![
            player(1, "Derrick", "Henry", "RB", "TEN", 17),
            player(2, "Davante", "Adams", "WR", "GB", 18),
            player(3, "Travis", "Kelce", "TE", "KC", 11),
            player(4, "Aaron", "Jones", "RB", "GB", 11),
            player(5, "Alvin", "Kamara", "RB", "NO", 21),
        ]
    }

    fn ids(view: &SortedView) -> Vec<u32> {
        view.iter().map(|c| c.id).collect()
    }

    #[test]
    fn direction_none_keeps_dataset_order() {
        let data = sample();
        let spec = ListSpec::returning(6);
        let state = SortState::new("td", SortDirection::None);
        assert_eq!(ids(&sorted_view(&data, &spec, &state)), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn sorts_text_columns_lexicographically() {
        let data = sample();
        let spec = ListSpec::returning(6);
        let state = SortState::new("lastName", SortDirection::Ascending);
        assert_eq!(ids(&sorted_view(&data, &spec, &state)), vec![2, 1, 4, 5, 3]);
    }

    #[test]
    fn sorts_touchdowns_numerically_and_stably() {
        let data = sample();
        let spec = ListSpec::returning(6);
        let state = SortState::new("td", SortDirection::Ascending);
        // Kelce (3) and Jones (4) tie at 11 and keep dataset order
        assert_eq!(ids(&sorted_view(&data, &spec, &state)), vec![3, 4, 1, 2, 5]);
    }

    #[test]
    fn descending_is_reversed_ascending() {
        let data = sample();
        let spec = ListSpec::returning(6);
        let asc = sorted_view(&data, &spec, &SortState::new("team", SortDirection::Ascending));
        let desc = sorted_view(&data, &spec, &SortState::new("team", SortDirection::Descending));
        let mut reversed = ids(&asc);
        reversed.reverse();
        assert_eq!(ids(&desc), reversed);
    }

    #[test]
    fn unknown_column_key_is_dataset_order() {
        let data = sample();
        let spec = ListSpec::returning(6);
        let state = SortState::new("salary", SortDirection::Descending);
        assert_eq!(ids(&sorted_view(&data, &spec, &state)), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn unsupported_column_is_dataset_order() {
        let data = sample();
        let spec = ListSpec::rookies(1, 144);
        let state = SortState::new("td", SortDirection::Ascending);
        assert_eq!(ids(&sorted_view(&data, &spec, &state)), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn view_is_restartable_and_indexable() {
        let data = sample();
        let spec = ListSpec::returning(6);
        let view = sorted_view(&data, &spec, &SortState::new("td", SortDirection::Descending));
        assert_eq!(ids(&view), ids(&view));
        assert_eq!(view.len(), 5);
        assert_eq!(view.get(0).map(|c| c.id), Some(5));
        assert!(view.get(5).is_none());
        assert_eq!(view.row_of(2), Some(1));
        assert_eq!(view.row_of(99), None);
    }

    #[test]
    fn cycle_follows_header_clicks() {
        let state = SortState::default();
        assert_eq!(state.direction, SortDirection::None);

        // Clicking the already-active column starts ascending from none
        let s1 = state.cycle(SortColumn::LastName);
        assert_eq!(s1, SortState::new("lastName", SortDirection::Ascending));
        let s2 = s1.cycle(SortColumn::LastName);
        assert_eq!(s2.direction, SortDirection::Descending);
        let s3 = s2.cycle(SortColumn::LastName);
        assert_eq!(s3.direction, SortDirection::None);

        // A different column always starts ascending
        let s4 = s2.cycle(SortColumn::Touchdowns);
        assert_eq!(s4, SortState::new("td", SortDirection::Ascending));
    }

    #[test]
    fn direction_keys_round_trip() {
        for dir in [
            SortDirection::Ascending,
            SortDirection::Descending,
            SortDirection::None,
        ] {
            assert_eq!(SortDirection::from_key(dir.as_key()), Some(dir));
        }
        assert_eq!(SortDirection::from_key("desc"), Some(SortDirection::Descending));
        assert_eq!(SortDirection::from_key("sideways"), None);
    }
}
