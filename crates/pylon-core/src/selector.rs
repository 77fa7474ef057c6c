// Roster selection: the two candidate lists, their selection sets and sort
// states, and the touchdown aggregate over the returning-player picks.

use std::collections::BTreeSet;

use tracing::debug;

use crate::candidate::{Candidate, Datasets, ListKind, ListSpec};
use crate::config::RulesConfig;
use crate::sort::{sorted_view, SortDirection, SortState, SortedView};

/// Chosen candidate ids for one list. Unique by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: BTreeSet<u32>,
}

impl SelectionSet {
    /// Add `id` if absent, otherwise remove it. Returns whether `id` is
    /// selected afterwards.
    pub fn toggle(&mut self, id: u32) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    pub fn contains(&self, id: u32) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Selected ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.ids.iter().copied()
    }
}

/// Result of a toggle request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Added,
    Removed,
    /// The id does not name a candidate of that list; nothing changed.
    Ignored,
}

// ---------------------------------------------------------------------------
// CandidateList
// ---------------------------------------------------------------------------

/// One grid's worth of state: dataset, selection and sort.
#[derive(Debug, Clone)]
pub struct CandidateList {
    spec: ListSpec,
    candidates: Vec<Candidate>,
    selection: SelectionSet,
    sort: SortState,
}

impl CandidateList {
    pub fn new(spec: ListSpec, candidates: Vec<Candidate>) -> Self {
        CandidateList {
            spec,
            candidates,
            selection: SelectionSet::default(),
            sort: SortState::default(),
        }
    }

    pub fn spec(&self) -> &ListSpec {
        &self.spec
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    /// Look a candidate up by id.
    pub fn resolve(&self, id: u32) -> Option<&Candidate> {
        self.spec
            .index_of(id)
            .and_then(|i| self.candidates.get(i))
            .filter(|c| c.id == id)
    }

    pub fn toggle(&mut self, id: u32) -> Toggle {
        if self.resolve(id).is_none() {
            return Toggle::Ignored;
        }
        if self.selection.toggle(id) {
            Toggle::Added
        } else {
            Toggle::Removed
        }
    }

    pub fn set_sort(&mut self, column_key: &str, direction: SortDirection) {
        self.sort = SortState::new(column_key, direction);
    }

    pub fn sorted_view(&self) -> SortedView<'_> {
        sorted_view(&self.candidates, &self.spec, &self.sort)
    }

    /// Selected candidates in id order.
    pub fn selected(&self) -> impl Iterator<Item = &Candidate> + '_ {
        self.selection.iter().filter_map(move |id| self.resolve(id))
    }
}

// ---------------------------------------------------------------------------
// RosterSelector
// ---------------------------------------------------------------------------

/// Both candidate lists plus the touchdown budget an entry must respect.
#[derive(Debug, Clone)]
pub struct RosterSelector {
    returning: CandidateList,
    rookies: CandidateList,
    touchdown_cap: u32,
}

impl RosterSelector {
    pub fn new(returning: CandidateList, rookies: CandidateList, touchdown_cap: u32) -> Self {
        RosterSelector {
            returning,
            rookies,
            touchdown_cap,
        }
    }

    /// Build the selector for a contest's rules over loaded datasets.
    pub fn from_rules(rules: &RulesConfig, datasets: Datasets) -> Self {
        RosterSelector::new(
            CandidateList::new(ListSpec::returning(rules.player_count), datasets.returning),
            CandidateList::new(
                ListSpec::rookies(rules.rookie_count, rules.rookie_id_offset),
                datasets.rookies,
            ),
            rules.max_touchdowns,
        )
    }

    pub fn list(&self, kind: ListKind) -> &CandidateList {
        match kind {
            ListKind::Returning => &self.returning,
            ListKind::Rookie => &self.rookies,
        }
    }

    fn list_mut(&mut self, kind: ListKind) -> &mut CandidateList {
        match kind {
            ListKind::Returning => &mut self.returning,
            ListKind::Rookie => &mut self.rookies,
        }
    }

    /// Add or remove `id` from the selection of `kind`. Sizes are not
    /// limited here; the validator checks them at submit time.
    pub fn toggle_selection(&mut self, kind: ListKind, id: u32) -> Toggle {
        let result = self.list_mut(kind).toggle(id);
        debug!(?kind, id, ?result, "toggle selection");
        result
    }

    /// Replace the sort state of `kind`. The key is not checked; an unknown
    /// key displays the list in dataset order.
    pub fn set_sort(&mut self, kind: ListKind, column_key: &str, direction: SortDirection) {
        debug!(?kind, column_key, ?direction, "set sort");
        self.list_mut(kind).set_sort(column_key, direction);
    }

    pub fn sorted_view(&self, kind: ListKind) -> SortedView<'_> {
        self.list(kind).sorted_view()
    }

    /// Sum of prior-season touchdowns over the selected returning players.
    /// Recomputed on every call.
    pub fn selected_touchdown_total(&self) -> u32 {
        self.returning.selected().map(Candidate::touchdowns).sum()
    }

    pub fn touchdown_cap(&self) -> u32 {
        self.touchdown_cap
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
