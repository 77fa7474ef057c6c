// Submission validation: identity-field presence plus roster constraints.
//
// Field checks all run, so every missing field is flagged at once. Roster
// checks short-circuit: player count, then rookie count, then the touchdown
// budget, and only the first failure is reported.

use thiserror::Error;

use crate::candidate::ListKind;
use crate::selector::RosterSelector;

// ---------------------------------------------------------------------------
// Form fields
// ---------------------------------------------------------------------------

/// The four identity text inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    FirstName,
    LastName,
    Email,
    TeamName,
}

impl FieldId {
    pub const ALL: [FieldId; 4] = [
        FieldId::FirstName,
        FieldId::LastName,
        FieldId::Email,
        FieldId::TeamName,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FieldId::FirstName => "First Name",
            FieldId::LastName => "Last Name",
            FieldId::Email => "Email",
            FieldId::TeamName => "Team Name",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub team_name: String,
}

impl FormFields {
    pub fn get(&self, field: FieldId) -> &str {
        match field {
            FieldId::FirstName => &self.first_name,
            FieldId::LastName => &self.last_name,
            FieldId::Email => &self.email,
            FieldId::TeamName => &self.team_name,
        }
    }

    pub fn set(&mut self, field: FieldId, value: String) {
        match field {
            FieldId::FirstName => self.first_name = value,
            FieldId::LastName => self.last_name = value,
            FieldId::Email => self.email = value,
            FieldId::TeamName => self.team_name = value,
        }
    }
}

/// Per-field "required" flags shown next to each input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub first_name: bool,
    pub last_name: bool,
    pub email: bool,
    pub team_name: bool,
}

impl FieldErrors {
    pub fn get(&self, field: FieldId) -> bool {
        match field {
            FieldId::FirstName => self.first_name,
            FieldId::LastName => self.last_name,
            FieldId::Email => self.email,
            FieldId::TeamName => self.team_name,
        }
    }

    pub fn set(&mut self, field: FieldId, missing: bool) {
        match field {
            FieldId::FirstName => self.first_name = missing,
            FieldId::LastName => self.last_name = missing,
            FieldId::Email => self.email = missing,
            FieldId::TeamName => self.team_name = missing,
        }
    }

    pub fn any(&self) -> bool {
        FieldId::ALL.iter().any(|&f| self.get(f))
    }

    pub fn missing(&self) -> Vec<FieldId> {
        FieldId::ALL.into_iter().filter(|&f| self.get(f)).collect()
    }
}

// ---------------------------------------------------------------------------
// Errors and payload
// ---------------------------------------------------------------------------

/// A roster-composition failure. The `Display` text is what the user sees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("You must select {expected} {} (you selected {actual})", noun(.expected, "player"))]
    PlayerCount { expected: usize, actual: usize },

    #[error("You must select {expected} {} (you selected {actual})", noun(.expected, "rookie"))]
    RookieCount { expected: usize, actual: usize },

    #[error("Selected returning players had more than {max} TDs last season (your total is {total})")]
    TouchdownBudget { max: u32, total: u32 },

    #[error("Selected id {id} is not in the {list:?} list")]
    UnknownCandidate { list: ListKind, id: u32 },
}

fn noun(count: &usize, singular: &str) -> String {
    if *count == 1 {
        singular.to_string()
    } else {
        format!("{singular}s")
    }
}

/// Why a submit was blocked. Never empty when returned by [`validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorReport {
    pub fields: FieldErrors,
    pub selection: Option<SelectionError>,
}

impl ErrorReport {
    pub fn is_empty(&self) -> bool {
        !self.fields.any() && self.selection.is_none()
    }
}

/// Everything the remote form receives for one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedPayload {
    pub fields: FormFields,
    /// "First Last" of each selected returning player, in id order.
    pub player_names: Vec<String>,
    /// "First Last" of each selected rookie, in id order.
    pub rookie_names: Vec<String>,
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

/// Decide whether the entry may be submitted.
pub fn validate(
    fields: &FormFields,
    selector: &RosterSelector,
) -> Result<ValidatedPayload, ErrorReport> {
    let mut field_errors = FieldErrors::default();
    for field in FieldId::ALL {
        if fields.get(field).is_empty() {
            field_errors.set(field, true);
        }
    }

    let roster = check_roster(selector);

    match roster {
        Ok((player_names, rookie_names)) if !field_errors.any() => Ok(ValidatedPayload {
            fields: fields.clone(),
            player_names,
            rookie_names,
        }),
        Ok(_) => Err(ErrorReport {
            fields: field_errors,
            selection: None,
        }),
        Err(selection) => Err(ErrorReport {
            fields: field_errors,
            selection: Some(selection),
        }),
    }
}

/// Roster checks in order; on success the resolved display names.
fn check_roster(selector: &RosterSelector) -> Result<(Vec<String>, Vec<String>), SelectionError> {
    let returning = selector.list(ListKind::Returning);
    let rookies = selector.list(ListKind::Rookie);

    let picked = returning.selection().len();
    if picked != returning.spec().target_size {
        return Err(SelectionError::PlayerCount {
            expected: returning.spec().target_size,
            actual: picked,
        });
    }

    let picked = rookies.selection().len();
    if picked != rookies.spec().target_size {
        return Err(SelectionError::RookieCount {
            expected: rookies.spec().target_size,
            actual: picked,
        });
    }

    let total = selector.selected_touchdown_total();
    if total > selector.touchdown_cap() {
        return Err(SelectionError::TouchdownBudget {
            max: selector.touchdown_cap(),
            total,
        });
    }

    let player_names = resolve_names(selector, ListKind::Returning)?;
    let rookie_names = resolve_names(selector, ListKind::Rookie)?;
    Ok((player_names, rookie_names))
}

fn resolve_names(selector: &RosterSelector, kind: ListKind) -> Result<Vec<String>, SelectionError> {
    let list = selector.list(kind);
    list.selection()
        .iter()
        .map(|id| {
            list.resolve(id)
                .map(|c| c.display_name())
                .ok_or(SelectionError::UnknownCandidate { list: kind, id })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
