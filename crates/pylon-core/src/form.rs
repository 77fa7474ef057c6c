// Form state: field values, display error flags, roster selection and the
// Editing / Blocked / Submitting / Submitted lifecycle.
//
// Every user action goes through one of the transition methods below so the
// whole flow is testable without a terminal.

use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use crate::candidate::ListKind;
use crate::selector::{RosterSelector, Toggle};
use crate::sort::SortDirection;
use crate::validate::{validate, FieldErrors, FieldId, FormFields, SelectionError, ValidatedPayload};

/// Where the form is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPhase {
    /// Accepting edits.
    Editing,
    /// The last submit failed validation; errors are on display.
    Blocked,
    /// Validation passed and the request is in flight. Input is ignored.
    Submitting,
    /// Terminal: the entry was sent.
    Submitted(SubmissionReceipt),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub team_name: String,
    pub submitted_at: DateTime<Local>,
}

/// How the outbound request ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The endpoint answered. Its response is opaque, so any answer counts.
    Completed,
    /// The request never got an answer.
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct FormState {
    pub fields: FormFields,
    pub errors: FieldErrors,
    /// At most one roster message at a time.
    pub selection_error: Option<SelectionError>,
    /// Shown after a transport failure until the next submit attempt.
    pub transport_notice: Option<String>,
    pub selector: RosterSelector,
    phase: FormPhase,
    /// Team name of the payload in flight, for the receipt.
    pending_team: Option<String>,
}

impl FormState {
    pub fn new(selector: RosterSelector) -> Self {
        FormState {
            fields: FormFields::default(),
            errors: FieldErrors::default(),
            selection_error: None,
            transport_notice: None,
            selector,
            phase: FormPhase::Editing,
            pending_team: None,
        }
    }

    pub fn phase(&self) -> &FormPhase {
        &self.phase
    }

    /// True while a request is in flight or after the entry was sent.
    pub fn is_locked(&self) -> bool {
        matches!(self.phase, FormPhase::Submitting | FormPhase::Submitted(_))
    }

    pub fn touchdown_total(&self) -> u32 {
        self.selector.selected_touchdown_total()
    }

    fn resume_editing(&mut self) {
        if self.phase == FormPhase::Blocked {
            self.phase = FormPhase::Editing;
        }
    }

    /// Replace a field's text. Its "required" flag clears once it has a value.
    pub fn set_field(&mut self, field: FieldId, value: impl Into<String>) {
        if self.is_locked() {
            return;
        }
        let value = value.into();
        if self.errors.get(field) && !value.is_empty() {
            self.errors.set(field, false);
        }
        self.fields.set(field, value);
        self.resume_editing();
    }

    /// Toggle a candidate. Any roster message is cleared; it is re-evaluated
    /// on the next submit.
    pub fn toggle_selection(&mut self, kind: ListKind, id: u32) -> Toggle {
        if self.is_locked() {
            return Toggle::Ignored;
        }
        let result = self.selector.toggle_selection(kind, id);
        if result != Toggle::Ignored {
            self.selection_error = None;
            self.resume_editing();
        }
        result
    }

    pub fn set_sort(&mut self, kind: ListKind, column_key: &str, direction: SortDirection) {
        if self.is_locked() {
            return;
        }
        self.selector.set_sort(kind, column_key, direction);
    }

    /// Attempt to submit. Returns the payload to send when validation
    /// passes; otherwise updates the displayed errors and blocks.
    pub fn submit(&mut self) -> Option<ValidatedPayload> {
        if self.is_locked() {
            debug!(phase = ?self.phase, "submit ignored");
            return None;
        }
        self.transport_notice = None;

        match validate(&self.fields, &self.selector) {
            Ok(payload) => {
                info!(
                    team = %payload.fields.team_name,
                    touchdowns = self.touchdown_total(),
                    "entry validated, submitting"
                );
                self.errors = FieldErrors::default();
                self.selection_error = None;
                self.pending_team = Some(payload.fields.team_name.clone());
                self.phase = FormPhase::Submitting;
                Some(payload)
            }
            Err(report) => {
                debug!(
                    missing = ?report.fields.missing(),
                    selection = ?report.selection,
                    "submit blocked"
                );
                self.errors = report.fields;
                self.selection_error = report.selection;
                self.phase = FormPhase::Blocked;
                None
            }
        }
    }

    /// Apply the result of the request started by [`FormState::submit`].
    pub fn complete_submission(&mut self, outcome: SubmitOutcome) {
        if self.phase != FormPhase::Submitting {
            warn!(phase = ?self.phase, "submission outcome with no request in flight");
            return;
        }
        match outcome {
            SubmitOutcome::Completed => {
                let receipt = SubmissionReceipt {
                    team_name: self.pending_team.take().unwrap_or_default(),
                    submitted_at: Local::now(),
                };
                info!(team = %receipt.team_name, "entry submitted");
                self.phase = FormPhase::Submitted(receipt);
            }
            SubmitOutcome::Failed(message) => {
                self.pending_team = None;
                self.transport_notice = Some(format!(
                    "Your entry could not be sent ({message}). Check your connection and submit again."
                ));
                self.phase = FormPhase::Editing;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
