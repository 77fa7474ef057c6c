// Application state and command handling.
//
// The TUI turns key presses into `UserCommand`s. `App::apply_command` applies
// each one to the form and reports the side effect, if any, that the event
// loop must carry out: sending the entry or quitting.

use pylon_core::candidate::ListKind;
use pylon_core::config::Config;
use pylon_core::form::{FormState, SubmitOutcome};
use pylon_core::sort::SortDirection;
use pylon_core::submit::encode_payload;
use pylon_core::validate::FieldId;
use tracing::info;

/// Commands sent from the TUI to the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    /// Replace the text of an identity field.
    EditField { field: FieldId, value: String },
    /// Select or deselect a candidate.
    Toggle { list: ListKind, id: u32 },
    /// Change a grid's sort column and direction.
    Sort {
        list: ListKind,
        column_key: String,
        direction: SortDirection,
    },
    Submit,
    Quit,
}

/// What the event loop has to do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Send this url-encoded entry to the configured endpoint.
    Submit(Vec<(String, String)>),
    Quit,
}

pub struct App {
    pub config: Config,
    pub form: FormState,
}

impl App {
    pub fn new(config: Config, form: FormState) -> Self {
        App { config, form }
    }

    pub fn apply_command(&mut self, cmd: UserCommand) -> Effect {
        match cmd {
            UserCommand::EditField { field, value } => {
                self.form.set_field(field, value);
                Effect::None
            }
            UserCommand::Toggle { list, id } => {
                self.form.toggle_selection(list, id);
                Effect::None
            }
            UserCommand::Sort {
                list,
                column_key,
                direction,
            } => {
                self.form.set_sort(list, &column_key, direction);
                Effect::None
            }
            UserCommand::Submit => match self.form.submit() {
                Some(payload) => Effect::Submit(encode_payload(
                    &payload,
                    &self.config.submission.entries,
                )),
                None => Effect::None,
            },
            UserCommand::Quit => {
                info!("Quit requested");
                Effect::Quit
            }
        }
    }

    /// Feed back the result of a submission started by `Effect::Submit`.
    pub fn apply_outcome(&mut self, outcome: SubmitOutcome) {
        self.form.complete_submission(outcome);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
