// TUI entry form: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` holding purely visual state (focus, grid
// cursors, quit prompt). Form data lives in `App`; key presses become
// `UserCommand`s applied to it, and submission outcomes arrive over an mpsc
// channel from the background request task. The screen re-renders at ~30 fps.

pub mod input;
pub mod layout;
pub mod widgets;

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use pylon_core::candidate::ListKind;
use pylon_core::form::{FormPhase, SubmitOutcome};
use pylon_core::submit::{spawn_submission, Submitter};
use pylon_core::validate::FieldId;
use ratatui::Frame;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::app::{App, Effect};
use layout::build_layout;

// ---------------------------------------------------------------------------
// Focus
// ---------------------------------------------------------------------------

/// The form element that receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(FieldId),
    Grid(ListKind),
    Submit,
}

/// Tab order.
const FOCUS_ORDER: [Focus; 7] = [
    Focus::Field(FieldId::FirstName),
    Focus::Field(FieldId::LastName),
    Focus::Field(FieldId::Email),
    Focus::Field(FieldId::TeamName),
    Focus::Grid(ListKind::Returning),
    Focus::Grid(ListKind::Rookie),
    Focus::Submit,
];

impl Focus {
    fn position(self) -> usize {
        FOCUS_ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Focus {
        FOCUS_ORDER[(self.position() + 1) % FOCUS_ORDER.len()]
    }

    pub fn prev(self) -> Focus {
        let len = FOCUS_ORDER.len();
        FOCUS_ORDER[(self.position() + len - 1) % len]
    }
}

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local state that is not part of the form itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub focus: Focus,
    /// Highlighted display row in the returning-player grid.
    pub player_row: usize,
    /// Highlighted display row in the rookie grid.
    pub rookie_row: usize,
    /// Whether the quit confirmation dialog is showing.
    pub confirm_quit: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            focus: Focus::Field(FieldId::FirstName),
            player_row: 0,
            rookie_row: 0,
            confirm_quit: false,
        }
    }
}

impl ViewState {
    pub fn cursor(&self, kind: ListKind) -> usize {
        match kind {
            ListKind::Returning => self.player_row,
            ListKind::Rookie => self.rookie_row,
        }
    }

    pub fn cursor_mut(&mut self, kind: ListKind) -> &mut usize {
        match kind {
            ListKind::Returning => &mut self.player_row,
            ListKind::Rookie => &mut self.rookie_row,
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete form frame.
pub fn render_frame(frame: &mut Frame, app: &App, view: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::header::render(frame, layout.header, &app.config.contest);

    if let FormPhase::Submitted(receipt) = app.form.phase() {
        widgets::thank_you::render(frame, layout.body, receipt);
    } else {
        for (field, area) in FieldId::ALL.into_iter().zip(layout.fields) {
            widgets::fields::render(frame, area, &app.form, field, view.focus == Focus::Field(field));
        }
        widgets::candidate_grid::render(frame, layout.players, &app.form, ListKind::Returning, view);
        widgets::candidate_grid::render(frame, layout.rookies, &app.form, ListKind::Rookie, view);
        widgets::footer::render(frame, layout.footer, &app.form, view.focus == Focus::Submit);
    }

    widgets::help_bar::render(frame, layout.help_bar, view, app.form.phase());

    if view.confirm_quit {
        widgets::quit_confirm::render(frame, frame.area());
    }
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop until the user quits.
///
/// 1. Initializes the terminal and installs a panic hook that restores it.
/// 2. Selects over keyboard input, submission outcomes and render ticks.
/// 3. Restores the terminal on exit.
pub async fn run(mut app: App, submitter: Arc<dyn Submitter>) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view = ViewState::default();
    let mut event_stream = EventStream::new();
    let (outcome_tx, mut outcome_rx) = mpsc::channel::<SubmitOutcome>(4);

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let result = loop {
        tokio::select! {
            Some(outcome) = outcome_rx.recv() => {
                debug!(?outcome, "submission outcome received");
                app.apply_outcome(outcome);
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        let Some(cmd) = input::handle_key(key_event, &mut view, &app.form) else {
                            continue;
                        };
                        match app.apply_command(cmd) {
                            Effect::None => {}
                            Effect::Submit(form) => {
                                spawn_submission(Arc::clone(&submitter), form, outcome_tx.clone());
                            }
                            Effect::Quit => break Ok(()),
                        }
                    }
                    Some(Ok(_)) => {
                        // Resize and mouse events are picked up by the next render
                    }
                    Some(Err(e)) => {
                        warn!("terminal input error: {}", e);
                        break Err(anyhow::Error::from(e));
                    }
                    None => break Ok(()),
                }
            }

            _ = render_tick.tick() => {
                if let Err(e) = terminal.draw(|frame| render_frame(frame, &app, &view)) {
                    break Err(anyhow::Error::from(e));
                }
            }
        }
    };

    ratatui::restore();
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
