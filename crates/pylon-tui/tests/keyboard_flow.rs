// Integration tests: drive the form with key events the way a user would,
// then send the entry to a local mock endpoint.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use pylon_core::candidate::{load_datasets, ListKind};
use pylon_core::config::Config;
use pylon_core::form::{FormPhase, FormState};
use pylon_core::selector::RosterSelector;
use pylon_core::submit::{spawn_submission, FormsSubmitter};
use pylon_tui::app::{App, Effect};
use pylon_tui::tui::input::handle_key;
use pylon_tui::tui::{Focus, ViewState};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

// ===========================================================================
// Helpers
// ===========================================================================

fn test_app() -> App {
    let config = Config::from_defaults().unwrap();
    let datasets = load_datasets(&config).unwrap();
    let selector = RosterSelector::from_rules(&config.rules, datasets);
    App::new(config, FormState::new(selector))
}

fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

/// Feed one key through input handling and the app; return the effect.
fn send(app: &mut App, view: &mut ViewState, code: KeyCode) -> Effect {
    send_with(app, view, code, KeyModifiers::NONE)
}

fn send_with(app: &mut App, view: &mut ViewState, code: KeyCode, modifiers: KeyModifiers) -> Effect {
    match handle_key(press(code, modifiers), view, &app.form) {
        Some(cmd) => app.apply_command(cmd),
        None => Effect::None,
    }
}

fn type_text(app: &mut App, view: &mut ViewState, text: &str) {
    for c in text.chars() {
        send(app, view, KeyCode::Char(c));
    }
}

/// Fill the four identity fields, moving between them with Enter.
fn fill_identity(app: &mut App, view: &mut ViewState) {
    for value in ["Jordan", "Reyes", "jordan@example.com", "Pylon Pushers"] {
        type_text(app, view, value);
        send(app, view, KeyCode::Enter);
    }
}

/// Move the focused grid's cursor to `id` in the current display order and
/// toggle it.
fn pick(app: &mut App, view: &mut ViewState, kind: ListKind, id: u32) {
    let row = app
        .form
        .selector
        .sorted_view(kind)
        .row_of(id)
        .expect("candidate is listed");
    send(app, view, KeyCode::Home);
    for _ in 0..row {
        send(app, view, KeyCode::Down);
    }
    send(app, view, KeyCode::Char(' '));
}

// Kelce 11, A. Jones 11, Jacobs 12, Kittle 2, Barkley 0, McLaurin 4
const FORTY_TDS: [u32; 6] = [6, 7, 8, 17, 19, 40];

/// Accept one HTTP request, answer 200, and return the raw request text.
async fn mock_endpoint() -> (String, tokio::task::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf).to_string();
            if let Some(end) = text.find("\r\n\r\n") {
                let length = text[..end]
                    .lines()
                    .find_map(|l| {
                        l.to_ascii_lowercase()
                            .strip_prefix("content-length:")
                            .and_then(|v| v.trim().parse::<usize>().ok())
                    })
                    .unwrap_or(0);
                if buf.len() >= end + 4 + length {
                    break;
                }
            }
            if n == 0 {
                break;
            }
        }
        socket
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 0\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        String::from_utf8_lossy(&buf).to_string()
    });
    (format!("http://{addr}/formResponse"), handle)
}

// ===========================================================================
// Tests
// ===========================================================================

#[test]
fn enter_in_fields_never_submits() {
    let mut app = test_app();
    let mut view = ViewState::default();
    for _ in 0..4 {
        assert_eq!(send(&mut app, &mut view, KeyCode::Enter), Effect::None);
    }
    assert_eq!(view.focus, Focus::Grid(ListKind::Returning));
    assert_eq!(app.form.phase(), &FormPhase::Editing);
}

#[test]
fn premature_submit_flags_everything_then_recovers() {
    let mut app = test_app();
    let mut view = ViewState::default();

    send_with(&mut app, &mut view, KeyCode::Char('s'), KeyModifiers::CONTROL);
    assert_eq!(app.form.phase(), &FormPhase::Blocked);
    assert_eq!(app.form.errors.missing().len(), 4);
    assert!(app.form.selection_error.is_some());

    type_text(&mut app, &mut view, "J");
    assert!(!app.form.errors.first_name);
    assert!(app.form.errors.team_name);
}

#[test]
fn sorting_by_key_then_picking_from_the_top() {
    let mut app = test_app();
    let mut view = ViewState {
        focus: Focus::Grid(ListKind::Returning),
        ..ViewState::default()
    };

    // Column 5 twice: touchdowns descending
    send(&mut app, &mut view, KeyCode::Char('5'));
    send(&mut app, &mut view, KeyCode::Char('5'));
    send(&mut app, &mut view, KeyCode::Char(' '));

    let picked: Vec<u32> = app
        .form
        .selector
        .list(ListKind::Returning)
        .selection()
        .iter()
        .collect();
    // Kamara has the most touchdowns in the bundled data
    assert_eq!(picked, vec![3]);
    assert_eq!(app.form.touchdown_total(), 21);
}

#[tokio::test]
async fn full_entry_is_typed_picked_and_sent() {
    let mut app = test_app();
    let mut view = ViewState::default();

    fill_identity(&mut app, &mut view);
    assert_eq!(view.focus, Focus::Grid(ListKind::Returning));
    for id in FORTY_TDS {
        pick(&mut app, &mut view, ListKind::Returning, id);
    }
    assert_eq!(app.form.touchdown_total(), 40);

    send(&mut app, &mut view, KeyCode::Tab);
    pick(&mut app, &mut view, ListKind::Rookie, 144);

    send(&mut app, &mut view, KeyCode::Tab);
    assert_eq!(view.focus, Focus::Submit);
    let Effect::Submit(form) = send(&mut app, &mut view, KeyCode::Enter) else {
        panic!("entry should validate");
    };
    assert_eq!(app.form.phase(), &FormPhase::Submitting);

    // Keys are ignored while the request is in flight
    assert_eq!(send(&mut app, &mut view, KeyCode::Enter), Effect::None);

    let (url, server) = mock_endpoint().await;
    let (tx, mut rx) = mpsc::channel(1);
    spawn_submission(Arc::new(FormsSubmitter::new(url)), form, tx);
    let outcome = rx.recv().await.expect("an outcome is reported");
    app.apply_outcome(outcome);

    let request = server.await.unwrap();
    assert!(request.contains("entry.101112653=Jordan"));
    assert!(request.contains("entry.922791203=Pylon+Pushers"));
    assert!(request.contains("entry.1816541943=Najee+Harris"));

    match app.form.phase() {
        FormPhase::Submitted(receipt) => assert_eq!(receipt.team_name, "Pylon Pushers"),
        other => panic!("expected Submitted, got {other:?}"),
    }
    assert_eq!(send(&mut app, &mut view, KeyCode::Enter), Effect::Quit);
}
