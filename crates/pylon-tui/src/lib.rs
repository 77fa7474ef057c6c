// Library root: exposes the application and TUI modules to the binary and
// the integration tests.

pub mod app;
pub mod tui;
