// TUI widget modules for each form zone.

pub mod candidate_grid;
pub mod fields;
pub mod footer;
pub mod header;
pub mod help_bar;
pub mod quit_confirm;
pub mod thank_you;
