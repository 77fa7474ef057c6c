// Library root: the contest model shared by the terminal front end and the
// integration tests.

pub mod candidate;
pub mod config;
pub mod form;
pub mod selector;
pub mod sort;
pub mod submit;
pub mod validate;
