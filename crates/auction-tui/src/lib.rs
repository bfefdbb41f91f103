// Library root: re-exports the front-end modules so integration tests and
// the binary share one crate graph.

pub mod app;
pub mod protocol;
pub mod tui;
