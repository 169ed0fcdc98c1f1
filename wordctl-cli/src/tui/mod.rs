//! Terminal word browser
//!
//! Three tabs (dictionary, favorites, history) over a scrollable list with
//! a detail pane. Network work runs on spawned tasks that post results back
//! over a channel; all state changes happen on the loop.

pub mod app;
pub mod event;
pub mod terminal;
pub mod ui;

pub use app::Tab;
pub use terminal::run;
