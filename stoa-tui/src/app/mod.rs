//! Application module
//!
//! Core application architecture:
//! - Actions: what can happen
//! - State: what is true right now
//! - Keymap: KeyEvent -> Action, by mode
//! - Reducer: pure function (State, Action) -> State
//!
//! All I/O happens outside the reducer, in the service layer and the main
//! event loop.

pub mod actions;
pub mod event;
pub mod keymap;
pub mod reducer;
pub mod state;

// Re-export commonly used types
pub use actions::{Action, Screen};
pub use keymap::map_key;
pub use reducer::reduce;
pub use state::{AppState, ComposeTarget, ComposerState, MenuState, MenuTarget};
