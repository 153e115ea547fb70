//! Application module
//!
//! Contains the core application architecture:
//! - Actions: What can happen, and the effects the reducer asks for
//! - State: What is true right now
//! - Reducer: Pure function (State, Action) -> State
//!
//! Store writes never happen inside the reducer. It queues effects, the
//! event loop applies them through the service, and the resulting store
//! notifications come back in as actions.

pub mod actions;
pub mod event;
pub mod reducer;
pub mod state;

pub use actions::{Action, Effect};
pub use reducer::reduce;
pub use state::{AppState, InputTarget, StatusBarState, UiConfig};
