//! Client-side Sync Layer
//!
//! Keeps the UI's view of the todo list consistent with the store across
//! unordered command completions and pushed invalidations.

mod bridge;
mod controller;
mod pending_input;
mod view_state;

#[cfg(test)]
mod testing;

pub use bridge::{Subscription, TauriBridge};
pub use controller::SyncController;
pub use pending_input::PendingInput;
pub use view_state::{NoticeKind, ViewState};

/// Controller type used by the app
pub type AppSync = SyncController<TauriBridge>;
