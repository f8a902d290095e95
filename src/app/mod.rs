pub mod bridge;
pub mod cli;
pub mod config;
pub mod events;
pub mod inputs;
pub mod keys;
pub mod logging;
pub mod pages;
pub mod queue;
pub mod state;

pub use bridge::{Action, EventBridge};
pub use pages::{Focus, Modal, Page, PageController};
pub use queue::{EnqueuePolicy, PlaybackQueue};
pub use state::*;
