//! Modal editing session for linepad.
//!
//! Routes key presses through normal, insert, command and selection modes,
//! applies them to a [`linepad_buffer::Buffer`] and reports every change to
//! a [`DisplaySurface`]. File access and the project tree are reached
//! through the [`FileService`] and [`ProjectTree`] traits.

mod actions;
pub mod chord;
mod core;
mod error;
pub mod ex_command;
pub mod keyboard;
mod mode;
pub mod motion;
pub mod selection;
pub mod services;
mod settings;
mod tree;

#[cfg(test)]
mod testing;

pub use chord::{Clock, ManualClock, SystemClock};
pub use crate::core::{EditingSession, Outcome, SessionContext};
pub use error::EditorError;
pub use ex_command::ExCommand;
pub use keyboard::EditorCommand;
pub use mode::Mode;
pub use selection::{Position, Selection};
pub use services::{
    DisplaySurface, EntryKind, FileContent, FileService, ProjectTree, RecordingSurface,
    SurfaceCall, TreeEntry,
};
pub use settings::{SessionSettings, DEFAULT_VIEWPORT_HEIGHT};
pub use tree::ProjectTreeState;
