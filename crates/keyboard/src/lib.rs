//! Keyboard input for linepad.
//!
//! Translates terminal key events into a small platform-independent key
//! model, and parses scripted key sequences for headless runs.

mod key;
mod script;

pub use key::{from_crossterm, Key, KeyInput};
pub use script::parse_key_script;
