//! Input handling module
//!
//! Turns key presses into the hotkey actions the app responds to.

mod input_mapper;

pub use input_mapper::{InputAction, InputMapper};
