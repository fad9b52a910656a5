//! Input mapping from raw events to semantic actions
//!
//! Maps keyboard input to the debug hotkeys that drive the transition.

use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// Actions triggered by hotkeys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Play the configured test preset (C key)
    PlayTestPreset,
    /// Stop the running transition where it is (X key)
    CancelTransition,
    /// Clear the effect while idle (Z key)
    ResetVisual,
    /// Toggle fullscreen mode (F key)
    ToggleFullscreen,
    /// Exit application (Escape)
    Exit,
}

/// Maps raw input events to semantic actions
pub struct InputMapper;

impl InputMapper {
    /// Map keyboard input to an action
    ///
    /// Returns `None` for releases and unmapped keys
    pub fn map_keyboard(key: KeyCode, state: ElementState) -> Option<InputAction> {
        // Only handle key presses, not releases
        if state != ElementState::Pressed {
            return None;
        }

        match key {
            KeyCode::KeyC => Some(InputAction::PlayTestPreset),
            KeyCode::KeyX => Some(InputAction::CancelTransition),
            KeyCode::KeyZ => Some(InputAction::ResetVisual),
            KeyCode::KeyF => Some(InputAction::ToggleFullscreen),
            KeyCode::Escape => Some(InputAction::Exit),
            _ => None,
        }
    }
}
