//! Controller error types

use std::fmt;

use crate::preset::PresetError;

/// Error returned by [`TransitionController`](crate::TransitionController) operations
#[derive(Debug)]
pub enum CurtainsError {
    /// The preset cannot drive a transition
    InvalidPreset(PresetError),
}

impl From<PresetError> for CurtainsError {
    fn from(e: PresetError) -> Self {
        CurtainsError::InvalidPreset(e)
    }
}

impl fmt::Display for CurtainsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurtainsError::InvalidPreset(e) => write!(f, "Invalid preset: {}", e),
        }
    }
}

impl std::error::Error for CurtainsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CurtainsError::InvalidPreset(e) => Some(e),
        }
    }
}
