//! Transition presets
//!
//! A [`Preset`] describes the shape of one transition: how long it runs, the
//! curves that drive the shader cutoff and fade, and the static parameters
//! (tint, distortion, texture) pushed when it starts. Presets are authored as
//! RON files and are never mutated by the controller, which copies what it
//! needs when a transition begins.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use crate::color::Color;
use crate::curve::AnimationCurve;

/// Reference to the texture that holds the transition pattern
///
/// The core never resolves this; it is handed to the render sink as-is.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextureRef(String);

impl TextureRef {
    /// Create a reference from an asset path
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// The asset path
    pub fn path(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TextureRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn default_duration() -> f32 {
    2.0
}

fn default_cutoff_curve() -> AnimationCurve {
    AnimationCurve::linear(0.0, 0.0, 1.0, 1.0)
}

fn default_fade_curve() -> AnimationCurve {
    AnimationCurve::constant(1.0)
}

/// Configuration for a single transition
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    /// Length of the transition in seconds
    #[serde(default = "default_duration")]
    pub duration: f32,
    /// Mask threshold over progress
    #[serde(default = "default_cutoff_curve")]
    pub cutoff_curve: AnimationCurve,
    /// Overall opacity over progress
    #[serde(default = "default_fade_curve")]
    pub fade_curve: AnimationCurve,
    /// Run the curves from the end back to the start (a fade-in becomes a fade-out)
    #[serde(default)]
    pub reversed: bool,
    /// Shift the red and blue channels to distort the image
    #[serde(default)]
    pub distort: bool,
    /// Tint of the transition
    #[serde(default)]
    pub color: Color,
    /// Texture holding the transition pattern
    #[serde(default)]
    pub texture: Option<TextureRef>,
}

impl Default for Preset {
    fn default() -> Self {
        Self {
            duration: default_duration(),
            cutoff_curve: default_cutoff_curve(),
            fade_curve: default_fade_curve(),
            reversed: false,
            distort: false,
            color: Color::default(),
            texture: None,
        }
    }
}

impl Preset {
    /// Create a preset with the default shape
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duration in seconds
    pub fn with_duration(mut self, seconds: f32) -> Self {
        self.duration = seconds;
        self
    }

    /// Set the cutoff curve
    pub fn with_cutoff_curve(mut self, curve: AnimationCurve) -> Self {
        self.cutoff_curve = curve;
        self
    }

    /// Set the fade curve
    pub fn with_fade_curve(mut self, curve: AnimationCurve) -> Self {
        self.fade_curve = curve;
        self
    }

    /// Set whether the transition runs in reverse
    pub fn reversed(mut self, reversed: bool) -> Self {
        self.reversed = reversed;
        self
    }

    /// Set whether distortion mode is enabled
    pub fn distorted(mut self, distort: bool) -> Self {
        self.distort = distort;
        self
    }

    /// Set the tint color
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Set the transition texture
    pub fn with_texture(mut self, texture: TextureRef) -> Self {
        self.texture = Some(texture);
        self
    }

    /// Check that the preset can drive a transition
    pub fn validate(&self) -> Result<(), PresetError> {
        if self.duration.is_finite() && self.duration > 0.0 {
            Ok(())
        } else {
            Err(PresetError::InvalidDuration(self.duration))
        }
    }

    /// Parse a preset from RON text
    pub fn from_ron(source: &str) -> Result<Self, PresetError> {
        let preset: Preset = ron::from_str(source)?;
        preset.validate()?;
        Ok(preset)
    }

    /// Load a preset from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PresetError> {
        let contents = fs::read_to_string(path)?;
        Self::from_ron(&contents)
    }

    /// Save a preset to a RON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), PresetError> {
        let pretty = ron::ser::PrettyConfig::new()
            .struct_names(true)
            .enumerate_arrays(false);
        let contents = ron::ser::to_string_pretty(self, pretty)?;
        fs::write(path, contents)?;
        Ok(())
    }
}

/// Error loading, saving or validating a preset
#[derive(Debug)]
pub enum PresetError {
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// Parse error (invalid RON syntax)
    Parse(ron::error::SpannedError),
    /// Serialization error
    Serialize(ron::Error),
    /// Duration is zero, negative or not finite
    InvalidDuration(f32),
}

impl From<io::Error> for PresetError {
    fn from(e: io::Error) -> Self {
        PresetError::Io(e)
    }
}

impl From<ron::error::SpannedError> for PresetError {
    fn from(e: ron::error::SpannedError) -> Self {
        PresetError::Parse(e)
    }
}

impl From<ron::Error> for PresetError {
    fn from(e: ron::Error) -> Self {
        PresetError::Serialize(e)
    }
}

impl fmt::Display for PresetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresetError::Io(e) => write!(f, "IO error: {}", e),
            PresetError::Parse(e) => write!(f, "Parse error: {}", e),
            PresetError::Serialize(e) => write!(f, "Serialize error: {}", e),
            PresetError::InvalidDuration(d) => {
                write!(f, "Invalid duration: {} (must be greater than zero)", d)
            }
        }
    }
}

impl std::error::Error for PresetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PresetError::Io(e) => Some(e),
            PresetError::Parse(e) => Some(e),
            PresetError::Serialize(e) => Some(e),
            PresetError::InvalidDuration(_) => None,
        }
    }
}
