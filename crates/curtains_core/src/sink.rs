//! Render sink parameter set
//!
//! The full-screen pass that draws the transition is outside the core. The
//! controller only writes the five shader parameters through
//! [`CurtainsSink`]; [`MaterialParams`] is the plain in-memory parameter set
//! that GPU sinks wrap and tests read back.

use crate::color::Color;
use crate::preset::TextureRef;

/// Receiver of the transition shader parameters
pub trait CurtainsSink {
    /// Mask threshold, written every frame while a transition runs
    fn set_cutoff(&mut self, cutoff: f32);
    /// Overall opacity, written every frame while a transition runs
    fn set_fade(&mut self, fade: f32);
    /// Tint color, written when a transition starts
    fn set_color(&mut self, color: Color);
    /// Distortion mode, written when a transition starts
    fn set_distort(&mut self, distort: bool);
    /// Transition pattern texture, written when a transition starts
    fn set_texture(&mut self, texture: Option<&TextureRef>);
}

/// Stored values of the five shader parameters
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MaterialParams {
    pub cutoff: f32,
    pub fade: f32,
    pub color: Color,
    pub distort: bool,
    pub texture: Option<TextureRef>,
}

impl MaterialParams {
    /// Create a zeroed parameter set
    pub fn new() -> Self {
        Self::default()
    }
}

impl CurtainsSink for MaterialParams {
    fn set_cutoff(&mut self, cutoff: f32) {
        self.cutoff = cutoff;
    }

    fn set_fade(&mut self, fade: f32) {
        self.fade = fade;
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn set_distort(&mut self, distort: bool) {
        self.distort = distort;
    }

    fn set_texture(&mut self, texture: Option<&TextureRef>) {
        self.texture = texture.cloned();
    }
}

impl<S: CurtainsSink + ?Sized> CurtainsSink for Box<S> {
    fn set_cutoff(&mut self, cutoff: f32) {
        (**self).set_cutoff(cutoff);
    }

    fn set_fade(&mut self, fade: f32) {
        (**self).set_fade(fade);
    }

    fn set_color(&mut self, color: Color) {
        (**self).set_color(color);
    }

    fn set_distort(&mut self, distort: bool) {
        (**self).set_distort(distort);
    }

    fn set_texture(&mut self, texture: Option<&TextureRef>) {
        (**self).set_texture(texture);
    }
}
