//! CPU side of the curtains material
//!
//! [`CurtainsMaterial`] is the sink the controller writes into. It keeps the
//! current parameter set and remembers what changed so the pass only
//! re-uploads uniforms and re-binds the transition texture when needed.

use curtains_core::{Color, CurtainsSink, MaterialParams, TextureRef};

use crate::types::CurtainsUniforms;

/// Parameter set with change tracking
#[derive(Debug)]
pub struct CurtainsMaterial {
    params: MaterialParams,
    uniforms_dirty: bool,
    texture_dirty: bool,
}

impl CurtainsMaterial {
    /// Create a zeroed material; the first sync uploads everything
    pub fn new() -> Self {
        Self {
            params: MaterialParams::new(),
            uniforms_dirty: true,
            texture_dirty: true,
        }
    }

    /// Current parameter values
    pub fn params(&self) -> &MaterialParams {
        &self.params
    }

    /// Uniform block for the current values
    pub fn uniforms(&self) -> CurtainsUniforms {
        CurtainsUniforms::from(&self.params)
    }

    /// Return and clear the "uniforms changed" flag
    pub fn take_uniforms_dirty(&mut self) -> bool {
        std::mem::take(&mut self.uniforms_dirty)
    }

    /// Return and clear the "texture changed" flag
    pub fn take_texture_dirty(&mut self) -> bool {
        std::mem::take(&mut self.texture_dirty)
    }
}

impl Default for CurtainsMaterial {
    fn default() -> Self {
        Self::new()
    }
}

impl CurtainsSink for CurtainsMaterial {
    fn set_cutoff(&mut self, cutoff: f32) {
        self.params.set_cutoff(cutoff);
        self.uniforms_dirty = true;
    }

    fn set_fade(&mut self, fade: f32) {
        self.params.set_fade(fade);
        self.uniforms_dirty = true;
    }

    fn set_color(&mut self, color: Color) {
        self.params.set_color(color);
        self.uniforms_dirty = true;
    }

    fn set_distort(&mut self, distort: bool) {
        self.params.set_distort(distort);
        self.uniforms_dirty = true;
    }

    fn set_texture(&mut self, texture: Option<&TextureRef>) {
        if self.params.texture.as_ref() != texture {
            self.params.set_texture(texture);
            self.texture_dirty = true;
        }
    }
}
