//! GPU-compatible data types for the curtains passes
//!
//! These types are designed to match the shader layouts exactly.
//! All types derive Pod and Zeroable for safe GPU buffer operations.

use bytemuck::{Pod, Zeroable};
use curtains_core::MaterialParams;

/// Uniforms for the curtains pass
/// Layout: 32 bytes total (must match curtains.wgsl CurtainsUniforms)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct CurtainsUniforms {
    /// Tint color (16 bytes)
    pub color: [f32; 4],
    /// Mask threshold
    pub cutoff: f32,
    /// Tint opacity
    pub fade: f32,
    /// 1 if distortion mode is on
    pub distort: u32,
    pub _padding: u32,
}

impl Default for CurtainsUniforms {
    fn default() -> Self {
        Self {
            color: [0.0; 4],
            cutoff: 0.0,
            fade: 0.0,
            distort: 0,
            _padding: 0,
        }
    }
}

impl From<&MaterialParams> for CurtainsUniforms {
    fn from(params: &MaterialParams) -> Self {
        Self {
            color: params.color.to_array(),
            cutoff: params.cutoff,
            fade: params.fade,
            distort: params.distort as u32,
            _padding: 0,
        }
    }
}

/// Uniforms for the backdrop pass
/// Layout: 32 bytes total (must match backdrop.wgsl BackdropUniforms)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct BackdropUniforms {
    /// Color at the top edge
    pub top: [f32; 4],
    /// Color at the bottom edge
    pub bottom: [f32; 4],
}

#[cfg(test)]
mod tests {
    use super::*;
    use curtains_core::Color;
    use std::mem::size_of;

    #[test]
    fn test_curtains_uniforms_size() {
        // 4 floats color + cutoff + fade + distort + padding = 32 bytes
        assert_eq!(size_of::<CurtainsUniforms>(), 32);
    }

    #[test]
    fn test_backdrop_uniforms_size() {
        assert_eq!(size_of::<BackdropUniforms>(), 32);
    }

    #[test]
    fn test_alignment() {
        assert_eq!(std::mem::align_of::<CurtainsUniforms>(), 4);
        assert_eq!(std::mem::align_of::<BackdropUniforms>(), 4);
    }

    #[test]
    fn test_from_params() {
        let params = MaterialParams {
            cutoff: 0.25,
            fade: 0.5,
            color: Color::new(1.0, 0.5, 0.0, 1.0),
            distort: true,
            texture: None,
        };
        let uniforms = CurtainsUniforms::from(&params);
        assert_eq!(uniforms.color, [1.0, 0.5, 0.0, 1.0]);
        assert_eq!(uniforms.cutoff, 0.25);
        assert_eq!(uniforms.fade, 0.5);
        assert_eq!(uniforms.distort, 1);
    }
}
