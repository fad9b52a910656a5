//! Transition texture loading
//!
//! Presets refer to their pattern texture by asset path. [`TextureCache`]
//! resolves those paths relative to an asset root, uploads each image once,
//! and hands back a generated horizontal wipe when no texture is set or the
//! file cannot be read.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use curtains_core::TextureRef;
use wgpu::util::DeviceExt;

/// Texture format for transition patterns (channels are data, not color)
pub const TRANSITION_TEXTURE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// RGBA8 pixels of a left-to-right wipe
///
/// Blue ramps from 0 to 255 across the width; red and green sit at the
/// midpoint so distortion mode has no direction to push along.
pub fn wipe_gradient(width: u32, height: u32) -> Vec<u8> {
    let width = width.max(1);
    let height = height.max(1);
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);

    for _y in 0..height {
        for x in 0..width {
            let t = if width > 1 {
                x as f32 / (width - 1) as f32
            } else {
                0.0
            };
            pixels.extend_from_slice(&[128, 128, (t * 255.0).round() as u8, 255]);
        }
    }
    pixels
}

/// Uploaded transition textures keyed by reference
pub struct TextureCache {
    asset_root: PathBuf,
    views: HashMap<TextureRef, wgpu::TextureView>,
    failed: Vec<TextureRef>,
    fallback: wgpu::TextureView,
}

impl TextureCache {
    /// Create a cache that loads from `asset_root`
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        asset_root: impl Into<PathBuf>,
        fallback_size: u32,
    ) -> Self {
        let size = fallback_size.max(1);
        let fallback = upload_rgba(
            device,
            queue,
            "Fallback Transition Texture",
            size,
            size,
            &wipe_gradient(size, size),
        );

        Self {
            asset_root: asset_root.into(),
            views: HashMap::new(),
            failed: Vec::new(),
            fallback,
        }
    }

    /// Full path of a texture reference on disk
    pub fn resolve_path(&self, texture: &TextureRef) -> PathBuf {
        self.asset_root.join(texture.path())
    }

    /// View for `texture`, loading it on first use
    ///
    /// Falls back to the generated wipe when `texture` is `None` or cannot be
    /// loaded. A failed load is only reported once.
    pub fn get_or_load(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        texture: Option<&TextureRef>,
    ) -> &wgpu::TextureView {
        let Some(texture) = texture else {
            return &self.fallback;
        };

        if !self.views.contains_key(texture) && !self.failed.contains(texture) {
            let path = self.resolve_path(texture);
            match load_rgba(&path) {
                Ok(image) => {
                    let (width, height) = image.dimensions();
                    let view = upload_rgba(
                        device,
                        queue,
                        texture.path(),
                        width,
                        height,
                        image.as_raw(),
                    );
                    log::info!("Loaded transition texture {} ({}x{})", texture, width, height);
                    self.views.insert(texture.clone(), view);
                }
                Err(e) => {
                    log::warn!(
                        "Failed to load transition texture {}: {}. Using fallback wipe.",
                        path.display(),
                        e
                    );
                    self.failed.push(texture.clone());
                }
            }
        }

        self.views.get(texture).unwrap_or(&self.fallback)
    }
}

fn load_rgba(path: &Path) -> Result<image::RgbaImage, image::ImageError> {
    Ok(image::open(path)?.to_rgba8())
}

fn upload_rgba(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    label: &str,
    width: u32,
    height: u32,
    pixels: &[u8],
) -> wgpu::TextureView {
    let texture = device.create_texture_with_data(
        queue,
        &wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: TRANSITION_TEXTURE_FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        },
        wgpu::util::TextureDataOrder::LayerMajor,
        pixels,
    );
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wipe_gradient_size() {
        assert_eq!(wipe_gradient(4, 2).len(), 4 * 2 * 4);
        assert_eq!(wipe_gradient(0, 0).len(), 4);
    }

    #[test]
    fn test_wipe_gradient_ramps_blue() {
        let pixels = wipe_gradient(3, 1);
        let blue: Vec<u8> = pixels.chunks(4).map(|p| p[2]).collect();
        assert_eq!(blue, vec![0, 128, 255]);
        // Neutral distortion direction
        assert!(pixels.chunks(4).all(|p| p[0] == 128 && p[1] == 128 && p[3] == 255));
    }

    #[test]
    fn test_wipe_gradient_rows_match() {
        let pixels = wipe_gradient(5, 3);
        let row = 5 * 4;
        assert_eq!(&pixels[0..row], &pixels[row..2 * row]);
        assert_eq!(&pixels[0..row], &pixels[2 * row..3 * row]);
    }
}
