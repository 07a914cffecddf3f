//! Colour and depth textures.

use crate::error::{RenderError, Result};
use procgen::TextureData;
use std::path::Path;

/// Depth attachment for the geometry pass.
pub struct DepthTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
}

impl DepthTexture {
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    /// Depth attachment sized to the surface.
    pub fn new(device: &wgpu::Device, width: u32, height: u32, label: &str) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }
}

/// Sampled colour texture with its default view and sampler.
pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl Texture {

    /// Upload a procedurally generated texture.
    pub fn from_texture_data(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &TextureData,
        label: &str,
    ) -> Self {
        Self::from_rgba8(device, queue, &data.to_bytes(), data.width, data.height, label)
    }

    /// Load an image file (PNG or JPEG) and upload it as sRGB.
    ///
    /// Images larger than the device's 2D texture limit are rejected.
    pub fn from_path(device: &wgpu::Device, queue: &wgpu::Queue, path: &Path) -> Result<Self> {
        let image = image::open(path)?.to_rgba8();
        let (width, height) = image.dimensions();
        check_dimensions(width, height, device.limits().max_texture_dimension_2d)?;
        log::info!("Loaded texture {:?} ({}x{})", path, width, height);
        let label = path.to_string_lossy();
        Ok(Self::from_rgba8(device, queue, image.as_raw(), width, height, &label))
    }

    /// Upload tightly packed RGBA8 texels.
    pub fn from_rgba8(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        rgba: &[u8],
        width: u32,
        height: u32,
        label: &str,
    ) -> Self {
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            rgba,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        // Repeat in U so the seam column (s = 1) samples the same texels as s = 0.
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Surface Sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Self { texture, view, sampler }
    }
}

/// Reject sizes the device cannot allocate as a 2D texture.
fn check_dimensions(width: u32, height: u32, max_dimension: u32) -> Result<()> {
    if width == 0 || height == 0 || width > max_dimension || height > max_dimension {
        return Err(RenderError::GpuResourceFailure(format!(
            "texture is {}x{}, device allows 1..={} per side",
            width, height, max_dimension
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_within_limit_pass() {
        assert!(check_dimensions(1, 1, 8192).is_ok());
        assert!(check_dimensions(8192, 4096, 8192).is_ok());
    }

    #[test]
    fn oversized_image_is_a_resource_failure() {
        let err = check_dimensions(16384, 8192, 8192).unwrap_err();
        assert!(matches!(err, RenderError::GpuResourceFailure(_)));
        assert!(err.to_string().contains("16384x8192"));

        assert!(check_dimensions(100, 9000, 8192).is_err());
    }

    #[test]
    fn empty_image_is_rejected() {
        assert!(check_dimensions(0, 10, 8192).is_err());
    }
}
