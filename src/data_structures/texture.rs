//! GPU textures and texture creation utilities.
//!
//! This module provides [`Texture`], a wrapper around WGPU texture resources,
//! and helpers for the depth buffer, the blank placeholder shown while the
//! real image is still loading, and uploads from decoded images.
//!
//! Image uploads carry a full mip chain, downscaled on the CPU, so the mesh
//! stays free of shimmer when it is drawn small.

use image::{RgbaImage, imageops::FilterType};

/// A GPU texture and its default view.
#[derive(Clone, Debug)]
pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
}

impl Texture {
    /// Standard depth buffer texture format (32-bit float).
    pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    /// Create a depth texture for depth-testing during rendering.
    ///
    /// # Arguments
    ///
    /// * `size` is [width, height] of the texture in pixels
    /// * `label` is used as a debug label for the GPU resource
    pub fn create_depth_texture(device: &wgpu::Device, size: [u32; 2], label: &str) -> Self {
        let size = wgpu::Extent3d {
            width: size[0].max(1),
            height: size[1].max(1),
            depth_or_array_layers: 1,
        };
        let desc = wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[Self::DEPTH_FORMAT],
        };
        let texture = device.create_texture(&desc);
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self { texture, view }
    }

    /// A single transparent texel. Sampling it anywhere yields `(0, 0, 0, 0)`,
    /// the same as an image that has not arrived yet.
    pub fn create_blank(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let img = image::DynamicImage::ImageRgba8(RgbaImage::new(1, 1));
        Self::from_image(device, queue, &img, Some("blank texture"))
    }

    /// Upload an already decoded image as an sRGB texture with all its mip
    /// levels.
    ///
    /// Rows are uploaded top to bottom. Flip the image beforehand if its
    /// texture coordinates count v from the bottom.
    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        img: &image::DynamicImage,
        label: Option<&str>,
    ) -> Self {
        let chain = mip_chain(&img.to_rgba8());

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label,
            size: wgpu::Extent3d {
                width: img.width(),
                height: img.height(),
                depth_or_array_layers: 1,
            },
            mip_level_count: chain.len() as u32,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        for (level, rgba) in chain.iter().enumerate() {
            let (width, height) = rgba.dimensions();
            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    aspect: wgpu::TextureAspect::All,
                    texture: &texture,
                    mip_level: level as u32,
                    origin: wgpu::Origin3d::ZERO,
                },
                rgba,
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * width),
                    rows_per_image: Some(height),
                },
                wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
            );
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }
}

/// Number of levels down to 1x1 for a texture of the given size.
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    32 - width.max(height).max(1).leading_zeros()
}

/// The image followed by its successively halved copies, each level
/// downscaled from the one before. Odd sides round down, never below 1.
pub fn mip_chain(base: &RgbaImage) -> Vec<RgbaImage> {
    let levels = mip_level_count(base.width(), base.height());
    let mut chain = Vec::with_capacity(levels as usize);
    chain.push(base.clone());
    for level in 1..levels {
        let width = (base.width() >> level).max(1);
        let height = (base.height() >> level).max(1);
        let next = image::imageops::resize(&chain[level as usize - 1], width, height, FilterType::Triangle);
        chain.push(next);
    }
    chain
}

/// Trilinear filtering across the mip chain, clamped at the edges.
pub fn create_default_sampler(device: &wgpu::Device) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::MipmapFilterMode::Linear,
        ..Default::default()
    })
}

/// The texture the mesh samples, bound at group 1.
///
/// Starts out blank and is swapped once the image has been fetched; the
/// bind group is rebuilt alongside since it references the old view. The
/// sampler is created once and shared by both.
#[derive(Debug)]
pub struct SceneTexture {
    pub texture: Texture,
    pub sampler: wgpu::Sampler,
    pub bind_group: wgpu::BindGroup,
    loaded: bool,
}

impl SceneTexture {
    pub fn blank(device: &wgpu::Device, queue: &wgpu::Queue, layout: &wgpu::BindGroupLayout) -> Self {
        let texture = Texture::create_blank(device, queue);
        let sampler = create_default_sampler(device);
        let bind_group = mk_bind_group(device, layout, &texture.view, &sampler);
        Self {
            texture,
            sampler,
            bind_group,
            loaded: false,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn populate(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        img: &image::DynamicImage,
        label: &str,
    ) {
        let texture = Texture::from_image(device, queue, img, Some(label));
        self.bind_group = mk_bind_group(device, layout, &texture.view, &self.sampler);
        self.texture = texture;
        self.loaded = true;
    }
}

fn mk_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    view: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
        label: Some("obamoid_texture_bind_group"),
    })
}
