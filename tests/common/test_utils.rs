#![allow(dead_code)]

use obamoid::transform::Matrix;

pub(crate) const EPSILON: f32 = 1e-5;

pub(crate) fn assert_close(a: f32, b: f32) {
    assert!((a - b).abs() < EPSILON, "{a} != {b}");
}

pub(crate) fn assert_matrix_close(a: &Matrix, b: &Matrix) {
    let a: &[f32; 16] = a.as_ref();
    let b: &[f32; 16] = b.as_ref();
    for (i, (x, y)) in a.iter().zip(b).enumerate() {
        assert!((x - y).abs() < EPSILON, "element {i}: {x} != {y}\n{a:?}\n{b:?}");
    }
}

#[cfg(feature = "integration-tests")]
pub(crate) mod gpu {
    use std::{iter, time::Duration};

    use obamoid::{
        data_structures::texture::Texture, render::Renderer, transform::Transforms,
    };

    pub(crate) const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

    pub(crate) async fn headless_device() -> (wgpu::Device, wgpu::Queue) {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .expect("Integration tests need a graphics adapter");
        adapter
            .request_device(&wgpu::DeviceDescriptor::default())
            .await
            .expect("Failed to open the graphics device")
    }

    /// Draw one frame into an offscreen texture and read it back.
    pub(crate) async fn render_to_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        renderer: &Renderer,
        transforms: &Transforms,
        clear_colour: wgpu::Color,
        (width, height): (u32, u32),
    ) -> image::RgbaImage {
        let target = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("test target"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = target.create_view(&wgpu::TextureViewDescriptor::default());
        let depth = Texture::create_depth_texture(device, [width, height], "test depth");

        renderer.write_transforms(queue, transforms);

        // rows must be 256-byte aligned for the copy
        let u32_size = std::mem::size_of::<u32>() as u32;
        assert_eq!((u32_size * width) % wgpu::COPY_BYTES_PER_ROW_ALIGNMENT, 0);
        let output_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            size: (u32_size * width * height) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            label: None,
            mapped_at_creation: false,
        });

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Test Encoder"),
        });
        renderer.encode(&mut encoder, &view, &depth.view, clear_colour, (width, height));
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                aspect: wgpu::TextureAspect::All,
                texture: &target,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &output_buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(u32_size * width),
                    rows_per_image: Some(height),
                },
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
        queue.submit(iter::once(encoder.finish()));

        let (tx, rx) = futures_intrusive::channel::shared::oneshot_channel();
        let buffer_slice = output_buffer.slice(..);
        buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
            tx.send(result).unwrap();
        });
        device
            .poll(wgpu::PollType::Wait {
                submission_index: None,
                timeout: Some(Duration::from_secs(3)),
            })
            .unwrap();
        rx.receive().await.unwrap().unwrap();
        let data = buffer_slice.get_mapped_range().to_vec();
        image::RgbaImage::from_raw(width, height, data).unwrap()
    }
}
