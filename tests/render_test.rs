#![cfg(feature = "integration-tests")]

mod common;

use common::test_utils::gpu::{FORMAT, headless_device, render_to_image};
use obamoid::{render::Renderer, settings::Settings, transform::Transforms};

const SIZE: (u32, u32) = (256, 256);
const BLACK: image::Rgba<u8> = image::Rgba([0, 0, 0, 255]);

fn white_image() -> image::DynamicImage {
    image::DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
        8,
        8,
        image::Rgba([255, 255, 255, 255]),
    ))
}

#[test]
fn should_draw_texture_over_clear_colour() {
    futures::executor::block_on(async {
        let (device, queue) = headless_device().await;
        let transforms = Transforms::new(&Settings::default(), SIZE.0, SIZE.1);
        let mut renderer = Renderer::new(&device, &queue, FORMAT, &transforms).unwrap();
        renderer.set_texture(&device, &queue, Ok(white_image()));
        assert!(renderer.texture.is_loaded());

        let img = render_to_image(&device, &queue, &renderer, &transforms, wgpu::Color::BLACK, SIZE).await;

        for (x, y) in [(0, 0), (SIZE.0 - 1, 0), (0, SIZE.1 - 1), (SIZE.0 - 1, SIZE.1 - 1)] {
            assert_eq!(*img.get_pixel(x, y), BLACK, "corner ({x}, {y})");
        }
        assert_eq!(
            *img.get_pixel(SIZE.0 / 2, SIZE.1 / 2),
            image::Rgba([255, 255, 255, 255])
        );
    });
}

#[test]
fn should_draw_blank_until_texture_arrives() {
    futures::executor::block_on(async {
        let (device, queue) = headless_device().await;
        let transforms = Transforms::new(&Settings::default(), SIZE.0, SIZE.1);
        let renderer = Renderer::new(&device, &queue, FORMAT, &transforms).unwrap();
        assert!(!renderer.texture.is_loaded());

        let img = render_to_image(&device, &queue, &renderer, &transforms, wgpu::Color::BLACK, SIZE).await;

        assert_eq!(*img.get_pixel(0, 0), BLACK);
        assert_eq!(*img.get_pixel(SIZE.0 / 2, SIZE.1 / 2), image::Rgba([0, 0, 0, 0]));
    });
}

#[test]
fn should_keep_blank_texture_on_failed_load() {
    futures::executor::block_on(async {
        let (device, queue) = headless_device().await;
        let transforms = Transforms::new(&Settings::default(), SIZE.0, SIZE.1);
        let mut renderer = Renderer::new(&device, &queue, FORMAT, &transforms).unwrap();
        renderer.set_texture(
            &device,
            &queue,
            Err(obamoid::TextureError::Fetch {
                url: "missing.png".to_string(),
                message: "not found".to_string(),
            }),
        );
        assert!(!renderer.texture.is_loaded());
    });
}
