use image::GenericImageView;
use obamoid::{
    TextureError,
    data_structures::texture::{mip_chain, mip_level_count},
    resources::texture::fetch_texture,
    settings::Settings,
};

#[tokio::test]
async fn shipped_texture_loads_flipped() {
    let img = fetch_texture(Settings::default().texture_url.to_string())
        .await
        .unwrap();
    assert_eq!(img.dimensions(), (256, 256));
    // the bottom-left quadrant of the file ends up in the first row
    assert_eq!(img.get_pixel(0, 0), image::Rgba([240, 200, 80, 255]));
    assert_eq!(img.get_pixel(0, 255), image::Rgba([200, 60, 60, 255]));
}

#[tokio::test]
async fn missing_texture_is_a_fetch_error() {
    let err = fetch_texture("does-not-exist.png".to_string())
        .await
        .unwrap_err();
    match err {
        TextureError::Fetch { url, .. } => assert_eq!(url, "does-not-exist.png"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn mip_levels_reach_one_texel() {
    assert_eq!(mip_level_count(1, 1), 1);
    assert_eq!(mip_level_count(256, 256), 9);
    assert_eq!(mip_level_count(300, 20), 9);
    assert_eq!(mip_level_count(0, 0), 1);
}

#[test]
fn mip_chain_halves_each_level() {
    let base = image::RgbaImage::from_pixel(300, 20, image::Rgba([10, 20, 30, 255]));
    let chain = mip_chain(&base);
    let sizes: Vec<(u32, u32)> = chain.iter().map(|level| level.dimensions()).collect();
    assert_eq!(
        sizes,
        [
            (300, 20),
            (150, 10),
            (75, 5),
            (37, 2),
            (18, 1),
            (9, 1),
            (4, 1),
            (2, 1),
            (1, 1),
        ]
    );
    // a flat colour stays flat all the way down
    assert_eq!(*chain[8].get_pixel(0, 0), image::Rgba([10, 20, 30, 255]));
}
