use crate::{data_structures::texture::SceneTexture, error::TextureError, resources::load_binary};

pub type TextureResult = Result<image::DynamicImage, TextureError>;

/// `Send` natively, where callbacks cross into the tokio runtime; no bound in
/// the browser, where everything stays on the one JS thread.
#[cfg(not(target_arch = "wasm32"))]
pub trait MaybeSend: Send {}
#[cfg(not(target_arch = "wasm32"))]
impl<T: Send> MaybeSend for T {}

#[cfg(target_arch = "wasm32")]
pub trait MaybeSend {}
#[cfg(target_arch = "wasm32")]
impl<T> MaybeSend for T {}

/// Fetch and decode an image for use as the scene texture.
///
/// The result is flipped vertically: the mesh's texture coordinates count v
/// from the bottom of the image while wgpu uploads rows top first.
pub async fn fetch_texture(url: String) -> TextureResult {
    let bytes = load_binary(&url).await.map_err(|e| TextureError::Fetch {
        url: url.clone(),
        message: format!("{e:#}"),
    })?;
    let img = image::load_from_memory(&bytes).map_err(|source| TextureError::Decode {
        url: url.clone(),
        source,
    })?;
    log::info!("Loaded texture {url} ({}x{})", img.width(), img.height());
    Ok(img.flipv())
}

/// Starts texture fetches in the background.
///
/// Natively the fetch runs on a tokio runtime; in the browser it is a local
/// future on the JS event loop. Either way `on_done` receives the outcome
/// once, and is expected to forward it to the render loop.
#[derive(Clone, Debug)]
pub struct TextureLoader {
    #[cfg(not(target_arch = "wasm32"))]
    runtime: tokio::runtime::Handle,
}

impl TextureLoader {
    #[cfg(not(target_arch = "wasm32"))]
    pub fn new(runtime: tokio::runtime::Handle) -> Self {
        Self { runtime }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn new() -> Self {
        Self {}
    }

    /// Return a blank texture right away and fill it in later.
    ///
    /// The blank texture is fully usable: until the image arrives the mesh is
    /// simply drawn transparent.
    pub fn load<F>(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        url: &str,
        on_done: F,
    ) -> SceneTexture
    where
        F: FnOnce(TextureResult) + MaybeSend + 'static,
    {
        let texture = SceneTexture::blank(device, queue, layout);
        let fut = fetch_texture(url.to_string());

        #[cfg(not(target_arch = "wasm32"))]
        self.runtime.spawn(async move { on_done(fut.await) });

        #[cfg(target_arch = "wasm32")]
        wasm_bindgen_futures::spawn_local(async move { on_done(fut.await) });

        texture
    }
}
