//! Application event loop.
//!
//! The winit event loop is the only thread of control. Window creation,
//! pointer input, resizes, the completion of the texture fetch and the frame
//! callback are all dispatched here one at a time and run to completion.
//!
//! # Lifecycle
//!
//! 1. `resumed` creates the window (on the web: binds the canvas) and sets up
//!    the GPU context, the scene and the renderer. In the browser the setup is
//!    asynchronous and arrives later as [`FlowEvent::Initialized`].
//! 2. The texture fetch starts; the mesh is drawn blank until
//!    [`FlowEvent::TextureLoaded`] delivers the image.
//! 3. Every `RedrawRequested` advances auto-rotation by the real time elapsed
//!    since the previous frame, draws, and requests the next redraw. The loop
//!    only stops when the window is closed.

use std::{fmt::Debug, sync::Arc};

use instant::{Duration, Instant};
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop, EventLoopProxy},
    window::Window,
};

use crate::{
    context::Context,
    render::Renderer,
    resources::texture::{TextureLoader, TextureResult},
    scene::Scene,
    settings::Settings,
};

pub(crate) enum FlowEvent {
    #[cfg(target_arch = "wasm32")]
    Initialized(Box<AppState>),
    TextureLoaded(TextureResult),
}

impl Debug for FlowEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            #[cfg(target_arch = "wasm32")]
            Self::Initialized(_) => f.write_str("Initialized"),
            Self::TextureLoaded(result) => f
                .debug_tuple("TextureLoaded")
                .field(&result.as_ref().map(|img| (img.width(), img.height())))
                .finish(),
        }
    }
}

/// GPU context, renderer and scene, created together once the window exists.
#[derive(Debug)]
pub(crate) struct AppState {
    ctx: Context,
    renderer: Renderer,
    scene: Scene,
    is_surface_configured: bool,
}

impl AppState {
    async fn new(window: Arc<Window>, settings: Settings) -> anyhow::Result<Self> {
        let ctx = Context::new(window, settings.clear_colour).await?;
        let (width, height) = ctx.size();
        let scene = Scene::new(settings, width, height);
        let renderer = Renderer::new(
            &ctx.device,
            &ctx.queue,
            ctx.config.format,
            &scene.transforms,
        )?;
        log::info!("Renderer ready at {width}x{height}");
        Ok(Self {
            ctx,
            renderer,
            scene,
            is_surface_configured: false,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        if self.ctx.resize(width, height) {
            self.scene.resize(width, height);
            self.is_surface_configured = true;
        }
    }

    fn load_texture(&mut self, loader: &TextureLoader, proxy: EventLoopProxy<FlowEvent>) {
        let url = self.scene.settings.texture_url;
        self.renderer.load_texture(
            &self.ctx.device,
            &self.ctx.queue,
            loader,
            url,
            move |result| {
                if proxy.send_event(FlowEvent::TextureLoaded(result)).is_err() {
                    log::warn!("Event loop closed before the texture arrived");
                }
            },
        );
    }

    fn render(&mut self, dt: Duration) -> Result<(), wgpu::SurfaceError> {
        // keep the loop going, whatever happens to this frame
        self.ctx.window.request_redraw();

        self.scene.update(dt);

        // Rendering requires the surface to be configured
        if !self.is_surface_configured {
            return Ok(());
        }
        self.renderer.render(&self.ctx, &self.scene)
    }
}

pub(crate) struct App {
    #[cfg(not(target_arch = "wasm32"))]
    async_runtime: tokio::runtime::Runtime,
    proxy: EventLoopProxy<FlowEvent>,
    // taken when the window is created so `resumed` only sets up once
    settings: Option<Settings>,
    state: Option<AppState>,
    loader: TextureLoader,
    last_time: Instant,
    error: Option<anyhow::Error>,
}

impl App {
    fn new(event_loop: &EventLoop<FlowEvent>, settings: Settings) -> anyhow::Result<Self> {
        let proxy = event_loop.create_proxy();
        #[cfg(not(target_arch = "wasm32"))]
        let async_runtime = tokio::runtime::Runtime::new()?;
        #[cfg(not(target_arch = "wasm32"))]
        let loader = TextureLoader::new(async_runtime.handle().clone());
        #[cfg(target_arch = "wasm32")]
        let loader = TextureLoader::new();
        Ok(Self {
            #[cfg(not(target_arch = "wasm32"))]
            async_runtime,
            proxy,
            settings: Some(settings),
            state: None,
            loader,
            last_time: Instant::now(),
            error: None,
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{error:#}");
        self.error = Some(error);
        event_loop.exit();
    }

    fn start(&mut self, mut state: AppState) {
        let size = state.ctx.window.inner_size();
        state.resize(size.width, size.height);
        state.load_texture(&self.loader, self.proxy.clone());
        state.ctx.window.request_redraw();
        self.last_time = Instant::now();
        self.state = Some(state);
    }
}

impl ApplicationHandler<FlowEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some(settings) = self.settings.take() else {
            return;
        };

        #[allow(unused_mut)]
        let mut window_attributes = Window::default_attributes().with_title(settings.title);

        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::JsCast;
            use winit::platform::web::WindowAttributesExtWebSys;

            let canvas = web_sys::window()
                .and_then(|window| window.document())
                .and_then(|document| document.get_element_by_id(settings.canvas_id))
                .map(|element| element.unchecked_into::<web_sys::HtmlCanvasElement>());
            if canvas.is_none() {
                log::warn!("No canvas with id `{}`, appending one", settings.canvas_id);
            }
            let append = canvas.is_none();
            window_attributes = window_attributes.with_canvas(canvas).with_append(append);
        }

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => return self.fail(event_loop, e.into()),
        };

        #[cfg(not(target_arch = "wasm32"))]
        {
            match self.async_runtime.block_on(AppState::new(window, settings)) {
                Ok(state) => self.start(state),
                Err(e) => self.fail(event_loop, e),
            }
        }

        #[cfg(target_arch = "wasm32")]
        {
            let proxy = self.proxy.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match AppState::new(window, settings).await {
                    Ok(state) => {
                        if proxy
                            .send_event(FlowEvent::Initialized(Box::new(state)))
                            .is_err()
                        {
                            log::error!("Event loop closed during setup");
                        }
                    }
                    Err(e) => log::error!("Setup failed: {e:#}"),
                }
            });
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: FlowEvent) {
        match event {
            #[cfg(target_arch = "wasm32")]
            FlowEvent::Initialized(state) => self.start(*state),
            FlowEvent::TextureLoaded(result) => {
                if let Some(state) = &mut self.state {
                    state
                        .renderer
                        .set_texture(&state.ctx.device, &state.ctx.queue, result);
                }
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = &mut self.state else {
            return;
        };

        if state.scene.on_window_event(&event) {
            return;
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => state.resize(size.width, size.height),
            WindowEvent::RedrawRequested => {
                let dt = self.last_time.elapsed();
                self.last_time = Instant::now();

                match state.render(dt) {
                    Ok(()) => {}
                    // Reconfigure the surface if it's lost or outdated
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let size = state.ctx.window.inner_size();
                        state.resize(size.width, size.height);
                    }
                    Err(e) => {
                        log::error!("Unable to render {}", e);
                    }
                }
            }
            _ => {}
        }
    }
}

/// Run the demo with the default [`Settings`].
pub fn run() -> anyhow::Result<()> {
    run_with(Settings::default())
}

pub fn run_with(settings: Settings) -> anyhow::Result<()> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Err(e) = env_logger::try_init() {
            println!("Warning: Could not initialize logger: {}", e);
        };
    }

    #[cfg(target_arch = "wasm32")]
    {
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Could not initialize logger: {e}").into());
        }
    }

    let event_loop: EventLoop<FlowEvent> = EventLoop::with_user_event().build()?;
    #[allow(unused_mut)]
    let mut app = App::new(&event_loop, settings)?;

    #[cfg(not(target_arch = "wasm32"))]
    {
        event_loop.run_app(&mut app)?;
        if let Some(e) = app.error.take() {
            return Err(e);
        }
    }

    #[cfg(target_arch = "wasm32")]
    {
        use winit::platform::web::EventLoopExtWebSys;
        // the browser keeps driving the loop after this returns
        event_loop.spawn_app(app);
    }

    Ok(())
}
