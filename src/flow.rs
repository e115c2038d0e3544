//! Application lifecycle and the winit event loop.
//!
//! [`App`] implements winit's [`ApplicationHandler`]. On `resumed` it creates
//! the window, starts streaming textures and builds the [`AppState`]:
//!
//! - natively the async setup is driven to completion on a tokio runtime
//! - on the web it runs in `spawn_local` and reports back through a
//!   [`FlowEvent::Initialized`] user event
//!
//! Every `RedrawRequested` drains finished texture loads, composes both
//! scenes and draws them.

use std::sync::Arc;

use futures::channel::mpsc::{self, UnboundedReceiver};
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::Window,
};

use crate::{
    config::Settings,
    context::Context,
    data_structures::material::TextureKey,
    render::{Renderer, compose_overlay, compose_scene},
    resources::{LoadProgress, LoadedTexture, spawn_texture_loads},
    scene::BlockWorld,
};

pub struct AppState {
    pub ctx: Context,
    pub renderer: Renderer,
    pub scene: BlockWorld,
    settings: Settings,
    textures: UnboundedReceiver<LoadedTexture>,
    progress: LoadProgress,
}

impl AppState {
    async fn new(
        window: Arc<Window>,
        settings: Settings,
        textures: UnboundedReceiver<LoadedTexture>,
    ) -> anyhow::Result<Self> {
        let ctx = Context::new(window, &settings).await?;
        let renderer = Renderer::new(&ctx.device);
        let scene = BlockWorld::new(&settings);
        Ok(Self {
            ctx,
            renderer,
            scene,
            settings,
            textures,
            progress: LoadProgress::new(&TextureKey::ALL),
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.ctx.resize(width, height);
    }

    /// Swap in every texture that finished loading since the last frame.
    fn receive_textures(&mut self) {
        while let Ok(LoadedTexture { key, bytes }) = self.textures.try_recv() {
            let result = bytes.and_then(|bytes| {
                self.ctx
                    .textures
                    .replace(&self.ctx.device, &self.ctx.queue, key, &bytes)
            });
            let succeeded = match result {
                Ok(()) => {
                    log::info!("Loaded texture '{}'", key);
                    true
                }
                Err(e) => {
                    log::warn!("Texture '{}' stays blank: {:#}", key, e);
                    false
                }
            };
            if self.progress.finish(key, succeeded) {
                match self.progress.failed() {
                    [] => log::info!("All {} textures loaded", TextureKey::ALL.len()),
                    failed => log::warn!("Textures done, {} of them blank", failed.len()),
                }
            }
        }
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        self.receive_textures();
        let eye = self.ctx.cameras.block.orbit.position();
        let scene = compose_scene(&self.scene.world, &self.settings, eye);
        let overlay = compose_overlay(&self.scene.picker, &self.settings);
        self.renderer.draw_frame(&self.ctx, &scene, &overlay)
    }
}

pub(crate) enum FlowEvent {
    #[allow(dead_code)]
    Initialized(Box<AppState>),
}

pub struct App {
    #[cfg(not(target_arch = "wasm32"))]
    async_runtime: tokio::runtime::Runtime,
    #[allow(dead_code)]
    proxy: winit::event_loop::EventLoopProxy<FlowEvent>,
    settings: Settings,
    state: Option<AppState>,
    started: bool,
    error: Option<anyhow::Error>,
}

impl App {
    fn new(event_loop: &EventLoop<FlowEvent>, settings: Settings) -> anyhow::Result<Self> {
        let proxy = event_loop.create_proxy();
        #[cfg(not(target_arch = "wasm32"))]
        let async_runtime = tokio::runtime::Runtime::new()?;
        Ok(Self {
            #[cfg(not(target_arch = "wasm32"))]
            async_runtime,
            proxy,
            settings,
            state: None,
            started: false,
            error: None,
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{:#}", error);
        self.error = Some(error);
        event_loop.exit();
    }

    fn create_window(&self, event_loop: &ActiveEventLoop) -> anyhow::Result<Arc<Window>> {
        #[allow(unused_mut)]
        let mut window_attributes = Window::default_attributes().with_title("Block World");

        #[cfg(target_arch = "wasm32")]
        {
            use anyhow::Context as _;
            use wasm_bindgen::JsCast;
            use winit::platform::web::WindowAttributesExtWebSys;

            let canvas = web_sys::window()
                .and_then(|window| window.document())
                .and_then(|document| document.get_element_by_id(&self.settings.canvas_id))
                .with_context(|| format!("no element with id '{}'", self.settings.canvas_id))?
                .dyn_into::<web_sys::HtmlCanvasElement>()
                .map_err(|_| anyhow::anyhow!("'{}' is not a canvas", self.settings.canvas_id))?;
            window_attributes = window_attributes.with_canvas(Some(canvas));
        }

        Ok(Arc::new(event_loop.create_window(window_attributes)?))
    }
}

impl ApplicationHandler<FlowEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.started {
            return;
        }
        self.started = true;

        let window = match self.create_window(event_loop) {
            Ok(window) => window,
            Err(e) => return self.fail(event_loop, e),
        };

        let (sender, receiver) = mpsc::unbounded();
        spawn_texture_loads(
            #[cfg(not(target_arch = "wasm32"))]
            &self.async_runtime,
            &self.settings.asset_root,
            &TextureKey::ALL,
            sender,
        );

        let init_future = AppState::new(window, self.settings.clone(), receiver);

        #[cfg(not(target_arch = "wasm32"))]
        {
            match self.async_runtime.block_on(init_future) {
                Ok(state) => {
                    state.ctx.window.request_redraw();
                    self.state = Some(state);
                }
                Err(e) => self.fail(event_loop, e),
            }
        }

        #[cfg(target_arch = "wasm32")]
        {
            let proxy = self.proxy.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match init_future.await {
                    Ok(state) => {
                        if proxy
                            .send_event(FlowEvent::Initialized(Box::new(state)))
                            .is_err()
                        {
                            log::error!("Event loop closed before the renderer was ready");
                        }
                    }
                    Err(e) => log::error!("{:#}", e),
                }
            });
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: FlowEvent) {
        match event {
            FlowEvent::Initialized(state) => {
                // This is the message from our wasm `spawn_local`
                let mut state = *state;
                let size = state.ctx.window.inner_size();
                state.resize(size.width, size.height);
                state.ctx.window.request_redraw();
                self.state = Some(state);
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        state.ctx.cameras.handle_window_events(&event);
        if let Some(cursor) = state.scene.handle_window_event(&state.ctx.cameras, &event) {
            state.ctx.window.set_cursor(cursor);
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => state.resize(size.width, size.height),
            WindowEvent::ScaleFactorChanged { .. } => {
                let size = state.ctx.window.inner_size();
                state.resize(size.width, size.height);
            }
            WindowEvent::RedrawRequested => {
                match state.render() {
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
                state.ctx.window.request_redraw();
            }
            _ => {}
        }
    }
}

/// Open the window and run the demo with default settings.
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
        console_log::init_with_level(log::Level::Info)?;
    }

    let event_loop: EventLoop<FlowEvent> = EventLoop::with_user_event().build()?;
    let mut app = App::new(&event_loop, settings)?;

    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
