//! Application shell: window lifecycle, input routing, and the frame loop.

use std::cell::RefCell;
use std::sync::Arc;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes},
};

use crate::gfx::{
    picking,
    rendering::{RenderEngine, RenderError},
    scene::Scene,
};
use crate::system::{animation, builder, commands, state::SolarSystem};
use crate::ui::{
    panel::{self, LoadingFade},
    UiManager,
};

/// Background clear colors for the two themes.
const DARK_CLEAR: wgpu::Color = wgpu::Color {
    r: 0.01,
    g: 0.01,
    b: 0.03,
    a: 1.0,
};
const LIGHT_CLEAR: wgpu::Color = wgpu::Color {
    r: 0.82,
    g: 0.85,
    b: 0.92,
    a: 1.0,
};

/// Longest frame delta fed to the animation, in seconds. Keeps the orbits
/// from jumping after a long stall (window drag, suspend).
const MAX_FRAME_DELTA: f32 = 0.25;

pub struct HeliosApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
}

struct AppState {
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    ui_manager: Option<UiManager>,
    scene: Scene,
    system: SolarSystem,
    loading: Option<LoadingFade>,
    last_frame: Instant,
    cursor_position: Option<(f32, f32)>,
}

impl HeliosApp {
    /// Creates the application with entropy-seeded starting angles.
    pub async fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Creates the application from a fixed seed; every orbit phase, star,
    /// and surface texture is then reproducible.
    pub async fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(mut rng: StdRng) -> Self {
        let event_loop = EventLoop::new().expect("Failed to create event loop");

        let mut system = SolarSystem::new(&mut rng);
        let scene = builder::build_scene(&mut system, &mut rng);

        Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                window: None,
                render_engine: None,
                ui_manager: None,
                scene,
                system,
                loading: None,
                last_frame: Instant::now(),
                cursor_position: None,
            },
        }
    }

    /// Runs the event loop until the window closes.
    pub fn run(mut self) -> anyhow::Result<()> {
        let event_loop = self.event_loop.take().expect("Event loop already consumed");
        event_loop.set_control_flow(ControlFlow::Poll);

        event_loop.run_app(&mut self.app_state)?;
        Ok(())
    }
}

impl AppState {
    fn update_hover(&mut self, x: f32, y: f32) {
        let Some(render_engine) = self.render_engine.as_ref() else {
            return;
        };
        let (width, height) = render_engine.get_surface_size();
        let ray = picking::screen_to_ray(
            (x, y),
            (width as f32, height as f32),
            &self.scene.camera_manager.camera,
        );
        self.system.hovered = picking::pick(&ray, &self.system, &self.scene);
    }

    fn render(&mut self, event_loop: &ActiveEventLoop) {
        if self.render_engine.is_none() || self.window.is_none() {
            return;
        }

        let now = Instant::now();
        let delta = (now - self.last_frame).as_secs_f32().min(MAX_FRAME_DELTA);
        self.last_frame = now;

        self.scene.camera_manager.update();
        animation::advance(&mut self.system, delta);
        animation::sync_to_scene(&self.system, &mut self.scene);
        self.scene.camera_manager.camera.update_view_proj();

        // Bodies move under the pointer even while it is stationary
        if let Some((x, y)) = self.cursor_position {
            self.update_hover(x, y);
        }

        let Some(render_engine) = self.render_engine.as_mut() else {
            return;
        };
        let Some(window) = self.window.as_ref() else {
            return;
        };

        render_engine.set_clear_color(if self.system.state.theme_dark {
            DARK_CLEAR
        } else {
            LIGHT_CLEAR
        });
        render_engine.update(&self.scene.camera_manager.camera, self.scene.starfield_angle);
        self.scene.update_gpu(render_engine.queue());

        if self
            .loading
            .as_ref()
            .is_some_and(|fade| !fade.still_visible())
        {
            self.loading = None;
        }

        let pending = RefCell::new(Vec::new());
        let result = if let Some(ui_manager) = self.ui_manager.as_mut() {
            let window_clone = window.clone();
            let system = &self.system;
            let loading = self.loading.as_ref();
            let pending = &pending;
            render_engine.render_frame(
                &self.scene,
                Some(|device: &wgpu::Device,
                      queue: &wgpu::Queue,
                      encoder: &mut wgpu::CommandEncoder,
                      color_attachment: &wgpu::TextureView| {
                    ui_manager.draw(
                        device,
                        queue,
                        encoder,
                        &window_clone,
                        color_attachment,
                        |ui| {
                            panel::control_panel(ui, system, &mut pending.borrow_mut());
                            panel::hover_tooltip(ui, system);
                            if let Some(fade) = loading {
                                fade.draw(ui);
                            }
                        },
                    );
                }),
            )
        } else {
            render_engine.render_frame(
                &self.scene,
                None::<fn(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView)>,
            )
        };

        match result {
            Ok(()) => {}
            Err(RenderError::Surface(wgpu::SurfaceError::Lost))
            | Err(RenderError::Surface(wgpu::SurfaceError::Outdated)) => {
                log::warn!("surface lost, reconfiguring");
                render_engine.reconfigure_surface();
            }
            Err(RenderError::Surface(wgpu::SurfaceError::OutOfMemory)) => {
                log::error!("out of GPU memory, exiting");
                event_loop.exit();
            }
            Err(err) => {
                log::warn!("dropped frame: {err}");
            }
        }

        let theme_was_dark = self.system.state.theme_dark;
        for command in pending.into_inner() {
            commands::apply(
                command,
                &mut self.system,
                &mut self.scene.camera_manager.camera,
            );
        }
        if theme_was_dark != self.system.state.theme_dark {
            if let Some(ui_manager) = self.ui_manager.as_mut() {
                let style = ui_manager.context.style_mut();
                if self.system.state.theme_dark {
                    style.use_dark_colors();
                } else {
                    style.use_light_colors();
                }
            }
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Ok(window) = event_loop.create_window(
            WindowAttributes::default()
                .with_title("Solar System")
                .with_inner_size(winit::dpi::LogicalSize::new(1200, 800)),
        ) {
            let window_handle = Arc::new(window);
            self.window = Some(window_handle.clone());

            let (width, height) = window_handle.inner_size().into();
            self.scene
                .camera_manager
                .camera
                .resize_projection(width, height);

            let window_clone = window_handle.clone();
            let renderer =
                pollster::block_on(
                    async move { RenderEngine::new(window_clone, width, height).await },
                );

            self.scene
                .init_gpu_resources(renderer.device(), renderer.queue());

            let mut ui_manager = UiManager::new(
                renderer.device(),
                renderer.queue(),
                renderer.surface_format(),
                &window_handle,
            );
            ui_manager.update_display_size(width, height);

            self.ui_manager = Some(ui_manager);
            self.render_engine = Some(renderer);
            self.loading = Some(LoadingFade::new());
            self.last_frame = Instant::now();

            log::info!("renderer initialized at {}x{}", width, height);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        if self.render_engine.is_none() {
            return;
        }
        let Some(window) = self.window.clone() else {
            return;
        };

        // UI gets first refusal on every input event
        if let Some(ui_manager) = self.ui_manager.as_mut() {
            let ui_event: winit::event::Event<()> = winit::event::Event::WindowEvent {
                window_id,
                event: event.clone(),
            };
            if ui_manager.handle_input(&window, &ui_event) {
                self.system.hovered = None;
                window.request_redraw();
                return;
            }
        }

        match event {
            WindowEvent::KeyboardInput {
                event:
                    winit::event::KeyEvent {
                        physical_key: winit::keyboard::PhysicalKey::Code(key_code),
                        ..
                    },
                ..
            } => {
                if matches!(key_code, winit::keyboard::KeyCode::Escape) {
                    event_loop.exit();
                }
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.scene
                    .camera_manager
                    .camera
                    .resize_projection(width, height);
                if let Some(render_engine) = self.render_engine.as_mut() {
                    render_engine.resize(width, height);
                }
                if let Some(ui_manager) = self.ui_manager.as_mut() {
                    ui_manager.update_display_size(width, height);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let pos = (position.x as f32, position.y as f32);
                self.cursor_position = Some(pos);
                self.update_hover(pos.0, pos.1);
            }
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                self.render(event_loop);
            }
            _ => (),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: winit::event::DeviceEvent,
    ) {
        let Some(window) = self.window.as_ref() else {
            return;
        };

        // Camera input is suppressed while the UI owns the pointer
        if let Some(ui_manager) = self.ui_manager.as_ref() {
            let io = ui_manager.context.io();
            if io.want_capture_mouse || io.want_capture_keyboard {
                return;
            }
        }

        self.scene.camera_manager.process_event(&event, window);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}
