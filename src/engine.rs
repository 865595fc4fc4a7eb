// ── Engine ──────────────────────────────────────────────────────────────────
//
// The winit/wgpu embedding: owns the scene, the GPU renderer, and the raw
// input queue the window handler fills.  Game code mutates the scene and
// polls semantic events from `update`; the frame driver composes and
// presents after every update tick.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;

use glam::Vec2;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

use crate::backend::{Color, ImageSource, RawInput};
use crate::compositor::render_frame;
use crate::input::{self, SceneEvent};
use crate::renderer::WgpuRenderer;
use crate::scene::{DebugLabel, HexInstance, Scene, Tile};

// ── Game trait ──────────────────────────────────────────────────────────────

pub trait Game {
    fn on_enter(&mut self, _engine: &mut Engine) {}
    fn update(&mut self, engine: &mut Engine);
}

// ── Engine ──────────────────────────────────────────────────────────────────

pub struct Engine {
    /// GPU renderer — holds the WGPU surface, pipelines, and texture table.
    pub renderer: WgpuRenderer,
    scene: Scene,
    /// Raw events queued by the window handler, drained by `poll_event`.
    events: VecDeque<RawInput>,
    /// Last known cursor position (button events carry it).
    cursor: Vec2,
    dt: f32,
    tick: u64,
    /// Set by `request_quit()`; the event loop exits after the current tick.
    pub(crate) quit_requested: bool,
}

impl Engine {
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    fn from_renderer(renderer: WgpuRenderer) -> Self {
        let size = renderer.window.inner_size();
        Self {
            renderer,
            scene: Scene::new(size.width as f32, size.height as f32),
            events: VecDeque::new(),
            cursor: Vec2::ZERO,
            dt: 0.0,
            tick: 0,
            quit_requested: false,
        }
    }

    // ── Accessors ──────────────────────────────────────────────────────────

    pub fn dt(&self) -> f32 {
        self.dt
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    // ── Scene mutation (thin delegates, see `Scene` for semantics) ─────────

    pub fn set_grid(&mut self, rows: i32, cols: i32, size: f32, flat_top: bool) {
        self.scene.set_grid(rows, cols, size, flat_top);
    }

    pub fn set_camera(&mut self, offset_x: f32, offset_y: f32, zoom: f32) {
        self.scene.set_camera(offset_x, offset_y, zoom);
    }

    pub fn set_clear_color(&mut self, color: Color) {
        self.scene.set_clear_color(color);
    }

    pub fn set_instances(&mut self, instances: &[HexInstance]) {
        self.scene.set_instances(instances);
    }

    pub fn set_tiles(&mut self, tiles: &[Tile]) {
        self.scene.set_tiles(tiles);
    }

    pub fn clear_tiles(&mut self) {
        self.scene.clear_tiles();
    }

    pub fn set_debug_labels(&mut self, labels: &[DebugLabel]) {
        self.scene.set_debug_labels(labels);
    }

    // ── Textures ───────────────────────────────────────────────────────────

    pub fn load_texture(&mut self, slot: usize, source: ImageSource<'_>) -> bool {
        self.scene.load_texture(slot, source, &mut self.renderer)
    }

    pub fn unload_texture(&mut self, slot: usize) {
        self.scene.unload_texture(slot, &mut self.renderer);
    }

    pub fn clear_textures(&mut self) {
        self.scene.clear_textures(&mut self.renderer);
    }

    pub fn query_texture(&self, slot: usize) -> Option<(u32, u32)> {
        self.scene.query_texture(slot)
    }

    // ── Input ──────────────────────────────────────────────────────────────

    /// Next semantic input event, or `None` when the queue is drained.
    /// Call in a loop each update to pump everything pending.
    pub fn poll_event(&mut self) -> Option<SceneEvent> {
        input::poll_event(&self.scene, &mut self.events)
    }

    /// Signal that the application should exit.  The event loop will call
    /// `exit()` after the current update tick completes.
    pub fn request_quit(&mut self) {
        self.quit_requested = true;
    }
}

// ── EngineBuilder ───────────────────────────────────────────────────────────

pub struct EngineBuilder {
    title: String,
    width: u32,
    height: u32,
    target_ups: u32,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            title: "hexscene".into(),
            width: 1280,
            height: 800,
            target_ups: 60,
        }
    }
}

impl EngineBuilder {
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_ups(mut self, ups: u32) -> Self {
        self.target_ups = ups;
        self
    }

    pub fn run(self, game: impl Game + 'static) {
        let event_loop = EventLoop::new().unwrap();
        let fixed_dt = 1.0 / self.target_ups as f32;
        let mut app = App {
            config: self,
            game: Box::new(game),
            engine: None,
            last_instant: None,
            accumulator: 0.0,
            fixed_dt,
        };
        event_loop.run_app(&mut app).unwrap();
    }
}

// ── App (winit ApplicationHandler) ──────────────────────────────────────────

struct App {
    config: EngineBuilder,
    game: Box<dyn Game>,
    engine: Option<Engine>,
    last_instant: Option<Instant>,
    accumulator: f32,
    fixed_dt: f32,
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let window = Arc::new(
            event_loop
                .create_window(
                    Window::default_attributes()
                        .with_title(&self.config.title)
                        .with_inner_size(winit::dpi::PhysicalSize::new(
                            self.config.width,
                            self.config.height,
                        )),
                )
                .unwrap(),
        );
        let renderer = pollster::block_on(WgpuRenderer::new(window));

        let mut engine = Engine::from_renderer(renderer);
        self.game.on_enter(&mut engine);
        self.engine = Some(engine);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(engine) = self.engine.as_ref() {
            engine.renderer.window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(engine) = self.engine.as_mut() else { return };

        match event {
            // Window close is delivered to game code as a quit event; the
            // loop also exits after the next tick regardless, so a game that
            // never polls cannot leave a zombie window.
            WindowEvent::CloseRequested => {
                engine.events.push_back(RawInput::Quit);
                engine.quit_requested = true;
            }

            WindowEvent::Resized(size) => {
                engine.renderer.resize(size);
                engine
                    .scene
                    .set_window_size(size.width as f32, size.height as f32);
            }

            WindowEvent::CursorMoved { position, .. } => {
                engine.cursor = Vec2::new(position.x as f32, position.y as f32);
                engine.events.push_back(RawInput::CursorMoved {
                    x: engine.cursor.x,
                    y: engine.cursor.y,
                });
            }

            WindowEvent::MouseInput { button, state, .. } => {
                if state == ElementState::Pressed {
                    engine.events.push_back(RawInput::ButtonDown {
                        button,
                        x: engine.cursor.x,
                        y: engine.cursor.y,
                    });
                }
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        repeat,
                        ..
                    },
                ..
            } => {
                let raw = match state {
                    ElementState::Pressed => RawInput::KeyDown { key: code, repeat },
                    ElementState::Released => RawInput::KeyUp { key: code },
                };
                engine.events.push_back(raw);
            }

            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let elapsed = match self.last_instant {
                    Some(prev) => now.duration_since(prev).as_secs_f32().min(0.25),
                    None => self.fixed_dt,
                };
                self.last_instant = Some(now);
                self.accumulator += elapsed;

                while self.accumulator >= self.fixed_dt {
                    engine.dt = self.fixed_dt;
                    engine.tick += 1;
                    self.game.update(engine);
                    if engine.quit_requested {
                        event_loop.exit();
                        return;
                    }
                    self.accumulator -= self.fixed_dt;
                }

                render_frame(&engine.scene, &mut engine.renderer);
            }

            _ => {}
        }
    }
}
