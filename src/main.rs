// Interactive demo: a hex board with hover highlight, click-to-select, and
// WASD/+- camera controls.  Mirrors the embedding pattern the engine is
// designed for — mutate the scene, poll semantic events, repeat.

use hexscene::{Color, DebugLabel, Engine, EngineBuilder, Game, KeyCode, SceneEvent, Tile};

const ROWS: i32 = 20;
const COLS: i32 = 28;
const HEX_SIZE: f32 = 22.0;
const PAN_SPEED: f32 = 260.0;
const ZOOM_STEP: f32 = 1.08;

const HOVER_TINT: Color = Color::rgba(255, 255, 160, 70);
const SELECT_TINT: Color = Color::rgba(120, 220, 120, 120);

struct Demo {
    hovered: Option<(i32, i32)>,
    selected: Option<(i32, i32)>,
    cam_x: f32,
    cam_y: f32,
    zoom: f32,
    pan: [bool; 4], // W A S D held
    dirty: bool,
}

impl Demo {
    fn new() -> Self {
        Self {
            hovered: None,
            selected: None,
            cam_x: 0.0,
            cam_y: 0.0,
            zoom: 1.0,
            pan: [false; 4],
            dirty: true,
        }
    }

    fn rebuild(&self, engine: &mut Engine) {
        let mut tiles = Vec::with_capacity((ROWS * COLS) as usize);
        for r in 0..ROWS {
            for q in 0..COLS {
                let mut tile = Tile::at(q, r - q / 2);
                if self.selected == Some((tile.q, tile.r)) {
                    tile.overlay = SELECT_TINT;
                } else if self.hovered == Some((tile.q, tile.r)) {
                    tile.overlay = HOVER_TINT;
                }
                tiles.push(tile);
            }
        }
        engine.set_tiles(&tiles);

        let mut labels = Vec::new();
        if let Some((q, r)) = self.selected {
            labels.push(DebugLabel::new(q, r, format!("{q},{r}")));
        }
        engine.set_debug_labels(&labels);
    }

    fn set_pan_key(&mut self, key: KeyCode, held: bool) {
        match key {
            KeyCode::KeyW => self.pan[0] = held,
            KeyCode::KeyA => self.pan[1] = held,
            KeyCode::KeyS => self.pan[2] = held,
            KeyCode::KeyD => self.pan[3] = held,
            _ => {}
        }
    }
}

impl Game for Demo {
    fn on_enter(&mut self, engine: &mut Engine) {
        engine.set_grid(ROWS, COLS, HEX_SIZE, true);
        engine.set_clear_color(Color::rgba(18, 20, 26, 255));
        self.rebuild(engine);
    }

    fn update(&mut self, engine: &mut Engine) {
        while let Some(event) = engine.poll_event() {
            match event {
                SceneEvent::Quit => engine.request_quit(),
                SceneEvent::KeyDown(KeyCode::Escape) => engine.request_quit(),
                SceneEvent::KeyDown(key) => {
                    match key {
                        KeyCode::Minus | KeyCode::NumpadSubtract => {
                            self.zoom /= ZOOM_STEP;
                        }
                        KeyCode::Equal | KeyCode::NumpadAdd => {
                            self.zoom *= ZOOM_STEP;
                        }
                        _ => self.set_pan_key(key, true),
                    }
                }
                SceneEvent::KeyUp(key) => self.set_pan_key(key, false),
                SceneEvent::Hover { q, r } => {
                    if self.hovered != Some((q, r)) {
                        self.hovered = Some((q, r));
                        self.dirty = true;
                    }
                }
                SceneEvent::PrimaryClick { q, r } => {
                    self.selected = Some((q, r));
                    self.dirty = true;
                }
                SceneEvent::SecondaryClick { .. } => {
                    self.selected = None;
                    self.dirty = true;
                }
            }
        }

        let dt = engine.dt();
        let step = PAN_SPEED * dt / self.zoom.max(0.05);
        if self.pan[0] {
            self.cam_y += step;
        }
        if self.pan[2] {
            self.cam_y -= step;
        }
        if self.pan[1] {
            self.cam_x += step;
        }
        if self.pan[3] {
            self.cam_x -= step;
        }
        engine.set_camera(self.cam_x, self.cam_y, self.zoom);

        if self.dirty {
            self.rebuild(engine);
            self.dirty = false;
        }
    }
}

fn main() {
    EngineBuilder::default()
        .with_title("hexscene demo")
        .with_size(1280, 800)
        .run(Demo::new());
}
