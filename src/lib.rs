pub mod backend;
pub mod camera;
pub mod compositor;
pub mod engine;
pub mod font;
pub mod geometry;
pub mod input;
pub mod renderer;
pub mod scene;

pub use backend::{Color, DrawBackend, EventSource, ImageSource, KeyCode, MouseButton, RawInput, Rect, TextureHandle};
pub use camera::{Camera, MIN_ZOOM};
pub use compositor::render_frame;
pub use engine::{Engine, EngineBuilder, Game};
pub use input::SceneEvent;
pub use scene::{DebugLabel, GridConfig, HexInstance, MAX_TEXTURE_SLOTS, Scene, Tile};
