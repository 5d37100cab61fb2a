pub mod assets;
pub mod burst;
pub mod card;
pub mod config;
pub mod constants;
pub mod easing;
pub mod layout;
pub mod picking;
pub mod state;
pub mod tween;

pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
pub static PIXELATE_WGSL: &str = include_str!("../shaders/pixelate.wgsl");

pub use assets::*;
pub use card::*;
pub use config::*;
pub use constants::*;
pub use easing::*;
pub use state::*;
pub use tween::*;
