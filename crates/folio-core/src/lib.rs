pub mod camera;
pub mod constants;
pub mod error;
pub mod input;
pub mod lifecycle;
pub mod navigation;
pub mod noise_source;
pub mod particles;
pub mod projects;
pub mod smoothing;
pub mod terrain;
pub mod world;

pub use camera::*;
pub use constants::*;
pub use error::{CoreError, Result};
pub use input::*;
pub use lifecycle::*;
pub use navigation::*;
pub use noise_source::*;
pub use particles::*;
pub use projects::*;
pub use smoothing::*;
pub use terrain::*;
pub use world::*;

// Shaders bundled as string constants
pub static BILLBOARD_WGSL: &str = include_str!("../shaders/billboard.wgsl");
pub static MESH_WGSL: &str = include_str!("../shaders/mesh.wgsl");
