// Rendering: a retained scene of textured quads drawn by a wgpu renderer
//
// The scene is plain data so game logic can be driven and tested without a
// GPU; only the Renderer touches wgpu.

mod camera;
mod renderer;
mod scene;
mod texture;

pub use camera::Camera;
pub use renderer::Renderer;
pub use scene::{NodeHandle, NodeVisual, Scene, SceneNode};
pub use texture::Texture;
