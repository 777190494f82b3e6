// Engine modules: physics, rendering, input, assets, frame timing

pub mod assets;
pub mod frame;
pub mod input;
pub mod physics;
pub mod render;
