// Retained scene graph (flat node list)

use glam::{Vec2, Vec3};

/// Index of a node in the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NodeHandle(pub(crate) usize);

/// What a node looks like
#[derive(Debug, Clone, PartialEq)]
pub enum NodeVisual {
    /// Solid color quad (RGBA)
    Flat { color: [f32; 4] },
    /// Textured quad; `asset` names an image under the asset root
    Textured { asset: String },
}

/// One drawable quad in world space
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub position: Vec3,
    /// Rotation around the y axis, radians. Fighters flip by yawing PI.
    pub yaw: f32,
    /// Quad width and height in world units
    pub size: Vec2,
    /// Texture window: offset and scale into the node's texture
    pub uv_offset: Vec2,
    pub uv_scale: Vec2,
    pub visual: NodeVisual,
}

#[derive(Debug, Default)]
pub struct Scene {
    nodes: Vec<SceneNode>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_flat(&mut self, position: Vec3, size: Vec2, color: [f32; 4]) -> NodeHandle {
        self.push(SceneNode {
            position,
            yaw: 0.0,
            size,
            uv_offset: Vec2::ZERO,
            uv_scale: Vec2::ONE,
            visual: NodeVisual::Flat { color },
        })
    }

    pub fn add_textured(&mut self, position: Vec3, size: Vec2, asset: &str) -> NodeHandle {
        self.push(SceneNode {
            position,
            yaw: 0.0,
            size,
            uv_offset: Vec2::ZERO,
            uv_scale: Vec2::ONE,
            visual: NodeVisual::Textured {
                asset: asset.to_string(),
            },
        })
    }

    fn push(&mut self, node: SceneNode) -> NodeHandle {
        self.nodes.push(node);
        NodeHandle(self.nodes.len() - 1)
    }

    pub fn node(&self, handle: NodeHandle) -> &SceneNode {
        &self.nodes[handle.0]
    }

    pub fn node_mut(&mut self, handle: NodeHandle) -> &mut SceneNode {
        &mut self.nodes[handle.0]
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
