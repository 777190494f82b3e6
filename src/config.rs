// Configuration document model
//
// The game is driven by a single JSON document describing environments
// (backdrop plus platform geometry) and characters (capsule dimensions plus
// visual representation). What to load is selected by index into these
// lists; an out-of-range selection is a fatal load-time error.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::game::state::FighterState;

/// Configuration loading and selection errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{kind} index {index} out of range ({len} available)")]
    SelectionOutOfRange {
        kind: &'static str,
        index: usize,
        len: usize,
    },
}

/// The full configuration document
#[derive(Debug, Clone, Deserialize)]
pub struct GameConfig {
    pub environments: Vec<EnvironmentConfig>,
    pub characters: Vec<CharacterConfig>,
}

impl GameConfig {
    /// Parse a configuration document from JSON text
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load and parse a configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Select an environment by index
    pub fn environment(&self, index: usize) -> Result<&EnvironmentConfig, ConfigError> {
        self.environments
            .get(index)
            .ok_or(ConfigError::SelectionOutOfRange {
                kind: "environment",
                index,
                len: self.environments.len(),
            })
    }

    /// Select a character by index
    pub fn character(&self, index: usize) -> Result<&CharacterConfig, ConfigError> {
        self.characters
            .get(index)
            .ok_or(ConfigError::SelectionOutOfRange {
                kind: "character",
                index,
                len: self.characters.len(),
            })
    }
}

/// A stage: one backdrop image and a list of platforms
#[derive(Debug, Clone, Deserialize)]
pub struct EnvironmentConfig {
    pub name: String,
    /// Backdrop image, relative to the asset root
    pub background: String,
    pub platforms: Vec<PlatformConfig>,
}

/// One fixed box collider plus its static visual, created at load time and
/// never mutated or destroyed during a session
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PlatformConfig {
    pub pos: [f32; 3],
    pub size: [f32; 3],
}

/// An immutable character descriptor
#[derive(Debug, Clone, Deserialize)]
pub struct CharacterConfig {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub visual: VisualKind,
    pub physics: CapsuleConfig,
}

/// Capsule collider dimensions. `height` is the cylindrical section; the
/// full capsule spans `height + 2 * radius`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CapsuleConfig {
    pub height: f32,
    pub radius: f32,
}

impl CapsuleConfig {
    pub fn half_height(&self) -> f32 {
        self.height / 2.0
    }
}

/// How a character is drawn, tagged by the document's `type` field
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum VisualKind {
    /// A 3D model asset whose animation is driven by external tooling.
    /// This prototype renders it as a plain placeholder quad.
    Model {
        asset: String,
        #[serde(default = "default_scale")]
        scale: f32,
    },

    /// A sprite sheet sampled per state from `sprite_data`
    Spritesheet {
        asset: String,
        #[serde(default = "default_scale")]
        scale: f32,
        #[serde(rename = "spriteData")]
        sprite_data: SpriteSheetData,
    },
}

fn default_scale() -> f32 {
    1.0
}

/// Sprite sheet layout and the per-state animation table
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpriteSheetData {
    /// Width of each frame in pixels
    pub frame_width: u32,
    /// Height of each frame in pixels
    pub frame_height: u32,
    #[serde(default = "default_scale")]
    pub scale: f32,
    /// Atlas grid: frame id maps to (column, row) by these counts
    pub columns: u32,
    pub rows: u32,
    pub animations: HashMap<FighterState, AnimationDef>,
}

/// One animation clip
#[derive(Debug, Clone, Deserialize)]
pub struct AnimationDef {
    /// Ordered frame ids within the atlas
    pub frames: Vec<u32>,
    /// Playback rate in frames per second
    pub fps: f32,
    #[serde(rename = "loop", default = "default_loop")]
    pub looping: bool,
    /// State to enter once a non-looping clip has played through.
    /// Absent means the clip holds its last frame.
    #[serde(rename = "onComplete", default)]
    pub on_complete: Option<FighterState>,
}

fn default_loop() -> bool {
    true
}
