// Sprite-sheet animation sampling
//
// Fighters carry no frame counters: the current frame is a pure function of
// the animation clock and the clip definition. A state change zeroes the
// clock, so a clip always restarts the moment its state is entered.

use glam::Vec2;
use log::warn;

use crate::config::{AnimationDef, SpriteSheetData};

use super::state::FighterState;

/// Index into a clip's frame list for the given clock position.
///
/// Looping clips wrap with period `frame_count / fps`; one-shot clips clamp
/// on their last frame.
pub fn frame_cursor(def: &AnimationDef, clock: f32) -> usize {
    let frame_count = def.frames.len();
    if frame_count == 0 || def.fps <= 0.0 {
        return 0;
    }

    if def.looping {
        let duration = frame_count as f32 / def.fps;
        // The modulo guards the float edge where clock % duration == duration
        ((clock % duration) * def.fps) as usize % frame_count
    } else {
        ((clock * def.fps) as usize).min(frame_count - 1)
    }
}

/// True once a non-looping clip has played through.
pub fn finished(def: &AnimationDef, clock: f32) -> bool {
    if def.looping || def.frames.is_empty() || def.fps <= 0.0 {
        return false;
    }
    clock >= def.frames.len() as f32 / def.fps
}

/// Normalized texture offset for an atlas frame id. Rows count from the top
/// of the image, matching the texture v axis.
pub fn atlas_offset(sheet: &SpriteSheetData, frame_id: u32) -> Vec2 {
    let col = frame_id % sheet.columns;
    let row = frame_id / sheet.columns;
    Vec2::new(
        col as f32 / sheet.columns as f32,
        row as f32 / sheet.rows as f32,
    )
}

/// Result of sampling one animation tick
pub struct SampledFrame {
    /// UV offset to write to the fighter's node
    pub uv_offset: Vec2,
    /// Follow-up state for a completed non-looping clip, if configured
    pub next_state: Option<FighterState>,
}

/// Sample the clip for `state` at `clock`.
///
/// A missing clip is a recoverable condition: it is logged and the frame
/// simply does not update this tick.
pub fn sample(
    sheet: &SpriteSheetData,
    state: FighterState,
    clock: f32,
    character_id: &str,
) -> Option<SampledFrame> {
    let Some(def) = sheet.animations.get(&state) else {
        warn!("{character_id}: no animation for state \"{}\"", state.name());
        return None;
    };
    if def.frames.is_empty() {
        warn!("{character_id}: animation \"{}\" has no frames", state.name());
        return None;
    }

    let frame_id = def.frames[frame_cursor(def, clock)];
    let next_state = if finished(def, clock) {
        def.on_complete
    } else {
        None
    };

    Some(SampledFrame {
        uv_offset: atlas_offset(sheet, frame_id),
        next_state,
    })
}
