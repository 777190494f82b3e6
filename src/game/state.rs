// Fighter state tags and transition rules

use serde::Deserialize;

/// Logical state of a fighter. Selects the animation clip and gates combat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FighterState {
    /// Standing still on ground
    Idle,
    /// Moving horizontally on ground
    Walk,
    /// Airborne, moving upward
    Jump,
    /// Airborne, moving downward
    Fall,
    /// Swinging; reverts to Idle when the recovery countdown expires
    Attacking,
    /// Staggered by a hit; reverts to Idle when the stun countdown expires
    HitStun,
    /// Health reached zero. Terminal: nothing reverts it
    KnockedOut,
}

impl Default for FighterState {
    fn default() -> Self {
        Self::Idle
    }
}

impl FighterState {
    /// Locked states ignore physics-derived transitions; they only exit via
    /// their countdowns (or never, for `KnockedOut`).
    pub fn is_locked(&self) -> bool {
        matches!(self, Self::Attacking | Self::HitStun | Self::KnockedOut)
    }

    /// Attack input is ignored while one of these is active
    pub fn blocks_attack(&self) -> bool {
        matches!(self, Self::Attacking | Self::HitStun)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Walk => "walk",
            Self::Jump => "jump",
            Self::Fall => "fall",
            Self::Attacking => "attacking",
            Self::HitStun => "hit_stun",
            Self::KnockedOut => "knocked_out",
        }
    }
}

/// Velocities below this count as standing still, so the state does not
/// flicker from solver noise.
pub const SPEED_EPSILON: f32 = 0.1;

/// Derive the physics-driven state for an unlocked fighter.
pub fn physics_state(grounded: bool, vx: f32, vy: f32) -> FighterState {
    if !grounded {
        if vy > SPEED_EPSILON {
            FighterState::Jump
        } else {
            FighterState::Fall
        }
    } else if vx.abs() > SPEED_EPSILON {
        FighterState::Walk
    } else {
        FighterState::Idle
    }
}
