// Game rules
//
// Everything above the engine layer: fighter records, the state machine,
// sprite animation sampling, combat resolution, stage construction, and the
// per-frame session that ties them together.

pub mod animation;
pub mod character;
pub mod combat;
pub mod session;
pub mod stage;
pub mod state;

pub use character::Fighter;
pub use session::Session;
pub use state::FighterState;

// Movement tuning

/// Horizontal speed applied directly while a move key is held (units/s)
pub const MOVE_SPEED: f32 = 7.0;
/// Upward impulse applied on a grounded jump
pub const JUMP_IMPULSE: f32 = 15.0;
/// Linear damping on fighter bodies
pub const FIGHTER_DAMPING: f32 = 1.0;
/// Ground ray reach past the capsule bottom
pub const GROUND_RAY_SLACK: f32 = 0.1;

// Combat tuning

pub const STARTING_HEALTH: i32 = 100;
/// Health lost per successful hit
pub const ATTACK_DAMAGE: i32 = 10;
/// Horizontal knockback impulse, signed away from the attacker
pub const KNOCKBACK_IMPULSE: f32 = 5.0;
/// Upward pop accompanying knockback
pub const KNOCKBACK_LIFT: f32 = 2.0;
/// Added to twice the attacker's capsule radius to form the hit range
pub const ATTACK_RANGE_PAD: f32 = 0.8;
/// Attacking reverts to Idle after this many simulated seconds
pub const ATTACK_RECOVERY: f32 = 0.5;
/// HitStun reverts to Idle after this many simulated seconds
pub const HIT_STUN_DURATION: f32 = 0.3;
