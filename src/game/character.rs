// Fighter records
//
// A Fighter ties together a physics body, a scene node, and the immutable
// character descriptor, plus the mutable combat state: state tag, animation
// clock, lock countdown, health, and facing.
//
// Invariant: the state tag and the animation clock change together — every
// tag change zeroes the clock, so animation sampling always restarts a clip
// at the moment its state is entered.

use std::sync::Arc;

use crate::config::CharacterConfig;
use crate::engine::physics::BodyHandle;
use crate::engine::render::NodeHandle;

use super::state::FighterState;
use super::STARTING_HEALTH;

#[derive(Debug)]
pub struct Fighter {
    /// Physics body, owned by the world adapter
    pub body: BodyHandle,
    /// Visual node, owned by the scene
    pub node: NodeHandle,
    /// Shared read-only character descriptor
    pub config: Arc<CharacterConfig>,

    state: FighterState,
    /// Seconds since the last state change
    anim_clock: f32,
    /// Remaining time in a countdown-locked state (Attacking / HitStun)
    lock_remaining: f32,

    /// Not clamped at zero; KO triggers at <= 0
    pub health: i32,
    /// +1.0 faces towards positive x, -1.0 towards negative x
    pub facing: f32,
}

impl Fighter {
    pub fn new(body: BodyHandle, node: NodeHandle, config: Arc<CharacterConfig>) -> Self {
        Self {
            body,
            node,
            config,
            state: FighterState::Idle,
            anim_clock: 0.0,
            lock_remaining: 0.0,
            health: STARTING_HEALTH,
            facing: 1.0,
        }
    }

    pub fn state(&self) -> FighterState {
        self.state
    }

    pub fn anim_clock(&self) -> f32 {
        self.anim_clock
    }

    /// Advance the animation clock; monotonic within a state.
    pub fn advance_clock(&mut self, dt: f32) {
        self.anim_clock += dt;
    }

    /// Change state. A real change zeroes the animation clock; re-entering
    /// the current state is a no-op.
    pub fn transition(&mut self, next: FighterState) {
        if self.state != next {
            self.state = next;
            self.anim_clock = 0.0;
        }
    }

    /// Enter a countdown-locked state. Always resets the clock, so a fresh
    /// hit on an already-stunned target restarts its stun window.
    pub fn enter_locked(&mut self, next: FighterState, duration: f32) {
        self.state = next;
        self.anim_clock = 0.0;
        self.lock_remaining = duration;
    }

    /// Terminal knockout; cancels any running countdown.
    pub fn knockout(&mut self) {
        self.transition(FighterState::KnockedOut);
        self.lock_remaining = 0.0;
    }

    /// Advance the lock countdown. Returns true on the tick where it expires.
    pub fn tick_lock(&mut self, dt: f32) -> bool {
        if self.lock_remaining > 0.0 {
            self.lock_remaining -= dt;
            if self.lock_remaining <= 0.0 {
                self.lock_remaining = 0.0;
                return true;
            }
        }
        false
    }

    /// Health only ever decreases; there is no floor.
    pub fn apply_damage(&mut self, amount: i32) {
        self.health -= amount;
    }
}
