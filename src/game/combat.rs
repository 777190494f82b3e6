// Attack resolution
//
// A single-frame hit test at the moment the attack starts; there is no
// sustained hitbox window. Range scales with the attacker's capsule radius
// and the target must lie on the side the attacker faces.

use glam::Vec3;

use crate::core::math::planar_distance;

use super::{ATTACK_RANGE_PAD, KNOCKBACK_IMPULSE, KNOCKBACK_LIFT};

/// Range and facing test between two body centers.
pub fn hit_test(
    attacker_pos: Vec3,
    attacker_radius: f32,
    attacker_facing: f32,
    target_pos: Vec3,
) -> bool {
    let range = attacker_radius * 2.0 + ATTACK_RANGE_PAD;
    if planar_distance(attacker_pos, target_pos) >= range {
        return false;
    }

    let facing_right = attacker_facing > 0.0;
    let target_is_right = target_pos.x > attacker_pos.x;
    facing_right == target_is_right
}

/// Knockback impulse for a landed hit: horizontal away from the attacker,
/// with a fixed upward pop.
pub fn knockback(attacker_x: f32, target_x: f32) -> Vec3 {
    Vec3::new(
        (target_x - attacker_x).signum() * KNOCKBACK_IMPULSE,
        KNOCKBACK_LIFT,
        0.0,
    )
}
