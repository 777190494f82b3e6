// Math utilities and helper functions

use glam::Vec3;

/// Distance between two points in the x/y plane; depth is ignored because
/// all gameplay happens at z = 0.
pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    (b.x - a.x).hypot(b.y - a.y)
}

/// Check if two f32 values are approximately equal
#[allow(dead_code)]
pub fn approx_equal(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() < epsilon
}
