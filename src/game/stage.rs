// Stage construction: environment config into physics bodies and scene nodes

use glam::{Vec2, Vec3};
use log::debug;

use crate::config::EnvironmentConfig;
use crate::engine::physics::PhysicsWorld;
use crate::engine::render::Scene;

const PLATFORM_COLOR: [f32; 4] = [0.33, 0.33, 0.33, 1.0];

const BACKDROP_HEIGHT: f32 = 15.0;
const BACKDROP_DEPTH: f32 = -10.0;

/// Populate the world and scene from an environment definition. The backdrop
/// is sized to the window aspect so it fills the view behind the arena.
pub fn build(env: &EnvironmentConfig, world: &mut PhysicsWorld, scene: &mut Scene, aspect: f32) {
    scene.add_textured(
        Vec3::new(0.0, BACKDROP_HEIGHT / 2.0 - 1.0, BACKDROP_DEPTH),
        Vec2::new(BACKDROP_HEIGHT * aspect, BACKDROP_HEIGHT),
        &env.background,
    );

    for platform in &env.platforms {
        let pos = Vec3::from_array(platform.pos);
        let size = Vec3::from_array(platform.size);
        world.create_fixed_body(pos, size / 2.0);
        scene.add_flat(pos, Vec2::new(size.x, size.y), PLATFORM_COLOR);
        debug!("platform at {pos} size {size}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlatformConfig;

    fn test_env() -> EnvironmentConfig {
        EnvironmentConfig {
            name: "Test Arena".to_string(),
            background: "bg.png".to_string(),
            platforms: vec![
                PlatformConfig {
                    pos: [0.0, -0.5, 0.0],
                    size: [30.0, 1.0, 5.0],
                },
                PlatformConfig {
                    pos: [-6.0, 4.0, 0.0],
                    size: [6.0, 0.5, 3.0],
                },
            ],
        }
    }

    #[test]
    fn test_build_registers_bodies_and_nodes() {
        let mut world = PhysicsWorld::new();
        let mut scene = Scene::new();
        build(&test_env(), &mut world, &mut scene, 16.0 / 9.0);

        assert_eq!(world.body_count(), 2);
        // Backdrop plus one node per platform
        assert_eq!(scene.len(), 3);
    }

    #[test]
    fn test_platforms_collide() {
        let mut world = PhysicsWorld::new();
        let mut scene = Scene::new();
        build(&test_env(), &mut world, &mut scene, 16.0 / 9.0);

        let body = world.create_capsule_body(Vec3::new(0.0, 2.0, 0.0), 0.9, 0.4, 1.0);
        for _ in 0..240 {
            world.step(1.0 / 60.0);
        }
        // Came to rest on the ground platform instead of falling through
        assert!(world.position(body).y > 1.0);
    }
}
