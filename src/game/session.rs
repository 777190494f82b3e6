// Match session
//
// Owns the physics world, the scene, the input latch, and both fighters, and
// advances one frame at a time in a fixed order:
//
//   1. apply held movement and pending jumps
//   2. consume the jump edges
//   3. step physics
//   4. copy body transforms to scene nodes
//   5. advance animation clocks and sample sprite frames
//   6. resolve attack presses
//   7. update fighter states (countdowns, then physics-derived)
//   8. update facing
//
// Rendering is not part of the sequence; the session only writes scene data,
// so a whole match can run headless.

use std::f32::consts::PI;
use std::sync::Arc;

use glam::{Vec2, Vec3};
use log::{debug, info};

use crate::config::{CharacterConfig, EnvironmentConfig, VisualKind};
use crate::engine::input::InputLatch;
use crate::engine::physics::PhysicsWorld;
use crate::engine::render::Scene;

use super::animation;
use super::character::Fighter;
use super::combat;
use super::state::FighterState;
use super::{
    ATTACK_DAMAGE, ATTACK_RECOVERY, FIGHTER_DAMPING, GROUND_RAY_SLACK, HIT_STUN_DURATION,
    JUMP_IMPULSE, MOVE_SPEED,
};

/// Longest simulated step accepted from the frame clock. A stall (window
/// drag, breakpoint) resumes with one bounded step instead of a physics
/// explosion.
pub const MAX_FRAME_DT: f32 = 0.05;

const SPAWN_POINTS: [Vec3; 2] = [Vec3::new(-4.0, 2.0, 0.0), Vec3::new(4.0, 2.0, 0.0)];

/// Sprite planes are slightly shorter than the capsule so feet do not float
const SPRITE_HEIGHT_FACTOR: f32 = 0.8;

const MODEL_PLACEHOLDER_COLOR: [f32; 4] = [0.78, 0.78, 0.9, 1.0];

pub struct Session {
    world: PhysicsWorld,
    scene: Scene,
    input: InputLatch,
    fighters: [Fighter; 2],
}

impl Session {
    pub fn new(
        env: &EnvironmentConfig,
        characters: [Arc<CharacterConfig>; 2],
        aspect: f32,
    ) -> Self {
        let mut world = PhysicsWorld::new();
        let mut scene = Scene::new();
        super::stage::build(env, &mut world, &mut scene, aspect);

        let [left, right] = characters;
        let fighters = [
            spawn(&mut world, &mut scene, left, SPAWN_POINTS[0]),
            spawn(&mut world, &mut scene, right, SPAWN_POINTS[1]),
        ];
        info!(
            "session start: {} vs {} in {}",
            fighters[0].config.name, fighters[1].config.name, env.name
        );

        Self {
            world,
            scene,
            input: InputLatch::new(),
            fighters,
        }
    }

    /// Advance one frame. `dt` is the raw wall-clock delta in seconds.
    pub fn update(&mut self, dt: f32) {
        let dt = dt.min(MAX_FRAME_DT);

        self.apply_input();
        self.input.clear_jump_requests();
        self.world.step(dt);
        self.sync_scene();
        self.advance_animation(dt);
        self.resolve_attacks();
        self.update_states(dt);
        self.update_facing();
    }

    /// Held movement overwrites horizontal velocity every frame; a pending
    /// jump fires only from the ground.
    fn apply_input(&mut self) {
        for (i, fighter) in self.fighters.iter().enumerate() {
            let pad = *self.input.pad(i);
            let vx = match (pad.left, pad.right) {
                (true, false) => -MOVE_SPEED,
                (false, true) => MOVE_SPEED,
                _ => 0.0,
            };
            self.world.set_horizontal_velocity(fighter.body, vx);

            if pad.jump_requested && self.grounded(i) {
                self.world
                    .apply_impulse(fighter.body, Vec3::new(0.0, JUMP_IMPULSE, 0.0));
            }
        }
    }

    fn sync_scene(&mut self) {
        for fighter in &self.fighters {
            self.scene.node_mut(fighter.node).position = self.world.position(fighter.body);
        }
    }

    /// Advance animation clocks and push the sampled frame to the scene. A
    /// completed non-looping clip may carry a follow-up state.
    fn advance_animation(&mut self, dt: f32) {
        for fighter in &mut self.fighters {
            fighter.advance_clock(dt);

            let config = Arc::clone(&fighter.config);
            let VisualKind::Spritesheet { sprite_data, .. } = &config.visual else {
                continue;
            };
            let Some(frame) =
                animation::sample(sprite_data, fighter.state(), fighter.anim_clock(), &config.id)
            else {
                continue;
            };

            self.scene.node_mut(fighter.node).uv_offset = frame.uv_offset;
            if let Some(next) = frame.next_state {
                fighter.transition(next);
            }
        }
    }

    /// A held attack button starts an attack whenever the attacker is free
    /// to act. The hit test happens once, on the starting frame.
    fn resolve_attacks(&mut self) {
        for attacker_idx in 0..self.fighters.len() {
            if !self.input.pad(attacker_idx).attack {
                continue;
            }
            let attacker_state = self.fighters[attacker_idx].state();
            // KnockedOut is terminal, so it cannot be traded for Attacking
            if attacker_state.blocks_attack() || attacker_state == FighterState::KnockedOut {
                continue;
            }

            let target_idx = 1 - attacker_idx;
            let attacker_pos = self.world.position(self.fighters[attacker_idx].body);
            let target_pos = self.world.position(self.fighters[target_idx].body);
            let radius = self.fighters[attacker_idx].config.physics.radius;
            let facing = self.fighters[attacker_idx].facing;

            self.fighters[attacker_idx].enter_locked(FighterState::Attacking, ATTACK_RECOVERY);

            if self.fighters[target_idx].state() == FighterState::KnockedOut {
                continue;
            }
            if !combat::hit_test(attacker_pos, radius, facing, target_pos) {
                continue;
            }

            let target = &mut self.fighters[target_idx];
            target.apply_damage(ATTACK_DAMAGE);
            self.world.apply_impulse(
                target.body,
                combat::knockback(attacker_pos.x, target_pos.x),
            );
            debug!(
                "{} hits {} ({} hp left)",
                self.fighters[attacker_idx].config.id,
                self.fighters[target_idx].config.id,
                self.fighters[target_idx].health
            );

            let target = &mut self.fighters[target_idx];
            if target.health <= 0 {
                target.knockout();
                info!("{} is knocked out", target.config.name);
            } else {
                target.enter_locked(FighterState::HitStun, HIT_STUN_DURATION);
            }
        }
    }

    /// Countdown-locked states expire into Idle; free fighters take the
    /// state their motion implies. Knockout is terminal.
    fn update_states(&mut self, dt: f32) {
        for i in 0..self.fighters.len() {
            let fighter = &mut self.fighters[i];
            match fighter.state() {
                FighterState::KnockedOut => {}
                FighterState::Attacking | FighterState::HitStun => {
                    if fighter.tick_lock(dt) {
                        fighter.transition(FighterState::Idle);
                    }
                }
                _ => {
                    let grounded = self.grounded(i);
                    let v = self.world.velocity(self.fighters[i].body);
                    self.fighters[i].transition(super::state::physics_state(grounded, v.x, v.y));
                }
            }
        }
    }

    /// The fighter with the smaller x faces right; quads flip by yawing PI.
    fn update_facing(&mut self) {
        let x0 = self.world.position(self.fighters[0].body).x;
        let x1 = self.world.position(self.fighters[1].body).x;
        let facing0 = if x0 <= x1 { 1.0 } else { -1.0 };

        self.fighters[0].facing = facing0;
        self.fighters[1].facing = -facing0;
        for fighter in &self.fighters {
            self.scene.node_mut(fighter.node).yaw = if fighter.facing > 0.0 { 0.0 } else { PI };
        }
    }

    /// Ground probe: a ray from just below the capsule's cylindrical section,
    /// allowed to travel the remaining capsule radius plus a little slack.
    fn grounded(&self, index: usize) -> bool {
        let fighter = &self.fighters[index];
        let physics = &fighter.config.physics;
        self.world
            .cast_ray_down(
                fighter.body,
                physics.half_height(),
                physics.radius + GROUND_RAY_SLACK,
            )
            .is_some()
    }

    pub fn input_mut(&mut self) -> &mut InputLatch {
        &mut self.input
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn fighter(&self, index: usize) -> &Fighter {
        &self.fighters[index]
    }

    pub fn fighter_mut(&mut self, index: usize) -> &mut Fighter {
        &mut self.fighters[index]
    }

    /// Move a fighter and zero its velocity. Used for spawn-like resets.
    pub fn teleport(&mut self, index: usize, position: Vec3) {
        let body = self.fighters[index].body;
        self.world.set_position(body, position);
    }
}

fn spawn(
    world: &mut PhysicsWorld,
    scene: &mut Scene,
    config: Arc<CharacterConfig>,
    position: Vec3,
) -> Fighter {
    let physics = &config.physics;
    let body = world.create_capsule_body(
        position,
        physics.half_height(),
        physics.radius,
        FIGHTER_DAMPING,
    );

    let node = match &config.visual {
        VisualKind::Spritesheet {
            asset, sprite_data, ..
        } => {
            let height = physics.height * sprite_data.scale * SPRITE_HEIGHT_FACTOR;
            let width =
                height * sprite_data.frame_width as f32 / sprite_data.frame_height as f32;
            let node = scene.add_textured(position, Vec2::new(width, height), asset);
            scene.node_mut(node).uv_scale = Vec2::new(
                1.0 / sprite_data.columns as f32,
                1.0 / sprite_data.rows as f32,
            );
            node
        }
        VisualKind::Model { scale, .. } => {
            // Mesh loading is not wired up; stand in with a capsule-sized quad
            info!("{}: model visuals render as a placeholder quad", config.id);
            scene.add_flat(
                position,
                Vec2::new(physics.radius * 2.0 * scale, physics.height * scale),
                MODEL_PLACEHOLDER_COLOR,
            )
        }
    };

    Fighter::new(body, node, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AnimationDef, CapsuleConfig, PlatformConfig, SpriteSheetData};
    use crate::engine::input::Action;
    use std::collections::HashMap;

    const DT: f32 = 1.0 / 60.0;

    fn test_env() -> EnvironmentConfig {
        EnvironmentConfig {
            name: "Test Arena".to_string(),
            background: "bg.png".to_string(),
            platforms: vec![PlatformConfig {
                pos: [0.0, -0.5, 0.0],
                size: [30.0, 1.0, 5.0],
            }],
        }
    }

    fn model_character(id: &str) -> Arc<CharacterConfig> {
        Arc::new(CharacterConfig {
            id: id.to_string(),
            name: id.to_string(),
            visual: VisualKind::Model {
                asset: "test.glb".to_string(),
                scale: 1.0,
            },
            physics: CapsuleConfig {
                height: 1.8,
                radius: 0.4,
            },
        })
    }

    fn sprite_character(id: &str) -> Arc<CharacterConfig> {
        let mut animations = HashMap::new();
        for state in [
            FighterState::Idle,
            FighterState::Walk,
            FighterState::Jump,
            FighterState::Fall,
            FighterState::HitStun,
            FighterState::KnockedOut,
        ] {
            animations.insert(
                state,
                AnimationDef {
                    frames: vec![0, 1],
                    fps: 8.0,
                    looping: true,
                    on_complete: None,
                },
            );
        }
        animations.insert(
            FighterState::Attacking,
            AnimationDef {
                frames: vec![4, 5, 6],
                fps: 12.0,
                looping: false,
                on_complete: None,
            },
        );
        Arc::new(CharacterConfig {
            id: id.to_string(),
            name: id.to_string(),
            visual: VisualKind::Spritesheet {
                asset: "sheet.png".to_string(),
                scale: 1.0,
                sprite_data: SpriteSheetData {
                    frame_width: 64,
                    frame_height: 64,
                    scale: 1.0,
                    columns: 8,
                    rows: 8,
                    animations,
                },
            },
            physics: CapsuleConfig {
                height: 1.8,
                radius: 0.4,
            },
        })
    }

    fn model_session() -> Session {
        Session::new(
            &test_env(),
            [model_character("p1"), model_character("p2")],
            16.0 / 9.0,
        )
    }

    fn settle(session: &mut Session, frames: usize) {
        for _ in 0..frames {
            session.update(DT);
        }
    }

    /// Fighters land from their spawn points and stabilize on the ground
    #[test]
    fn test_spawn_settles_to_idle() {
        let mut session = model_session();
        settle(&mut session, 120);

        for i in 0..2 {
            assert_eq!(session.fighter(i).state(), FighterState::Idle, "fighter {i}");
        }
        assert!(session.world.position(session.fighter(0).body).x < 0.0);
        assert!(session.world.position(session.fighter(1).body).x > 0.0);
    }

    #[test]
    fn test_initial_facing() {
        let mut session = model_session();
        settle(&mut session, 10);
        assert_eq!(session.fighter(0).facing, 1.0);
        assert_eq!(session.fighter(1).facing, -1.0);
    }

    #[test]
    fn test_walk_moves_and_changes_state() {
        let mut session = model_session();
        settle(&mut session, 120);
        let start_x = session.world.position(session.fighter(0).body).x;

        session.input_mut().apply(0, Action::MoveRight, true, false);
        settle(&mut session, 30);

        assert_eq!(session.fighter(0).state(), FighterState::Walk);
        assert!(session.world.position(session.fighter(0).body).x > start_x);
    }

    #[test]
    fn test_release_returns_to_idle() {
        let mut session = model_session();
        settle(&mut session, 120);

        session.input_mut().apply(0, Action::MoveRight, true, false);
        settle(&mut session, 30);
        session.input_mut().apply(0, Action::MoveRight, false, false);
        settle(&mut session, 30);

        assert_eq!(session.fighter(0).state(), FighterState::Idle);
    }

    #[test]
    fn test_grounded_jump_goes_airborne() {
        let mut session = model_session();
        settle(&mut session, 120);

        session.input_mut().apply(0, Action::Jump, true, false);
        session.update(DT);

        assert!(session.world.velocity(session.fighter(0).body).y > 0.0);
        assert_eq!(session.fighter(0).state(), FighterState::Jump);

        // And eventually lands back to Idle
        settle(&mut session, 180);
        assert_eq!(session.fighter(0).state(), FighterState::Idle);
    }

    #[test]
    fn test_airborne_jump_request_is_discarded() {
        let mut session = model_session();
        settle(&mut session, 120);

        session.input_mut().apply(0, Action::Jump, true, false);
        session.update(DT);
        let rising_vy = session.world.velocity(session.fighter(0).body).y;
        assert!(rising_vy > 0.0);

        // Mid-air press: consumed without a second boost
        session.input_mut().apply(0, Action::Jump, true, false);
        session.update(DT);
        assert!(session.world.velocity(session.fighter(0).body).y <= rising_vy);
    }

    /// Place the fighters close enough that an attack connects
    fn close_quarters(session: &mut Session) {
        settle(session, 120);
        session.teleport(0, Vec3::new(-0.5, 1.3, 0.0));
        session.teleport(1, Vec3::new(0.5, 1.3, 0.0));
        settle(session, 10);
    }

    #[test]
    fn test_attack_in_range_lands() {
        let mut session = model_session();
        close_quarters(&mut session);

        session.input_mut().apply(0, Action::Attack, true, false);
        session.update(DT);

        assert_eq!(session.fighter(0).state(), FighterState::Attacking);
        assert_eq!(session.fighter(1).health, 90);
        assert_eq!(session.fighter(1).state(), FighterState::HitStun);
        // Knocked away from the attacker
        assert!(session.world.velocity(session.fighter(1).body).x > 0.0);
    }

    #[test]
    fn test_attack_out_of_range_whiffs() {
        let mut session = model_session();
        settle(&mut session, 120); // spawns are 8 units apart

        session.input_mut().apply(0, Action::Attack, true, false);
        session.update(DT);

        assert_eq!(session.fighter(0).state(), FighterState::Attacking);
        assert_eq!(session.fighter(1).health, 100);
        assert_eq!(session.fighter(1).state(), FighterState::Idle);
    }

    #[test]
    fn test_attack_recovery_expires_to_idle() {
        let mut session = model_session();
        settle(&mut session, 120);

        session.input_mut().apply(0, Action::Attack, true, false);
        session.update(DT);
        session.input_mut().apply(0, Action::Attack, false, false);
        assert_eq!(session.fighter(0).state(), FighterState::Attacking);

        // Recovery is 0.5s; 32 frames at 1/60 is past it
        settle(&mut session, 32);
        assert_eq!(session.fighter(0).state(), FighterState::Idle);
    }

    #[test]
    fn test_attack_blocked_while_attacking() {
        let mut session = model_session();
        close_quarters(&mut session);

        session.input_mut().apply(0, Action::Attack, true, false);
        session.update(DT);
        assert_eq!(session.fighter(1).health, 90);

        // Held button cannot land a second hit during recovery
        settle(&mut session, 10);
        assert_eq!(session.fighter(1).health, 90);
    }

    #[test]
    fn test_hit_stun_expires_to_idle() {
        let mut session = model_session();
        close_quarters(&mut session);

        session.input_mut().apply(0, Action::Attack, true, false);
        session.update(DT);
        session.input_mut().apply(0, Action::Attack, false, false);
        assert_eq!(session.fighter(1).state(), FighterState::HitStun);

        // Stun is 0.3s; give it time to expire and the body to settle
        settle(&mut session, 60);
        assert_eq!(session.fighter(1).state(), FighterState::Idle);
    }

    #[test]
    fn test_knockout_is_terminal() {
        let mut session = model_session();
        close_quarters(&mut session);
        session.fighter_mut(1).health = 10;

        session.input_mut().apply(0, Action::Attack, true, false);
        session.update(DT);

        assert_eq!(session.fighter(1).health, 0);
        assert_eq!(session.fighter(1).state(), FighterState::KnockedOut);

        settle(&mut session, 120);
        assert_eq!(session.fighter(1).state(), FighterState::KnockedOut);
    }

    #[test]
    fn test_knocked_out_target_takes_no_further_hits() {
        let mut session = model_session();
        close_quarters(&mut session);
        session.fighter_mut(1).health = 10;

        session.input_mut().apply(0, Action::Attack, true, false);
        session.update(DT);
        assert_eq!(session.fighter(1).state(), FighterState::KnockedOut);

        // Wait out recovery, then swing again
        settle(&mut session, 40);
        session.update(DT);
        assert_eq!(session.fighter(1).health, 0);
    }

    #[test]
    fn test_knocked_out_fighter_cannot_attack() {
        let mut session = model_session();
        close_quarters(&mut session);
        session.fighter_mut(1).health = 10;

        session.input_mut().apply(0, Action::Attack, true, false);
        session.update(DT);
        session.input_mut().apply(0, Action::Attack, false, false);
        assert_eq!(session.fighter(1).state(), FighterState::KnockedOut);

        // Mashing attack while down neither revives nor damages
        session.input_mut().apply(1, Action::Attack, true, false);
        settle(&mut session, 30);
        assert_eq!(session.fighter(1).state(), FighterState::KnockedOut);
        assert_eq!(session.fighter(0).health, 100);
    }

    #[test]
    fn test_health_never_increases() {
        let mut session = model_session();
        close_quarters(&mut session);

        let mut last = session.fighter(1).health;
        session.input_mut().apply(0, Action::Attack, true, false);
        for _ in 0..300 {
            session.update(DT);
            let health = session.fighter(1).health;
            assert!(health <= last);
            last = health;
        }
    }

    #[test]
    fn test_facing_flips_on_crossover() {
        let mut session = model_session();
        settle(&mut session, 120);

        session.teleport(0, Vec3::new(3.0, 1.3, 0.0));
        session.teleport(1, Vec3::new(-3.0, 1.3, 0.0));
        settle(&mut session, 10);

        assert_eq!(session.fighter(0).facing, -1.0);
        assert_eq!(session.fighter(1).facing, 1.0);
        assert_eq!(session.scene.node(session.fighter(0).node).yaw, PI);
    }

    #[test]
    fn test_sprite_uv_updates_over_time() {
        let mut session = Session::new(
            &test_env(),
            [sprite_character("s1"), sprite_character("s2")],
            16.0 / 9.0,
        );
        settle(&mut session, 120);

        let node = session.fighter(0).node;
        // Idle cycles 2 cells at 8 fps (0.125s per cell), so any 10-frame
        // window crosses at least one cell boundary
        let mut seen = Vec::new();
        for _ in 0..10 {
            session.update(DT);
            seen.push(session.scene.node(node).uv_offset);
        }
        assert!(seen.iter().any(|&uv| uv != seen[0]));
    }

    #[test]
    fn test_dt_is_clamped() {
        let mut session = model_session();
        settle(&mut session, 120);
        let y_before = session.world.position(session.fighter(0).body).y;

        // A 2 second stall must not tunnel the fighter through the floor
        session.update(2.0);
        let y_after = session.world.position(session.fighter(0).body).y;
        assert!((y_before - y_after).abs() < 0.5);
    }
}
