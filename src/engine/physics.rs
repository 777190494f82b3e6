// Physics world adapter over rapier3d
//
// The simulation is 2.5D: gameplay happens in the x/y plane at z = 0, depth
// exists only for stage dressing. Characters are rotation-locked dynamic
// capsules, platforms are fixed cuboids. Handles live for the whole session;
// nothing is ever despawned.

use glam::Vec3;
use rapier3d::prelude::*;

/// Handle to a rigid body registered with the world
pub type BodyHandle = rapier3d::prelude::RigidBodyHandle;

/// Gravity along y. Doubled earth gravity; jump arcs are tuned against it.
pub const GRAVITY_Y: f32 = -19.62;

const PLATFORM_FRICTION: f32 = 0.3;
const FIGHTER_FRICTION: f32 = 0.7;

/// Physics world that owns all bodies and colliders and advances them
pub struct PhysicsWorld {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    impulse_joint_set: ImpulseJointSet,
    multibody_joint_set: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    bodies: RigidBodySet,
    colliders: ColliderSet,
}

impl PhysicsWorld {
    pub fn new() -> Self {
        Self::with_gravity(vector![0.0, GRAVITY_Y, 0.0])
    }

    pub fn with_gravity(gravity: Vector<Real>) -> Self {
        Self {
            gravity,
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
        }
    }

    /// Advance the whole world by `dt` simulated seconds. All body
    /// transforms update in place; the query pipeline is refreshed for the
    /// ray casts that follow.
    pub fn step(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
    }

    /// Register an immovable box collider for stage geometry.
    pub fn create_fixed_body(&mut self, position: Vec3, half_extents: Vec3) -> BodyHandle {
        let body = RigidBodyBuilder::fixed()
            .translation(vector![position.x, position.y, position.z])
            .build();
        let handle = self.bodies.insert(body);

        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .friction(PLATFORM_FRICTION)
            .restitution(0.0)
            .build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);

        handle
    }

    /// Register a character body: dynamic capsule, rotation locked so it can
    /// never tip over, CCD enabled against tunneling through thin platforms.
    pub fn create_capsule_body(
        &mut self,
        position: Vec3,
        half_height: f32,
        radius: f32,
        damping: f32,
    ) -> BodyHandle {
        let body = RigidBodyBuilder::dynamic()
            .translation(vector![position.x, position.y, position.z])
            .locked_axes(LockedAxes::ROTATION_LOCKED)
            .linear_damping(damping)
            .ccd_enabled(true)
            .can_sleep(false)
            .build();
        let handle = self.bodies.insert(body);

        let collider = ColliderBuilder::capsule_y(half_height, radius)
            .friction(FIGHTER_FRICTION)
            .restitution(0.0)
            .build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);

        handle
    }

    pub fn position(&self, handle: BodyHandle) -> Vec3 {
        let t = self.bodies[handle].translation();
        Vec3::new(t.x, t.y, t.z)
    }

    pub fn velocity(&self, handle: BodyHandle) -> Vec3 {
        let v = self.bodies[handle].linvel();
        Vec3::new(v.x, v.y, v.z)
    }

    /// Teleport a body and zero its velocity.
    pub fn set_position(&mut self, handle: BodyHandle, position: Vec3) {
        let body = &mut self.bodies[handle];
        body.set_translation(vector![position.x, position.y, position.z], true);
        body.set_linvel(vector![0.0, 0.0, 0.0], true);
    }

    /// Overwrite the x velocity, keep y, zero z. A direct assignment:
    /// horizontal motion carries no inertia or acceleration curve.
    pub fn set_horizontal_velocity(&mut self, handle: BodyHandle, vx: f32) {
        let body = &mut self.bodies[handle];
        let v = *body.linvel();
        body.set_linvel(vector![vx, v.y, 0.0], true);
    }

    /// Instantaneous velocity change, scaled by the body's mass.
    pub fn apply_impulse(&mut self, handle: BodyHandle, impulse: Vec3) {
        self.bodies[handle].apply_impulse(vector![impulse.x, impulse.y, impulse.z], true);
    }

    /// Downward ray for ground checks, excluding the casting body itself.
    /// The origin sits `start_offset` below the body center; returns the
    /// distance to the first hit within `max_dist`.
    pub fn cast_ray_down(
        &self,
        handle: BodyHandle,
        start_offset: f32,
        max_dist: f32,
    ) -> Option<f32> {
        let origin = self.bodies[handle].translation();
        let ray = Ray::new(
            point![origin.x, origin.y - start_offset, origin.z],
            vector![0.0, -1.0, 0.0],
        );
        let filter = QueryFilter::default().exclude_rigid_body(handle);
        self.query_pipeline
            .cast_ray(&self.bodies, &self.colliders, &ray, max_dist, true, filter)
            .map(|(_, toi)| toi)
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}
