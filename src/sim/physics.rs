//! Physics port and its rapier2d implementation
//!
//! The simulation never talks to rapier directly: everything goes through
//! the [`Physics`] trait, so tests can substitute a scripted fake. The
//! real implementation wraps a full rapier2d pipeline and reports
//! collision-started pairs after each step.

use std::collections::HashMap;

use glam::Vec2;
use rapier2d::prelude::*;

/// Category tag attached to every body at creation. Collision handling
/// pattern-matches on these instead of comparing label strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyTag {
    /// A spawned Alex circle
    Alex,
    /// The floor slab
    Ground,
    /// Left or right boundary wall
    Wall,
    /// The wiper barrier
    Barrier,
}

/// Opaque handle for a body owned by the physics world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(u64);

impl BodyId {
    pub(crate) fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

/// Surface material for dynamic bodies
#[derive(Debug, Clone, Copy)]
pub struct Material {
    pub friction: f32,
    pub restitution: f32,
}

/// Snapshot of a live body, read back after stepping
#[derive(Debug, Clone, Copy)]
pub struct BodyState {
    pub position: Vec2,
    pub angle: f32,
    pub mass: f32,
}

/// A collision that started during the last step, with both tags resolved
#[derive(Debug, Clone, Copy)]
pub struct CollisionPair {
    pub body_a: BodyId,
    pub tag_a: BodyTag,
    pub body_b: BodyId,
    pub tag_b: BodyTag,
}

/// Narrow interface the simulation needs from a 2D rigid-body engine
pub trait Physics {
    fn create_circle(&mut self, pos: Vec2, radius: f32, material: Material, tag: BodyTag)
    -> BodyId;
    fn create_fixed_box(&mut self, pos: Vec2, half_extents: Vec2, tag: BodyTag) -> BodyId;
    fn remove_body(&mut self, id: BodyId);
    fn set_position(&mut self, id: BodyId, pos: Vec2);
    fn apply_impulse(&mut self, id: BodyId, impulse: Vec2);
    /// Advance the world by `dt` and return the collisions that started
    fn step(&mut self, dt: f32) -> Vec<CollisionPair>;
    fn body_state(&self, id: BodyId) -> Option<BodyState>;
}

/// rapier2d-backed physics world
///
/// Gravity points down the +y axis because the field uses screen
/// coordinates. Collision events are collected through rapier's channel
/// collector and sorted by body id so delivery order is deterministic.
pub struct RapierPhysics {
    pipeline: PhysicsPipeline,
    gravity: Vector<Real>,
    integration_params: IntegrationParameters,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd: CCDSolver,
    handles: HashMap<BodyId, RigidBodyHandle>,
    collider_owner: HashMap<ColliderHandle, BodyId>,
    tags: HashMap<BodyId, BodyTag>,
    next_id: u64,
}

impl RapierPhysics {
    pub fn new(gravity_y: f32) -> Self {
        Self {
            pipeline: PhysicsPipeline::new(),
            gravity: vector![0.0, gravity_y],
            integration_params: IntegrationParameters::default(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd: CCDSolver::new(),
            handles: HashMap::new(),
            collider_owner: HashMap::new(),
            tags: HashMap::new(),
            next_id: 1,
        }
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    fn register(&mut self, handle: RigidBodyHandle, collider: ColliderHandle, tag: BodyTag)
    -> BodyId {
        let id = BodyId::from_raw(self.next_id);
        self.next_id += 1;
        self.handles.insert(id, handle);
        self.collider_owner.insert(collider, id);
        self.tags.insert(id, tag);
        id
    }
}

impl Physics for RapierPhysics {
    fn create_circle(&mut self, pos: Vec2, radius: f32, material: Material, tag: BodyTag)
    -> BodyId {
        let body = RigidBodyBuilder::dynamic()
            .translation(vector![pos.x, pos.y])
            .build();
        let handle = self.bodies.insert(body);

        let collider = ColliderBuilder::ball(radius)
            .friction(material.friction)
            .restitution(material.restitution)
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .build();
        let collider_handle =
            self.colliders
                .insert_with_parent(collider, handle, &mut self.bodies);

        self.register(handle, collider_handle, tag)
    }

    fn create_fixed_box(&mut self, pos: Vec2, half_extents: Vec2, tag: BodyTag) -> BodyId {
        let body = RigidBodyBuilder::fixed()
            .translation(vector![pos.x, pos.y])
            .build();
        let handle = self.bodies.insert(body);

        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y)
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .build();
        let collider_handle =
            self.colliders
                .insert_with_parent(collider, handle, &mut self.bodies);

        self.register(handle, collider_handle, tag)
    }

    fn remove_body(&mut self, id: BodyId) {
        if let Some(handle) = self.handles.remove(&id) {
            self.bodies.remove(
                handle,
                &mut self.islands,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                true, // remove attached colliders
            );
            self.collider_owner.retain(|_, owner| *owner != id);
            self.tags.remove(&id);
        }
    }

    fn set_position(&mut self, id: BodyId, pos: Vec2) {
        if let Some(&handle) = self.handles.get(&id) {
            if let Some(body) = self.bodies.get_mut(handle) {
                body.set_translation(vector![pos.x, pos.y], true);
            }
        }
    }

    fn apply_impulse(&mut self, id: BodyId, impulse: Vec2) {
        if let Some(&handle) = self.handles.get(&id) {
            if let Some(body) = self.bodies.get_mut(handle) {
                body.apply_impulse(vector![impulse.x, impulse.y], true);
            }
        }
    }

    fn step(&mut self, dt: f32) -> Vec<CollisionPair> {
        self.integration_params.dt = dt as Real;

        let (collision_send, collision_recv) =
            rapier2d::crossbeam::channel::unbounded::<CollisionEvent>();
        let (force_send, _force_recv) =
            rapier2d::crossbeam::channel::unbounded::<ContactForceEvent>();
        let event_handler = ChannelEventCollector::new(collision_send, force_send);

        self.pipeline.step(
            &self.gravity,
            &self.integration_params,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd,
            None, // query pipeline (unused)
            &(),  // physics hooks
            &event_handler,
        );

        let mut pairs = Vec::new();
        while let Ok(event) = collision_recv.try_recv() {
            if let CollisionEvent::Started(h1, h2, _flags) = event {
                let a = self.collider_owner.get(&h1).copied();
                let b = self.collider_owner.get(&h2).copied();
                if let (Some(body_a), Some(body_b)) = (a, b) {
                    pairs.push(CollisionPair {
                        body_a,
                        tag_a: self.tags[&body_a],
                        body_b,
                        tag_b: self.tags[&body_b],
                    });
                }
            }
        }

        // Channel delivery order is not guaranteed stable; sort so callers
        // see the same pair sequence given the same simulation state.
        pairs.sort_by_key(|p| (p.body_a.min(p.body_b), p.body_a.max(p.body_b)));
        pairs
    }

    fn body_state(&self, id: BodyId) -> Option<BodyState> {
        let handle = self.handles.get(&id)?;
        let body = self.bodies.get(*handle)?;
        let trans = body.translation();
        Some(BodyState {
            position: Vec2::new(trans.x, trans.y),
            angle: body.rotation().angle(),
            mass: body.mass(),
        })
    }
}
