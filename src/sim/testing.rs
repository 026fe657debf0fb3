//! Scriptable physics port for unit tests
//!
//! Positions are whatever the test sets them to, impulses are recorded
//! instead of integrated, and collision pairs are fed in by hand. Mass
//! follows the circle area with the engine's default density so
//! mass-proportional impulse math stays meaningful.

use std::collections::HashMap;

use glam::Vec2;

use super::physics::{BodyId, BodyState, BodyTag, CollisionPair, Material, Physics};

const DENSITY: f32 = 0.001;

struct FakeBody {
    position: Vec2,
    angle: f32,
    mass: f32,
    tag: BodyTag,
}

#[derive(Default)]
pub struct FakePhysics {
    bodies: HashMap<BodyId, FakeBody>,
    /// Impulses recorded per body, in application order
    pub impulses: HashMap<BodyId, Vec<Vec2>>,
    /// Pairs returned (and drained) by the next `step`
    pub pending_pairs: Vec<CollisionPair>,
    pub removed: Vec<BodyId>,
    pub steps: u32,
    next_id: u64,
}

impl FakePhysics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a body position directly (no integration happens)
    pub fn place(&mut self, id: BodyId, pos: Vec2) {
        if let Some(body) = self.bodies.get_mut(&id) {
            body.position = pos;
        }
    }

    /// Queue a collision-started pair for the next step
    pub fn push_contact(&mut self, a: BodyId, b: BodyId) {
        let tag_a = self.bodies[&a].tag;
        let tag_b = self.bodies[&b].tag;
        self.pending_pairs.push(CollisionPair {
            body_a: a,
            tag_a,
            body_b: b,
            tag_b,
        });
    }

    pub fn impulses_for(&self, id: BodyId) -> &[Vec2] {
        self.impulses.get(&id).map_or(&[], Vec::as_slice)
    }

    fn insert(&mut self, body: FakeBody) -> BodyId {
        self.next_id += 1;
        let id = BodyId::from_raw(self.next_id);
        self.bodies.insert(id, body);
        id
    }
}

impl Physics for FakePhysics {
    fn create_circle(&mut self, pos: Vec2, radius: f32, _material: Material, tag: BodyTag)
    -> BodyId {
        self.insert(FakeBody {
            position: pos,
            angle: 0.0,
            mass: DENSITY * std::f32::consts::PI * radius * radius,
            tag,
        })
    }

    fn create_fixed_box(&mut self, pos: Vec2, _half_extents: Vec2, tag: BodyTag) -> BodyId {
        self.insert(FakeBody {
            position: pos,
            angle: 0.0,
            mass: 0.0,
            tag,
        })
    }

    fn remove_body(&mut self, id: BodyId) {
        if self.bodies.remove(&id).is_some() {
            self.removed.push(id);
        }
    }

    fn set_position(&mut self, id: BodyId, pos: Vec2) {
        self.place(id, pos);
    }

    fn apply_impulse(&mut self, id: BodyId, impulse: Vec2) {
        self.impulses.entry(id).or_default().push(impulse);
    }

    fn step(&mut self, _dt: f32) -> Vec<CollisionPair> {
        self.steps += 1;
        std::mem::take(&mut self.pending_pairs)
    }

    fn body_state(&self, id: BodyId) -> Option<BodyState> {
        self.bodies.get(&id).map(|b| BodyState {
            position: b.position,
            angle: b.angle,
            mass: b.mass,
        })
    }
}
