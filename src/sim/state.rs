//! Simulation state and core types
//!
//! All mutable toy state lives in [`SimState`]: the entity registry, the
//! sweep state machine, the creation counter and the seeded RNG. Physics
//! bodies are owned by the physics port; the registry only holds handles.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::physics::{BodyId, BodyTag, Material, Physics};
use crate::consts::*;

/// Which sprite an Alex presents as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntityKind {
    #[default]
    Normal,
    Explosive,
}

/// A spawned circle, backed by a physics body
#[derive(Debug, Clone, Copy)]
pub struct Entity {
    pub id: u32,
    pub body: BodyId,
    pub radius: f32,
    pub kind: EntityKind,
}

impl Entity {
    pub fn is_explosive(&self) -> bool {
        self.kind == EntityKind::Explosive
    }
}

/// Direction the wiper bar is currently moving
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SweepPhase {
    #[default]
    Forward,
    Backward,
}

/// Wiper bar state machine data
#[derive(Debug, Clone, Copy, Default)]
pub struct SweepState {
    pub active: bool,
    pub bar_x: f32,
    pub phase: SweepPhase,
    /// Ticks spent in the current phase; resets at each direction flip
    pub phase_ticks: u32,
}

/// Things that happened during a tick, drained by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimEvent {
    /// An Alex was spawned
    Spawned { explosive: bool },
    /// An Alex touched the floor
    FloorContact,
    /// An explosive Alex was triggered
    Exploded,
    /// The wiper started moving
    SweepStarted,
    /// The wiper finished and reset
    SweepStopped,
}

/// Static field bodies, created once at startup
#[derive(Debug, Clone, Copy)]
pub struct Playfield {
    pub ground: BodyId,
    pub wall_left: BodyId,
    pub wall_right: BodyId,
    pub barrier: BodyId,
}

impl Playfield {
    /// Ground slab, side walls and the parked wiper barrier
    pub fn create<P: Physics>(physics: &mut P) -> Self {
        let (w, h) = (FIELD_WIDTH, FIELD_HEIGHT);
        Self {
            ground: physics.create_fixed_box(
                Vec2::new(w / 2.0, h - GROUND_INSET),
                Vec2::new(w / 2.0, GROUND_HALF_THICKNESS),
                BodyTag::Ground,
            ),
            wall_left: physics.create_fixed_box(
                Vec2::new(0.0, h / 2.0),
                Vec2::new(WALL_HALF_THICKNESS, h / 2.0),
                BodyTag::Wall,
            ),
            wall_right: physics.create_fixed_box(
                Vec2::new(w, h / 2.0),
                Vec2::new(WALL_HALF_THICKNESS, h / 2.0),
                BodyTag::Wall,
            ),
            barrier: physics.create_fixed_box(
                Vec2::new(0.0, h / 2.0),
                Vec2::new(BARRIER_HALF_WIDTH, h / 2.0),
                BodyTag::Barrier,
            ),
        }
    }
}

/// Complete toy state
pub struct SimState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Live entities, insertion order
    pub entities: Vec<Entity>,
    pub sweep: SweepState,
    /// Total spawns ever; never reset. Every Nth spawn is explosive.
    pub spawn_counter: u32,
    pub playfield: Playfield,
    /// Events accumulated this tick
    pub events: Vec<SimEvent>,
    next_id: u32,
}

impl SimState {
    pub fn new<P: Physics>(physics: &mut P, seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            entities: Vec::new(),
            sweep: SweepState::default(),
            spawn_counter: 0,
            playfield: Playfield::create(physics),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Register a new Alex: physics body plus registry record
    pub fn spawn<P: Physics>(
        &mut self,
        physics: &mut P,
        pos: Vec2,
        radius: f32,
        explosive: bool,
    ) -> u32 {
        let body = physics.create_circle(
            pos,
            radius,
            Material {
                friction: ALEX_FRICTION,
                restitution: ALEX_RESTITUTION,
            },
            BodyTag::Alex,
        );

        let id = self.next_id;
        self.next_id += 1;
        self.entities.push(Entity {
            id,
            body,
            radius,
            kind: if explosive {
                EntityKind::Explosive
            } else {
                EntityKind::Normal
            },
        });
        self.events.push(SimEvent::Spawned { explosive });
        id
    }

    /// Remove an Alex from the registry and the physics world.
    /// Unknown ids are a logged no-op, not a panic.
    pub fn remove<P: Physics>(&mut self, physics: &mut P, id: u32) {
        match self.entities.iter().position(|e| e.id == id) {
            Some(index) => {
                let entity = self.entities.remove(index);
                physics.remove_body(entity.body);
            }
            None => log::warn!("remove: no entity with id {id}"),
        }
    }

    pub fn entity(&self, id: u32) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn count(&self) -> usize {
        self.entities.len()
    }

    /// Advance the creation counter; true when this spawn is the explosive one
    pub fn bump_spawn_counter(&mut self) -> bool {
        self.spawn_counter += 1;
        self.spawn_counter.is_multiple_of(EXPLOSIVE_SPAWN_PERIOD)
    }

    /// The wiper band renders one tick before sweeping begins
    pub fn barrier_visible(&self) -> bool {
        self.entities.len() >= SWEEP_THRESHOLD || self.sweep.active
    }

    /// Drain the events accumulated since the last call
    pub fn take_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::testing::FakePhysics;

    #[test]
    fn spawn_registers_entity_and_body() {
        let mut physics = FakePhysics::new();
        let mut state = SimState::new(&mut physics, 7);

        let id = state.spawn(&mut physics, Vec2::new(100.0, 100.0), 25.0, false);
        assert_eq!(state.count(), 1);
        let entity = state.entity(id).unwrap();
        assert_eq!(entity.radius, 25.0);
        assert!(!entity.is_explosive());
        assert!(physics.body_state(entity.body).is_some());
    }

    #[test]
    fn remove_deletes_record_and_body() {
        let mut physics = FakePhysics::new();
        let mut state = SimState::new(&mut physics, 7);

        let id = state.spawn(&mut physics, Vec2::new(100.0, 100.0), 25.0, false);
        let body = state.entity(id).unwrap().body;

        state.remove(&mut physics, id);
        assert_eq!(state.count(), 0);
        assert!(physics.body_state(body).is_none());

        // Unknown id: no panic, nothing changes
        state.remove(&mut physics, id);
        assert_eq!(state.count(), 0);
    }

    #[test]
    fn entities_iterate_in_insertion_order() {
        let mut physics = FakePhysics::new();
        let mut state = SimState::new(&mut physics, 7);

        let a = state.spawn(&mut physics, Vec2::ZERO, 20.0, false);
        let b = state.spawn(&mut physics, Vec2::ZERO, 20.0, false);
        let c = state.spawn(&mut physics, Vec2::ZERO, 20.0, false);

        let ids: Vec<u32> = state.entities.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![a, b, c]);
    }

    #[test]
    fn every_ninetieth_spawn_is_explosive() {
        let mut physics = FakePhysics::new();
        let mut state = SimState::new(&mut physics, 7);

        for n in 1..=270u32 {
            let explosive = state.bump_spawn_counter();
            assert_eq!(explosive, n % 90 == 0, "spawn {n}");
        }
    }

    #[test]
    fn barrier_visible_at_threshold_or_while_active() {
        let mut physics = FakePhysics::new();
        let mut state = SimState::new(&mut physics, 7);
        assert!(!state.barrier_visible());

        for _ in 0..SWEEP_THRESHOLD {
            state.spawn(&mut physics, Vec2::ZERO, 20.0, false);
        }
        assert!(state.barrier_visible());

        // Population can drop below threshold while the sweep still runs
        state.entities.clear();
        state.sweep.active = true;
        assert!(state.barrier_visible());
    }
}
