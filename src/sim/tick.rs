//! Fixed timestep simulation tick
//!
//! One tick: consume pointer input (spawn or detonate), step the physics
//! world exactly once, dispatch the contacts it reported, then advance the
//! sweep. Fully synchronous; the registry is only mutated from here.

use glam::Vec2;
use rand::Rng;

use super::contact::dispatch_contacts;
use super::explosion::trigger_explosion;
use super::physics::Physics;
use super::state::SimState;
use super::sweep::update_sweep;
use crate::consts::*;

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Field-space position of a pointer press since the last tick
    pub pointer: Option<Vec2>,
}

/// Advance the toy by one fixed timestep
pub fn tick<P: Physics>(state: &mut SimState, physics: &mut P, input: &TickInput, dt: f32) {
    state.time_ticks += 1;

    if let Some(pos) = input.pointer {
        handle_pointer(state, physics, pos);
    }

    let pairs = physics.step(dt);
    dispatch_contacts(state, &pairs);
    update_sweep(state, physics);
}

/// A press either detonates the explosive Alex under the pointer or
/// spawns a new one. The newest Alex is drawn on top, so it gets first
/// claim on the hit test.
fn handle_pointer<P: Physics>(state: &mut SimState, physics: &mut P, pos: Vec2) {
    let hit = state
        .entities
        .iter()
        .rev()
        .filter(|e| e.is_explosive())
        .find(|e| {
            physics
                .body_state(e.body)
                .is_some_and(|b| b.position.distance(pos) < e.radius)
        })
        .map(|e| e.id);

    if let Some(id) = hit {
        trigger_explosion(state, physics, id);
        return;
    }

    let explosive = state.bump_spawn_counter();
    let radius = state.rng.random_range(ALEX_RADIUS_MIN..ALEX_RADIUS_MAX);
    state.spawn(physics, pos, radius, explosive);
}
