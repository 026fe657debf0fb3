//! Explosion resolver
//!
//! A triggered explosive Alex shoves every other live Alex radially away
//! from itself (with an extra upward kick) and then removes itself. No
//! other entity is ever removed by an explosion.

use glam::Vec2;

use super::physics::Physics;
use super::state::{SimEvent, SimState};
use crate::consts::*;
use rand::Rng;

/// Detonate the entity with the given id
pub fn trigger_explosion<P: Physics>(state: &mut SimState, physics: &mut P, id: u32) {
    let Some(trigger) = state.entity(id).copied() else {
        log::warn!("explosion trigger: no entity with id {id}");
        return;
    };
    let Some(center) = physics.body_state(trigger.body).map(|b| b.position) else {
        return;
    };

    for entity in &state.entities {
        if entity.id == id {
            continue;
        }
        let Some(body) = physics.body_state(entity.body) else {
            continue;
        };

        let mut dir = body.position - center;
        if dir.length_squared() < BLAST_EPSILON {
            // Coincident with the blast center: pick a random up-biased
            // direction so normalization below is always defined
            dir = Vec2::new(
                state.rng.random_range(-1.0..1.0),
                state.rng.random_range(-1.5..-0.5),
            );
            if dir.length_squared() < BLAST_EPSILON {
                dir = Vec2::new(0.0, -1.0);
            }
        }
        let dir = dir.normalize();

        let strength = state.rng.random_range(BLAST_MIN_FACTOR..BLAST_MAX_FACTOR);
        let mut impulse = dir * (strength * body.mass * BLAST_IMPULSE_SCALE);
        impulse.y -= BLAST_LIFT_FACTOR * body.mass * BLAST_IMPULSE_SCALE;
        physics.apply_impulse(entity.body, impulse);
    }

    state.remove(physics, id);
    state.events.push(SimEvent::Exploded);
    log::info!("explosion at ({:.0}, {:.0})", center.x, center.y);
}
