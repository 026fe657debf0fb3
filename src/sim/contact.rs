//! Collision dispatcher
//!
//! Pure observer over the collision pairs reported by the physics step:
//! an Alex touching the ground requests a floor-contact cue, once per
//! reported pair, no debouncing. Everything else is ignored.

use super::physics::{BodyTag, CollisionPair};
use super::state::{SimEvent, SimState};

pub fn dispatch_contacts(state: &mut SimState, pairs: &[CollisionPair]) {
    for pair in pairs {
        let alex_body = match (pair.tag_a, pair.tag_b) {
            (BodyTag::Alex, BodyTag::Ground) => pair.body_a,
            (BodyTag::Ground, BodyTag::Alex) => pair.body_b,
            _ => continue,
        };

        // The body may have been removed between step and dispatch
        if state.entities.iter().any(|e| e.body == alex_body) {
            state.events.push(SimEvent::FloorContact);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::physics::Physics;
    use crate::sim::testing::FakePhysics;
    use glam::Vec2;

    fn floor_events(state: &mut SimState) -> usize {
        state
            .take_events()
            .iter()
            .filter(|e| **e == SimEvent::FloorContact)
            .count()
    }

    #[test]
    fn alex_on_ground_requests_cue_once_per_pair() {
        let mut physics = FakePhysics::new();
        let mut state = SimState::new(&mut physics, 1);
        let id = state.spawn(&mut physics, Vec2::new(100.0, 600.0), 25.0, false);
        let body = state.entity(id).unwrap().body;
        state.take_events();

        physics.push_contact(body, state.playfield.ground);
        physics.push_contact(state.playfield.ground, body); // order-insensitive
        let pairs = physics.step(1.0 / 60.0);

        dispatch_contacts(&mut state, &pairs);
        assert_eq!(floor_events(&mut state), 2);
    }

    #[test]
    fn wall_and_barrier_pairs_are_ignored() {
        let mut physics = FakePhysics::new();
        let mut state = SimState::new(&mut physics, 1);
        let id = state.spawn(&mut physics, Vec2::new(100.0, 600.0), 25.0, false);
        let body = state.entity(id).unwrap().body;
        state.take_events();

        physics.push_contact(body, state.playfield.wall_left);
        physics.push_contact(body, state.playfield.barrier);
        physics.push_contact(state.playfield.wall_right, state.playfield.ground);
        let pairs = physics.step(1.0 / 60.0);

        dispatch_contacts(&mut state, &pairs);
        assert_eq!(floor_events(&mut state), 0);
    }

    #[test]
    fn unregistered_body_is_ignored() {
        let mut physics = FakePhysics::new();
        let mut state = SimState::new(&mut physics, 1);
        let id = state.spawn(&mut physics, Vec2::new(100.0, 600.0), 25.0, false);
        let body = state.entity(id).unwrap().body;
        state.take_events();

        physics.push_contact(body, state.playfield.ground);
        let pairs = physics.step(1.0 / 60.0);

        // Entity disappears between the step and dispatch
        state.remove(&mut physics, id);
        dispatch_contacts(&mut state, &pairs);
        assert_eq!(floor_events(&mut state), 0);
    }
}
