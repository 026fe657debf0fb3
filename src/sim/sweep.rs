//! Wiper sweep controller
//!
//! Once the population reaches the threshold, a full-height barrier starts
//! at the left edge and works its way right in long forward strokes and
//! short backward strokes. While it runs, anything pushed past the right
//! edge of the field is removed. When the bar leaves the field it resets
//! and goes dormant.

use glam::Vec2;

use super::physics::Physics;
use super::state::{SimEvent, SimState, SweepPhase, SweepState};
use crate::consts::*;

/// Advance the sweep state machine by one tick
pub fn update_sweep<P: Physics>(state: &mut SimState, physics: &mut P) {
    if state.entities.len() >= SWEEP_THRESHOLD && !state.sweep.active {
        state.sweep = SweepState {
            active: true,
            ..SweepState::default()
        };
        physics.set_position(
            state.playfield.barrier,
            Vec2::new(0.0, FIELD_HEIGHT / 2.0),
        );
        state.events.push(SimEvent::SweepStarted);
        log::info!("sweep started at population {}", state.entities.len());
    }

    if !state.sweep.active {
        return;
    }

    match state.sweep.phase {
        SweepPhase::Forward => {
            state.sweep.bar_x += SWEEP_FORWARD_STEP;
            state.sweep.phase_ticks += 1;
            if state.sweep.phase_ticks >= SWEEP_FORWARD_TICKS {
                state.sweep.phase = SweepPhase::Backward;
                state.sweep.phase_ticks = 0;
            }
        }
        SweepPhase::Backward => {
            state.sweep.bar_x -= SWEEP_BACKWARD_STEP;
            state.sweep.phase_ticks += 1;
            if state.sweep.phase_ticks >= SWEEP_BACKWARD_TICKS {
                state.sweep.phase = SweepPhase::Forward;
                state.sweep.phase_ticks = 0;
            }
        }
    }
    physics.set_position(
        state.playfield.barrier,
        Vec2::new(state.sweep.bar_x, FIELD_HEIGHT / 2.0),
    );

    // While the wiper runs, any Alex whose right edge reaches the field
    // boundary is removed -- keyed on the entity, not on bar contact.
    let swept: Vec<u32> = state
        .entities
        .iter()
        .filter(|e| {
            physics
                .body_state(e.body)
                .is_some_and(|b| b.position.x + e.radius >= FIELD_WIDTH)
        })
        .map(|e| e.id)
        .collect();
    for id in swept {
        state.remove(physics, id);
    }

    if state.sweep.bar_x > FIELD_WIDTH + SWEEP_EXIT_MARGIN {
        state.sweep = SweepState::default();
        physics.set_position(
            state.playfield.barrier,
            Vec2::new(0.0, FIELD_HEIGHT / 2.0),
        );
        state.events.push(SimEvent::SweepStopped);
        log::info!("sweep finished");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::testing::FakePhysics;
    use proptest::prelude::*;

    fn populated_state(count: usize) -> (SimState, FakePhysics) {
        let mut physics = FakePhysics::new();
        let mut state = SimState::new(&mut physics, 42);
        for _ in 0..count {
            state.spawn(&mut physics, Vec2::new(100.0, 100.0), 20.0, false);
        }
        state.take_events();
        (state, physics)
    }

    #[test]
    fn dormant_below_threshold() {
        let (mut state, mut physics) = populated_state(SWEEP_THRESHOLD - 1);

        for _ in 0..500 {
            update_sweep(&mut state, &mut physics);
        }
        assert!(!state.sweep.active);
        assert_eq!(state.sweep.bar_x, 0.0);
        assert!(state.take_events().is_empty());
    }

    #[test]
    fn activates_at_threshold_and_starts_at_left_edge() {
        let (mut state, mut physics) = populated_state(SWEEP_THRESHOLD);

        update_sweep(&mut state, &mut physics);
        assert!(state.sweep.active);
        // First active tick has already advanced one forward step from x=0
        assert_eq!(state.sweep.bar_x, SWEEP_FORWARD_STEP);

        let events = state.take_events();
        assert_eq!(events, vec![SimEvent::SweepStarted]);
    }

    #[test]
    fn started_event_fires_once_per_activation() {
        let (mut state, mut physics) = populated_state(SWEEP_THRESHOLD);

        for _ in 0..50 {
            update_sweep(&mut state, &mut physics);
        }
        let starts = state
            .take_events()
            .iter()
            .filter(|e| **e == SimEvent::SweepStarted)
            .count();
        assert_eq!(starts, 1);
    }

    #[test]
    fn net_drift_is_forty_per_cycle() {
        let (mut state, mut physics) = populated_state(SWEEP_THRESHOLD);

        update_sweep(&mut state, &mut physics); // activation tick (bar at 3)
        for _ in 1..20 {
            update_sweep(&mut state, &mut physics);
        }
        assert_eq!(state.sweep.bar_x, 40.0);

        for _ in 0..20 {
            update_sweep(&mut state, &mut physics);
        }
        assert_eq!(state.sweep.bar_x, 80.0);
    }

    #[test]
    fn removes_entities_past_right_edge_same_tick() {
        let (mut state, mut physics) = populated_state(SWEEP_THRESHOLD);

        // Park one Alex with its right edge on the boundary
        let target = state.entities[0];
        physics.place(target.body, Vec2::new(FIELD_WIDTH - target.radius, 300.0));

        update_sweep(&mut state, &mut physics);
        assert!(state.entity(target.id).is_none());
        assert_eq!(state.count(), SWEEP_THRESHOLD - 1);
    }

    #[test]
    fn no_removal_while_dormant() {
        let (mut state, mut physics) = populated_state(SWEEP_THRESHOLD - 1);

        let target = state.entities[0];
        physics.place(target.body, Vec2::new(FIELD_WIDTH, 300.0));

        update_sweep(&mut state, &mut physics);
        assert!(state.entity(target.id).is_some());
    }

    #[test]
    fn resets_after_leaving_field() {
        let (mut state, mut physics) = populated_state(SWEEP_THRESHOLD);

        update_sweep(&mut state, &mut physics);
        assert!(state.sweep.active);

        // Drop below the threshold so the sweep does not restart on reset
        let surplus: Vec<u32> = state.entities[..10].iter().map(|e| e.id).collect();
        for id in surplus {
            state.remove(&mut physics, id);
        }

        // Net +40 per 20 ticks from x=3 needs ~300 ticks to pass W+100
        for _ in 0..400 {
            update_sweep(&mut state, &mut physics);
        }

        assert!(!state.sweep.active);
        assert_eq!(state.sweep.bar_x, 0.0);
        assert_eq!(state.sweep.phase, SweepPhase::Forward);
        assert_eq!(state.sweep.phase_ticks, 0);

        let events = state.take_events();
        assert!(events.contains(&SimEvent::SweepStopped));
        // Barrier parked back at the left edge
        let barrier = physics.body_state(state.playfield.barrier).unwrap();
        assert_eq!(barrier.position.x, 0.0);
    }

    #[test]
    fn stays_active_until_exit_even_below_threshold() {
        let (mut state, mut physics) = populated_state(SWEEP_THRESHOLD);

        update_sweep(&mut state, &mut physics);
        let surplus: Vec<u32> = state.entities[..20].iter().map(|e| e.id).collect();
        for id in surplus {
            state.remove(&mut physics, id);
        }
        assert!(state.count() < SWEEP_THRESHOLD);

        for _ in 0..50 {
            update_sweep(&mut state, &mut physics);
            assert!(state.sweep.active);
        }
    }

    proptest! {
        /// Bar position at every 20-tick cycle boundary is exactly 40 per
        /// cycle: the asymmetric stroke pattern nets +40 and never less.
        #[test]
        fn drift_is_linear_in_cycles(cycles in 1u32..12) {
            let (mut state, mut physics) = populated_state(SWEEP_THRESHOLD);

            let mut boundaries = Vec::new();
            for _ in 0..cycles {
                for _ in 0..20 {
                    update_sweep(&mut state, &mut physics);
                }
                boundaries.push(state.sweep.bar_x);
            }

            for (i, bar_x) in boundaries.iter().enumerate() {
                prop_assert_eq!(*bar_x, 40.0 * (i as f32 + 1.0));
            }
        }
    }
}
