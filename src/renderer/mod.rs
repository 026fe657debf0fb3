//! WebGPU rendering: a single colored-triangle pipeline fed by per-frame
//! shape generation.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use vertex::{Vertex, colors};

use glam::Vec2;

use crate::consts::*;
use crate::sim::{Physics, SimState};

/// Build this frame's vertex list from the simulation state
pub fn frame_vertices<P: Physics>(state: &SimState, physics: &P) -> Vec<Vertex> {
    let mut vertices = Vec::new();

    // Alexes, insertion order (newest on top)
    for entity in &state.entities {
        let Some(body) = physics.body_state(entity.body) else {
            continue;
        };
        let color = if entity.is_explosive() {
            colors::ALEX_EXPLOSIVE
        } else {
            colors::ALEX
        };
        vertices.extend(shapes::circle(body.position, entity.radius, color, 32));
        vertices.extend(shapes::angle_notch(
            body.position,
            entity.radius,
            body.angle,
            colors::ALEX_NOTCH,
        ));
    }

    // Wiper band, visible one tick before sweeping starts
    if state.barrier_visible() {
        vertices.extend(shapes::rect(
            Vec2::new(state.sweep.bar_x - BARRIER_BAND_WIDTH / 2.0, 0.0),
            Vec2::new(BARRIER_BAND_WIDTH, FIELD_HEIGHT),
            colors::BARRIER_BAND,
        ));
    }

    // Field border on top of everything
    vertices.extend(shapes::border(
        FIELD_WIDTH,
        FIELD_HEIGHT,
        4.0,
        colors::BORDER,
    ));

    vertices
}
