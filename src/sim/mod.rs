//! Deterministic simulation module
//!
//! All toy logic lives here. This module must stay pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Physics reached only through the [`Physics`] port
//! - No rendering, audio, or platform dependencies
//!
//! The presentation layer drives [`tick`] once per frame and drains
//! [`SimEvent`]s to play sounds.

pub mod contact;
pub mod explosion;
pub mod physics;
pub mod state;
pub mod sweep;
pub mod tick;

#[cfg(test)]
pub(crate) mod testing;

pub use contact::dispatch_contacts;
pub use explosion::trigger_explosion;
pub use physics::{
    BodyId, BodyState, BodyTag, CollisionPair, Material, Physics, RapierPhysics,
};
pub use state::{Entity, EntityKind, Playfield, SimEvent, SimState, SweepPhase, SweepState};
pub use sweep::update_sweep;
pub use tick::{TickInput, tick};
