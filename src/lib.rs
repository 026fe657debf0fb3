//! Alex Rain - a click-to-spawn physics toy
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entity registry, sweep, explosions)
//! - `renderer`: WebGPU rendering pipeline
//! - `audio`: Procedural Web Audio sound effects
//! - `settings`: Audio preferences persisted in LocalStorage

pub mod audio;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per rendered frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Play-field dimensions in pixels (y grows downward)
    pub const FIELD_WIDTH: f32 = 500.0;
    pub const FIELD_HEIGHT: f32 = 700.0;

    /// Downward gravity in px/s²
    pub const GRAVITY: f32 = 900.0;

    /// Alex spawn radius range (uniform draw)
    pub const ALEX_RADIUS_MIN: f32 = 20.0;
    pub const ALEX_RADIUS_MAX: f32 = 50.0;
    /// Material constants shared by every Alex body
    pub const ALEX_FRICTION: f32 = 0.3;
    pub const ALEX_RESTITUTION: f32 = 0.6;
    /// Every Nth spawn is explosive
    pub const EXPLOSIVE_SPAWN_PERIOD: u32 = 90;

    /// Population at which the wiper starts (and its band becomes visible)
    pub const SWEEP_THRESHOLD: usize = 70;
    /// Asymmetric oscillation: forward 3 px/tick for 15 ticks, then back
    /// 1 px/tick for 5 ticks. Net +40 px per 20-tick cycle carries the bar
    /// across the field.
    pub const SWEEP_FORWARD_STEP: f32 = 3.0;
    pub const SWEEP_FORWARD_TICKS: u32 = 15;
    pub const SWEEP_BACKWARD_STEP: f32 = 1.0;
    pub const SWEEP_BACKWARD_TICKS: u32 = 5;
    /// The sweep ends once the bar has passed the right edge by this much
    pub const SWEEP_EXIT_MARGIN: f32 = 100.0;
    /// Barrier physics body is 20 px wide; the drawn band is wider
    pub const BARRIER_HALF_WIDTH: f32 = 10.0;
    pub const BARRIER_BAND_WIDTH: f32 = 60.0;

    /// Half-thickness of the ground slab and the side walls
    pub const GROUND_HALF_THICKNESS: f32 = 5.0;
    pub const WALL_HALF_THICKNESS: f32 = 5.0;
    /// Ground center sits this far above the bottom edge
    pub const GROUND_INSET: f32 = 20.0;

    /// Squared-magnitude cutoff below which a blast direction is degenerate
    pub const BLAST_EPSILON: f32 = 1e-4;
    /// Blast strength factor range (uniform draw, × target mass)
    pub const BLAST_MIN_FACTOR: f32 = 0.2;
    pub const BLAST_MAX_FACTOR: f32 = 0.5;
    /// Extra upward shove (× target mass)
    pub const BLAST_LIFT_FACTOR: f32 = 0.15;
    /// Converts the dimensionless blast factors into an impulse that reads
    /// as px/s of velocity change per unit mass
    pub const BLAST_IMPULSE_SCALE: f32 = 600.0;
}
