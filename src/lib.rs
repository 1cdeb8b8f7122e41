//! Ghost Racer - A top-down arcade racer on a scrolling road
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, behaviors, world tick, spawning)
//! - `platform`: Host collaborator contract plus a headless in-memory host
//! - `audio`: Sound effect identifiers
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use audio::SoundId;
pub use platform::{HeadlessHost, Host, Key, Sprite};
pub use sim::{TickStatus, World, create_world, tick};
pub use tuning::{Tuning, TuningError};

use glam::DVec2;

/// Game configuration constants
pub mod consts {
    /// View dimensions
    pub const VIEW_WIDTH: f64 = 256.0;
    pub const VIEW_HEIGHT: f64 = 256.0;
    pub const SPRITE_HEIGHT: f64 = VIEW_HEIGHT / 16.0;

    /// Road geometry
    pub const ROAD_CENTER: f64 = VIEW_WIDTH / 2.0;
    pub const ROAD_WIDTH: f64 = VIEW_WIDTH / 2.0;
    pub const LEFT_EDGE: f64 = ROAD_CENTER - ROAD_WIDTH / 2.0; // 64
    pub const RIGHT_EDGE: f64 = ROAD_CENTER + ROAD_WIDTH / 2.0; // 192
    /// Lane dividers sit a whole third of the road in from each edge (truncated)
    pub const LEFT_DIVIDER: f64 = LEFT_EDGE + 42.0; // 106
    pub const RIGHT_DIVIDER: f64 = RIGHT_EDGE - 42.0; // 150
    /// Cab spawn columns for the outer lanes
    pub const LEFT_LANE_X: f64 = 85.0;
    pub const RIGHT_LANE_X: f64 = 170.0;

    /// Collision radius per unit of sprite size
    pub const RADIUS_PER_UNIT: f64 = 8.0;

    /// Racer defaults
    pub const RACER_START_X: f64 = 128.0;
    pub const RACER_START_Y: f64 = 32.0;
    pub const RACER_START_HEALTH: i32 = 100;
    pub const RACER_START_SPRAYS: u32 = 10;
    pub const RACER_SIZE: f64 = 4.0;
    /// Lateral drift per tick at full sideways heading
    pub const RACER_MAX_SHIFT: f64 = 4.0;

    /// Everything that drifts with the road moves down this fast at rest
    pub const ROAD_SCROLL_SPEED: f64 = -4.0;

    /// Spray projectile travel budget
    pub const SPRAY_RANGE: f64 = 160.0;

    /// Cab lookahead window for collision avoidance
    pub const CAB_AVOID_DISTANCE: f64 = 96.0;
}

/// Wrap an angle in whole degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: i32) -> i32 {
    angle.rem_euclid(360)
}

/// Unit vector for a heading in degrees (0 = +x, 90 = +y)
#[inline]
pub fn heading_vector(degrees: i32) -> DVec2 {
    let theta = f64::from(degrees).to_radians();
    DVec2::new(theta.cos(), theta.sin())
}
