//! Deterministic simulation module
//!
//! All gameplay logic lives here. Given the same host inputs and random
//! draws, a run replays exactly:
//! - Single-threaded, one call to `tick` per frame
//! - Every random decision goes through the host's `RandomSource`
//! - Stable iteration order (insertion order)
//! - No rendering or audio backends

pub mod behavior;
pub mod collision;
pub mod entity;
pub mod query;
pub mod rng;
pub mod spawn;
pub mod state;
pub mod tick;

pub use behavior::{Behavior, TickContext};
pub use collision::{Lane, overlap};
pub use entity::{
    Agent, Body, BorderColor, DamageOutcome, Entity, EntityId, EntityKind, GoodieKind, ImageId,
    Racer,
};
pub use query::{Neighbors, Traffic, activated_spray, check_cab_front_or_back};
pub use rng::{RandomSource, ScriptedRng, SeededRng};
pub use spawn::place_cab;
pub use state::{World, create_world};
pub use tick::{TickStatus, status_text, tick};
