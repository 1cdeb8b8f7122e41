//! World queries made from inside an entity's tick
//!
//! The ticking entity never sees the collection it lives in. It gets a
//! `Neighbors` view of everyone else (the entities stored before and after
//! it) so queries can read and damage other entities without aliasing.

use super::behavior::{Behavior, TickContext};
use super::collision::{overlap, Lane};
use super::entity::{Body, Entity, Racer};
use crate::consts::CAB_AVOID_DISTANCE;

/// Every entity except the one being ticked
pub struct Neighbors<'a> {
    before: &'a mut [Entity],
    after: &'a mut [Entity],
}

impl<'a> Neighbors<'a> {
    pub fn new(before: &'a mut [Entity], after: &'a mut [Entity]) -> Self {
        Self { before, after }
    }

    /// No neighbors at all
    pub fn empty() -> Neighbors<'static> {
        Neighbors {
            before: Default::default(),
            after: Default::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.before.len() + self.after.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Neighbors in stored order
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.before.iter().chain(self.after.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.before.iter_mut().chain(self.after.iter_mut())
    }
}

/// Nearby traffic in a cab's lane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traffic {
    /// Something within range further up the road
    Ahead,
    /// Something within range further down the road
    Behind,
    Clear,
}

/// First live collidable entity in `lane` within avoidance range of `cab`
///
/// The racer is never part of the scan.
pub fn check_cab_front_or_back<'e>(
    lane: Lane,
    cab: &Body,
    others: impl IntoIterator<Item = &'e Entity>,
) -> Traffic {
    for other in others {
        let body = &other.body;
        if !body.alive || !body.collidable || !lane.contains(body.pos.x) {
            continue;
        }
        let dy = body.pos.y - cab.pos.y;
        if dy > 0.0 && dy < CAB_AVOID_DISTANCE {
            return Traffic::Ahead;
        }
        if dy < 0.0 && -dy < CAB_AVOID_DISTANCE {
            return Traffic::Behind;
        }
    }
    Traffic::Clear
}

/// Damage the first live sprayable entity under the spray
///
/// Kills the spray and returns true on a hit.
pub fn activated_spray<'e>(
    spray: &mut Body,
    racer: &Racer,
    others: impl IntoIterator<Item = &'e mut Entity>,
    ctx: &mut TickContext<'_>,
) -> bool {
    let target = others
        .into_iter()
        .find(|e| e.is_alive() && e.is_sprayable() && overlap(&e.body, spray));
    let Some(target) = target else {
        return false;
    };

    target.on_damage(1, racer, ctx);
    spray.kill();
    true
}
