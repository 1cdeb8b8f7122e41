//! World state
//!
//! The world owns the racer and every other entity. Score, level and lives
//! belong to the host.

use std::path::{Path, PathBuf};

use super::entity::{BorderColor, Entity, EntityId, Racer};
use crate::consts::*;
use crate::platform::Host;
use crate::tuning::{Tuning, TUNING_FILE};

/// Everything simulated for one level
#[derive(Debug, Clone)]
pub struct World {
    pub(crate) asset_path: PathBuf,
    pub(crate) tuning: Tuning,
    pub(crate) racer: Racer,
    /// Insertion order is scan order
    pub(crate) entities: Vec<Entity>,
    pub(crate) souls_saved: u32,
    /// Paid out on level completion, shrinks every tick
    pub(crate) bonus: u32,
    /// Y of the most recent white divider pair
    pub(crate) last_white_y: f64,
    pub(crate) next_id: u32,
}

/// Load tuning from the asset directory and build a ready-to-play world
pub fn create_world(asset_path: impl Into<PathBuf>) -> World {
    let asset_path = asset_path.into();
    let tuning = Tuning::load_or_default(&asset_path.join(TUNING_FILE));
    World::new(asset_path, tuning)
}

impl World {
    /// Create a world with the road already laid out
    pub fn new(asset_path: impl Into<PathBuf>, tuning: Tuning) -> Self {
        let mut world = Self {
            asset_path: asset_path.into(),
            bonus: tuning.start_bonus,
            tuning,
            racer: Racer::new(),
            entities: Vec::new(),
            souls_saved: 0,
            last_white_y: 0.0,
            next_id: 1,
        };
        world.init();
        world
    }

    /// Reset for a fresh attempt at the current level
    pub fn init(&mut self) {
        self.clean_up();
        self.next_id = 1;
        self.souls_saved = 0;
        self.bonus = self.tuning.start_bonus;
        self.racer = Racer::new();

        let yellow_pairs = (VIEW_HEIGHT / SPRITE_HEIGHT) as u32;
        for i in 0..yellow_pairs {
            let y = f64::from(i) * SPRITE_HEIGHT;
            self.add_border_pair(BorderColor::Yellow, y);
        }

        let white_gap = 4.0 * SPRITE_HEIGHT;
        let white_pairs = (VIEW_HEIGHT / white_gap) as u32;
        for i in 0..white_pairs {
            let y = f64::from(i) * white_gap;
            self.add_border_pair(BorderColor::White, y);
        }
        self.last_white_y = f64::from(white_pairs.saturating_sub(1)) * white_gap;

        log::info!(
            "World ready: {} border lines, bonus {}",
            self.entities.len(),
            self.bonus
        );
    }

    /// Drop every entity
    pub fn clean_up(&mut self) {
        self.entities.clear();
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Take ownership of an entity, appending it to the scan order
    pub fn add_entity(&mut self, mut entity: Entity) -> EntityId {
        let id = self.next_entity_id();
        entity.body.id = id;
        self.entities.push(entity);
        id
    }

    /// A yellow pair sits on the road edges, a white pair on the lane dividers
    pub(crate) fn add_border_pair(&mut self, color: BorderColor, y: f64) {
        let (left, right) = match color {
            BorderColor::Yellow => (LEFT_EDGE, RIGHT_EDGE),
            BorderColor::White => (LEFT_DIVIDER, RIGHT_DIVIDER),
        };
        self.add_entity(Entity::border_line(color, left, y));
        self.add_entity(Entity::border_line(color, right, y));
    }

    /// Draw the racer and every live entity
    pub fn render(&self, host: &mut dyn Host) {
        host.render(self.racer.sprite());
        for entity in self.entities.iter().filter(|e| e.is_alive()) {
            host.render(entity.sprite());
        }
    }

    pub fn asset_path(&self) -> &Path {
        &self.asset_path
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn racer(&self) -> &Racer {
        &self.racer
    }

    pub fn racer_mut(&mut self) -> &mut Racer {
        &mut self.racer
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id() == id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id() == id)
    }

    pub fn souls_saved(&self) -> u32 {
        self.souls_saved
    }

    /// Souls still needed to finish `level`
    pub fn souls_remaining(&self, level: u32) -> u32 {
        self.tuning
            .souls_required(level)
            .saturating_sub(self.souls_saved)
    }

    pub fn bonus(&self) -> u32 {
        self.bonus
    }

    pub fn last_white_y(&self) -> f64 {
        self.last_white_y
    }
}
