//! Entity data model
//!
//! Every simulated object shares a `Body` (position, heading, size, velocity,
//! hit points, flags). What it *does* is decided by its `EntityKind`.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::collision::Lane;
use super::rng::RandomSource;
use crate::consts::*;
use crate::platform::Sprite;
use crate::{heading_vector, normalize_degrees};

/// Stable handle for an entity owned by the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// The racer lives outside the entity collection
    pub const RACER: EntityId = EntityId(0);
}

/// Sprite images the host knows how to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageId {
    GhostRacer,
    YellowBorderLine,
    WhiteBorderLine,
    HumanPed,
    ZombiePed,
    ZombieCab,
    OilSlick,
    HealGoodie,
    HolyWaterGoodie,
    SoulGoodie,
    HolyWaterProjectile,
}

/// Result of applying damage to a living body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    Hurt,
    Died,
}

/// State common to every entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub id: EntityId,
    pub pos: DVec2,
    /// Whole degrees in [0, 360)
    pub heading: i32,
    pub size: f64,
    /// Lower depth is drawn on top
    pub depth: u32,
    pub vel: DVec2,
    pub hp: i32,
    pub alive: bool,
    /// Cabs steer around collidable bodies
    pub collidable: bool,
}

impl Body {
    pub fn new(pos: DVec2, heading: i32, size: f64, depth: u32) -> Self {
        Self {
            id: EntityId::default(),
            pos,
            heading: normalize_degrees(heading),
            size,
            depth,
            vel: DVec2::ZERO,
            hp: 0,
            alive: true,
            collidable: false,
        }
    }

    fn with_vel(mut self, vel: DVec2) -> Self {
        self.vel = vel;
        self
    }

    fn with_hp(mut self, hp: i32) -> Self {
        self.hp = hp;
        self
    }

    fn collidable(mut self) -> Self {
        self.collidable = true;
        self
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        RADIUS_PER_UNIT * self.size
    }

    pub fn kill(&mut self) {
        self.alive = false;
    }

    pub fn set_heading(&mut self, degrees: i32) {
        self.heading = normalize_degrees(degrees);
    }

    /// Rotate by a signed amount (positive = counter-clockwise)
    pub fn turn(&mut self, degrees: i32) {
        self.set_heading(self.heading + degrees);
    }

    pub fn in_bounds(&self) -> bool {
        self.pos.x >= 0.0
            && self.pos.y >= 0.0
            && self.pos.x <= VIEW_WIDTH
            && self.pos.y <= VIEW_HEIGHT
    }

    /// Kill silently once off screen
    pub fn check_in_bounds(&mut self) {
        if !self.in_bounds() {
            self.kill();
        }
    }

    /// Default movement: ride the road scroll relative to the racer's speed
    pub fn drift(&mut self, racer_speed_y: f64) {
        self.pos.y += self.vel.y - racer_speed_y;
        self.pos.x += self.vel.x;
        self.check_in_bounds();
    }

    pub fn move_forward(&mut self, distance: f64) {
        self.pos += heading_vector(self.heading) * distance;
    }

    /// Subtract hit points. Dead bodies ignore damage and report `None`.
    pub fn take_damage(&mut self, amount: i32) -> Option<DamageOutcome> {
        if !self.alive {
            return None;
        }
        self.hp -= amount;
        if self.hp <= 0 {
            self.kill();
            Some(DamageOutcome::Died)
        } else {
            Some(DamageOutcome::Hurt)
        }
    }
}

/// Randomized replanning timer shared by pedestrians and cabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Agent {
    plan_length: u32,
}

/// Bounds of a freshly drawn plan
pub const PLAN_MIN: i32 = 4;
pub const PLAN_MAX: i32 = 32;

impl Agent {
    pub fn plan_length(&self) -> u32 {
        self.plan_length
    }

    /// Count down one tick, stopping at zero
    pub fn tick_plan(&mut self) {
        self.plan_length = self.plan_length.saturating_sub(1);
    }

    pub fn plan_expired(&self) -> bool {
        self.plan_length == 0
    }

    pub fn reset_plan_length(&mut self, rng: &mut dyn RandomSource) {
        self.plan_length = rng.random_int(PLAN_MIN, PLAN_MAX).clamp(PLAN_MIN, PLAN_MAX) as u32;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BorderColor {
    /// Road edges
    Yellow,
    /// Lane dividers
    White,
}

/// Pickups that act when the racer drives over them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoodieKind {
    Oil,
    Heal,
    HolyWater,
    Soul,
}

/// Per-kind state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EntityKind {
    BorderLine(BorderColor),
    Human(Agent),
    Zombie {
        agent: Agent,
        /// Ticks until the next attack grunt
        grunt_ticks: i32,
    },
    Cab {
        agent: Agent,
        /// Set after the one allowed ram of the racer
        hit_racer: bool,
        lane: Lane,
    },
    Goodie(GoodieKind),
    Spray {
        /// Distance left before the spray evaporates
        travel_left: f64,
    },
}

/// A simulated object owned by the world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub body: Body,
    pub kind: EntityKind,
}

impl Entity {
    pub fn border_line(color: BorderColor, x: f64, y: f64) -> Self {
        Self {
            body: Body::new(DVec2::new(x, y), 0, 2.0, 2)
                .with_vel(DVec2::new(0.0, ROAD_SCROLL_SPEED)),
            kind: EntityKind::BorderLine(color),
        }
    }

    fn pedestrian(pos: DVec2, size: f64) -> Body {
        Body::new(pos, 0, size, 0)
            .with_vel(DVec2::new(0.0, ROAD_SCROLL_SPEED))
            .with_hp(2)
            .collidable()
    }

    pub fn human(pos: DVec2) -> Self {
        Self {
            body: Self::pedestrian(pos, 2.0),
            kind: EntityKind::Human(Agent::default()),
        }
    }

    pub fn zombie(pos: DVec2) -> Self {
        Self {
            body: Self::pedestrian(pos, 3.0),
            kind: EntityKind::Zombie {
                agent: Agent::default(),
                grunt_ticks: 0,
            },
        }
    }

    pub fn cab(pos: DVec2, speed_y: f64, lane: Lane) -> Self {
        Self {
            body: Body::new(pos, 90, 4.0, 0)
                .with_vel(DVec2::new(0.0, speed_y))
                .with_hp(3)
                .collidable(),
            kind: EntityKind::Cab {
                agent: Agent::default(),
                hit_racer: false,
                lane,
            },
        }
    }

    fn goodie(kind: GoodieKind, pos: DVec2, heading: i32, size: f64) -> Self {
        Self {
            body: Body::new(pos, heading, size, 2).with_vel(DVec2::new(0.0, ROAD_SCROLL_SPEED)),
            kind: EntityKind::Goodie(kind),
        }
    }

    /// Oil slicks come in random sizes; the caller draws `size` from [2, 5]
    pub fn oil(pos: DVec2, size: f64) -> Self {
        Self::goodie(GoodieKind::Oil, pos, 0, size)
    }

    pub fn heal(pos: DVec2) -> Self {
        Self::goodie(GoodieKind::Heal, pos, 0, 1.0)
    }

    pub fn holy_water(pos: DVec2) -> Self {
        Self::goodie(GoodieKind::HolyWater, pos, 90, 2.0)
    }

    pub fn soul(pos: DVec2) -> Self {
        Self::goodie(GoodieKind::Soul, pos, 0, 4.0)
    }

    pub fn spray(pos: DVec2, heading: i32) -> Self {
        Self {
            body: Body::new(pos, heading, 1.0, 1),
            kind: EntityKind::Spray {
                travel_left: SPRAY_RANGE,
            },
        }
    }

    pub fn id(&self) -> EntityId {
        self.body.id
    }

    pub fn is_alive(&self) -> bool {
        self.body.alive
    }

    pub fn image(&self) -> ImageId {
        match self.kind {
            EntityKind::BorderLine(BorderColor::Yellow) => ImageId::YellowBorderLine,
            EntityKind::BorderLine(BorderColor::White) => ImageId::WhiteBorderLine,
            EntityKind::Human(_) => ImageId::HumanPed,
            EntityKind::Zombie { .. } => ImageId::ZombiePed,
            EntityKind::Cab { .. } => ImageId::ZombieCab,
            EntityKind::Goodie(GoodieKind::Oil) => ImageId::OilSlick,
            EntityKind::Goodie(GoodieKind::Heal) => ImageId::HealGoodie,
            EntityKind::Goodie(GoodieKind::HolyWater) => ImageId::HolyWaterGoodie,
            EntityKind::Goodie(GoodieKind::Soul) => ImageId::SoulGoodie,
            EntityKind::Spray { .. } => ImageId::HolyWaterProjectile,
        }
    }

    pub fn sprite(&self) -> Sprite {
        sprite_for(self.image(), &self.body)
    }

    /// Plan timer for pedestrians and cabs
    pub fn agent(&self) -> Option<&Agent> {
        match &self.kind {
            EntityKind::Human(agent)
            | EntityKind::Zombie { agent, .. }
            | EntityKind::Cab { agent, .. } => Some(agent),
            _ => None,
        }
    }
}

pub(crate) fn sprite_for(image: ImageId, body: &Body) -> Sprite {
    Sprite {
        image,
        x: body.pos.x,
        y: body.pos.y,
        heading: body.heading,
        scale: body.size,
        depth: body.depth,
    }
}

/// The player's vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Racer {
    pub body: Body,
    /// Holy water charges left
    pub sprays: u32,
}

impl Default for Racer {
    fn default() -> Self {
        let mut body = Body::new(
            DVec2::new(RACER_START_X, RACER_START_Y),
            90,
            RACER_SIZE,
            0,
        )
        .with_hp(RACER_START_HEALTH)
        .collidable();
        body.id = EntityId::RACER;
        Self {
            body,
            sprays: RACER_START_SPRAYS,
        }
    }
}

impl Racer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_alive(&self) -> bool {
        self.body.alive
    }

    pub fn health(&self) -> i32 {
        self.body.hp
    }

    pub fn sprite(&self) -> Sprite {
        sprite_for(ImageId::GhostRacer, &self.body)
    }
}
