//! Per-kind entity behavior
//!
//! `Behavior` is the single dispatch point for everything an entity does in
//! a tick: moving, reacting to damage, and the sounds it makes. The racer is
//! driven separately through `Racer::update` since it reads the keyboard.

use glam::DVec2;

use super::collision::overlap;
use super::entity::{
    DamageOutcome, Entity, EntityId, EntityKind, GoodieKind, Racer,
};
use super::query::{activated_spray, check_cab_front_or_back, Neighbors, Traffic};
use super::rng::RandomSource;
use crate::audio::SoundId;
use crate::consts::*;
use crate::heading_vector;
use crate::platform::{Host, Key};

/// Everything outside the entity collection an entity may touch mid-tick
pub struct TickContext<'a> {
    host: &'a mut dyn Host,
    /// Entities created this tick, appended to the world after the current update
    spawned: &'a mut Vec<Entity>,
    next_id: &'a mut u32,
    souls_saved: &'a mut u32,
    drop_odds: i32,
}

impl<'a> TickContext<'a> {
    pub fn new(
        host: &'a mut dyn Host,
        spawned: &'a mut Vec<Entity>,
        next_id: &'a mut u32,
        souls_saved: &'a mut u32,
        drop_odds: i32,
    ) -> Self {
        Self {
            host,
            spawned,
            next_id,
            souls_saved,
            drop_odds,
        }
    }

    pub fn rng(&mut self) -> &mut dyn RandomSource {
        self.host.rng()
    }

    pub fn random_int(&mut self, low: i32, high: i32) -> i32 {
        self.host.rng().random_int(low, high)
    }

    /// Pickup drop roll for killed zombies and cabs
    fn roll_drop(&mut self) -> bool {
        let odds = self.drop_odds;
        self.random_int(0, odds - 1) == 0
    }

    pub fn play_sound(&mut self, sound: SoundId) {
        self.host.play_sound(sound);
    }

    fn play(&mut self, sound: Option<SoundId>) {
        if let Some(sound) = sound {
            self.host.play_sound(sound);
        }
    }

    pub fn poll_key(&mut self) -> Option<Key> {
        self.host.poll_key()
    }

    pub fn award(&mut self, points: u32) {
        if points > 0 {
            self.host.increase_score(points);
        }
    }

    pub fn save_soul(&mut self) {
        *self.souls_saved += 1;
    }

    pub fn souls_saved(&self) -> u32 {
        *self.souls_saved
    }

    /// Queue a new entity and hand back its id
    pub fn spawn(&mut self, mut entity: Entity) -> EntityId {
        let id = EntityId(*self.next_id);
        *self.next_id += 1;
        entity.body.id = id;
        self.spawned.push(entity);
        id
    }
}

/// Polymorphic entity hooks
pub trait Behavior {
    /// Advance one tick
    fn tick(&mut self, racer: &mut Racer, neighbors: &mut Neighbors<'_>, ctx: &mut TickContext<'_>);
    /// Apply `amount` damage, with every side effect of dying
    fn on_damage(&mut self, amount: i32, racer: &Racer, ctx: &mut TickContext<'_>);
    fn hurt_sound(&self) -> Option<SoundId>;
    fn die_sound(&self) -> Option<SoundId>;
    /// Whether holy water spray can hit this entity
    fn is_sprayable(&self) -> bool;
}

impl GoodieKind {
    pub fn score(self) -> u32 {
        match self {
            GoodieKind::Oil => 0,
            GoodieKind::Heal => 250,
            GoodieKind::HolyWater => 50,
            GoodieKind::Soul => 100,
        }
    }

    pub fn pickup_sound(self) -> SoundId {
        match self {
            GoodieKind::Oil => SoundId::OilSlick,
            GoodieKind::Soul => SoundId::GotSoul,
            GoodieKind::Heal | GoodieKind::HolyWater => SoundId::GotGoodie,
        }
    }

    /// Oil stays on the road after being driven over
    pub fn destructible(self) -> bool {
        self != GoodieKind::Oil
    }

    pub fn sprayable(self) -> bool {
        matches!(self, GoodieKind::Heal | GoodieKind::HolyWater)
    }

    fn apply(self, racer: &mut Racer, ctx: &mut TickContext<'_>) {
        match self {
            GoodieKind::Oil => {
                let clockwise = ctx.random_int(0, 1) == 1;
                let spin = ctx.random_int(5, 20);
                let heading = racer.body.heading;
                let spin = if (80..=100).contains(&heading) {
                    if clockwise { -spin } else { spin }
                } else if heading < 80 {
                    spin
                } else {
                    -spin
                };
                racer.body.turn(spin);
            }
            GoodieKind::Heal => {
                let hp = racer.body.hp;
                if hp < 90 {
                    racer.damage(-10, ctx);
                } else {
                    racer.damage(hp - 100, ctx);
                }
            }
            GoodieKind::HolyWater => racer.sprays += 10,
            GoodieKind::Soul => ctx.save_soul(),
        }
    }
}

impl Behavior for Entity {
    fn tick(&mut self, racer: &mut Racer, neighbors: &mut Neighbors<'_>, ctx: &mut TickContext<'_>) {
        match self.kind {
            EntityKind::BorderLine(_) => self.body.drift(racer.body.vel.y),
            EntityKind::Human(_) => {
                if overlap(&self.body, &racer.body) {
                    racer.body.kill();
                    return;
                }
                self.tick_pedestrian(racer, ctx);
            }
            EntityKind::Zombie { .. } => self.tick_zombie(racer, ctx),
            EntityKind::Cab { .. } => self.tick_cab(racer, neighbors, ctx),
            EntityKind::Goodie(kind) => {
                self.body.drift(racer.body.vel.y);
                if overlap(&self.body, &racer.body) {
                    ctx.play_sound(kind.pickup_sound());
                    kind.apply(racer, ctx);
                    if kind.destructible() {
                        self.body.kill();
                    }
                    ctx.award(kind.score());
                }
                if kind == GoodieKind::Soul {
                    self.body.turn(-10);
                }
            }
            EntityKind::Spray { .. } => self.tick_spray(racer, neighbors, ctx),
        }
    }

    fn on_damage(&mut self, amount: i32, racer: &Racer, ctx: &mut TickContext<'_>) {
        // Humans can't be hurt, only shoved around
        let amount = if matches!(self.kind, EntityKind::Human(_)) { 0 } else { amount };
        let Some(outcome) = self.body.take_damage(amount) else {
            return;
        };
        ctx.play(match outcome {
            DamageOutcome::Hurt => self.hurt_sound(),
            DamageOutcome::Died => self.die_sound(),
        });

        let died = outcome == DamageOutcome::Died;
        match self.kind {
            EntityKind::Human(_) => {
                self.body.vel.x = -self.body.vel.x;
                self.body.turn(180);
            }
            EntityKind::Zombie { .. } if died => {
                if !overlap(&self.body, &racer.body) && ctx.roll_drop() {
                    log::debug!("Zombie {:?} dropped a heal", self.body.id);
                    ctx.spawn(Entity::heal(self.body.pos));
                }
                ctx.award(150);
            }
            EntityKind::Cab { .. } if died => {
                if ctx.roll_drop() {
                    log::debug!("Cab {:?} dropped oil", self.body.id);
                    let size = ctx.random_int(2, 5);
                    ctx.spawn(Entity::oil(self.body.pos, f64::from(size)));
                }
                ctx.award(200);
            }
            _ => {}
        }
    }

    fn hurt_sound(&self) -> Option<SoundId> {
        match self.kind {
            EntityKind::Human(_) | EntityKind::Zombie { .. } => Some(SoundId::PedHurt),
            EntityKind::Cab { .. } => Some(SoundId::VehicleHurt),
            _ => None,
        }
    }

    fn die_sound(&self) -> Option<SoundId> {
        match self.kind {
            EntityKind::Human(_) | EntityKind::Zombie { .. } => Some(SoundId::PedDie),
            EntityKind::Cab { .. } => Some(SoundId::VehicleDie),
            _ => None,
        }
    }

    fn is_sprayable(&self) -> bool {
        match self.kind {
            EntityKind::Human(_) | EntityKind::Zombie { .. } | EntityKind::Cab { .. } => true,
            EntityKind::Goodie(kind) => kind.sprayable(),
            EntityKind::BorderLine(_) | EntityKind::Spray { .. } => false,
        }
    }
}

impl Entity {
    /// Shared by humans and zombies: drift, then replan when the timer runs out
    fn tick_pedestrian(&mut self, racer: &Racer, ctx: &mut TickContext<'_>) {
        self.body.drift(racer.body.vel.y);

        let expired = match &mut self.kind {
            EntityKind::Human(agent) | EntityKind::Zombie { agent, .. } => {
                agent.tick_plan();
                if agent.plan_expired() {
                    agent.reset_plan_length(ctx.rng());
                    true
                } else {
                    false
                }
            }
            _ => false,
        };
        if !expired {
            return;
        }

        let speed = loop {
            let speed = ctx.random_int(-3, 3);
            if speed != 0 {
                break speed;
            }
        };
        self.body.vel.x = f64::from(speed);
        self.body.set_heading(if speed < 0 { 180 } else { 0 });
    }

    fn tick_zombie(&mut self, racer: &mut Racer, ctx: &mut TickContext<'_>) {
        if overlap(&self.body, &racer.body) {
            racer.damage(5, ctx);
            self.on_damage(2, racer, ctx);
        }

        let dx = self.body.pos.x - racer.body.pos.x;
        if dx.abs() <= 30.0 && self.body.pos.y > racer.body.pos.y {
            self.body.set_heading(270);
            self.body.vel.x = if dx < 0.0 {
                1.0
            } else if dx > 0.0 {
                -1.0
            } else {
                0.0
            };
            if let EntityKind::Zombie { grunt_ticks, .. } = &mut self.kind {
                *grunt_ticks -= 1;
                if *grunt_ticks <= 0 {
                    ctx.play_sound(SoundId::ZombieAttack);
                    *grunt_ticks = 20;
                }
            }
        }

        self.tick_pedestrian(racer, ctx);
    }

    fn tick_cab(&mut self, racer: &mut Racer, neighbors: &Neighbors<'_>, ctx: &mut TickContext<'_>) {
        let EntityKind::Cab {
            agent,
            hit_racer,
            lane,
        } = &mut self.kind
        else {
            return;
        };

        if !*hit_racer && overlap(&self.body, &racer.body) {
            ctx.play_sound(SoundId::VehicleCrash);
            racer.damage(20, ctx);
            if self.body.pos.x <= racer.body.pos.x {
                self.body.vel.x = -5.0;
                let veer = ctx.random_int(0, 19);
                self.body.set_heading(120 + veer);
            } else {
                self.body.vel.x = 5.0;
                let veer = ctx.random_int(0, 19);
                self.body.set_heading(60 - veer);
            }
            *hit_racer = true;
        }

        self.body.drift(racer.body.vel.y);

        let speed = self.body.vel.y;
        let racer_speed = racer.body.vel.y;
        match check_cab_front_or_back(*lane, &self.body, neighbors.iter()) {
            Traffic::Ahead if speed > racer_speed => {
                self.body.vel.y -= 0.5;
                return;
            }
            Traffic::Behind if speed <= racer_speed => {
                self.body.vel.y += 0.5;
                return;
            }
            _ => {}
        }

        agent.tick_plan();
        if agent.plan_expired() {
            agent.reset_plan_length(ctx.rng());
            self.body.vel.y += f64::from(ctx.random_int(-2, 2));
        }
    }

    fn tick_spray(&mut self, racer: &Racer, neighbors: &mut Neighbors<'_>, ctx: &mut TickContext<'_>) {
        if activated_spray(&mut self.body, racer, neighbors.iter_mut(), ctx) {
            return;
        }

        self.body.move_forward(SPRITE_HEIGHT);
        if let EntityKind::Spray { travel_left } = &mut self.kind {
            *travel_left -= SPRITE_HEIGHT;
            self.body.check_in_bounds();
            if *travel_left <= 0.0 {
                self.body.kill();
            }
        }
    }
}

impl Racer {
    /// Edge bumps, one key press, then the heading-driven sideways drift
    pub fn update(&mut self, ctx: &mut TickContext<'_>) {
        let x = self.body.pos.x;
        if x <= LEFT_EDGE {
            if self.body.heading > 90 {
                self.damage(10, ctx);
            }
            self.body.set_heading(82);
            ctx.play_sound(SoundId::VehicleCrash);
        } else if x >= RIGHT_EDGE {
            if self.body.heading < 90 {
                self.damage(10, ctx);
            }
            self.body.set_heading(98);
            ctx.play_sound(SoundId::VehicleCrash);
        } else if let Some(key) = ctx.poll_key() {
            match key {
                Key::Left if self.body.heading < 114 => self.body.turn(8),
                Key::Right if self.body.heading > 66 => self.body.turn(-8),
                Key::Up if self.body.vel.y < 5.0 => self.body.vel.y += 1.0,
                Key::Down if self.body.vel.y > -1.0 => self.body.vel.y -= 1.0,
                Key::Fire if self.sprays > 0 => self.fire(ctx),
                _ => {}
            }
        }

        self.body.pos.x += heading_vector(self.body.heading).x * RACER_MAX_SHIFT;
        self.body.check_in_bounds();
    }

    fn fire(&mut self, ctx: &mut TickContext<'_>) {
        let heading = self.body.heading;
        let pos: DVec2 = self.body.pos + heading_vector(heading) * SPRITE_HEIGHT;
        ctx.spawn(Entity::spray(pos, heading));
        ctx.play_sound(SoundId::PlayerSpray);
        self.sprays -= 1;
    }

    /// Racer damage only has a death sound
    pub fn damage(&mut self, amount: i32, ctx: &mut TickContext<'_>) {
        if self.body.take_damage(amount) == Some(DamageOutcome::Died) {
            log::info!("Racer destroyed");
            ctx.play_sound(SoundId::PlayerDie);
        }
    }
}
