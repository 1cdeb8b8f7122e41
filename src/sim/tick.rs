//! Per-tick world update
//!
//! One call advances the whole world by a frame: racer first, then every
//! entity in stored order, then scrolling and spawning.

use serde::{Deserialize, Serialize};

use super::behavior::{Behavior, TickContext};
use super::entity::Entity;
use super::query::Neighbors;
use super::spawn::{scroll_borders, spawn_actors};
use super::state::World;
use crate::platform::Host;

/// What the host should do after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickStatus {
    Continue,
    /// A life was lost; the host re-inits the level or ends the game
    PlayerDied,
    /// Soul quota met and bonus paid; the host advances the level
    LevelFinished,
}

/// Advance the world by one tick
pub fn tick(world: &mut World, host: &mut dyn Host) -> TickStatus {
    if !world.racer.is_alive() {
        return player_died(host);
    }

    let level = host.level();
    let required = world.tuning.souls_required(level);
    let drop_odds = world.tuning.drop_odds;
    let mut spawned: Vec<Entity> = Vec::new();

    {
        let mut ctx = TickContext::new(
            host,
            &mut spawned,
            &mut world.next_id,
            &mut world.souls_saved,
            drop_odds,
        );
        world.racer.update(&mut ctx);
    }
    world.entities.append(&mut spawned);

    // Edge bumps and the bounds check can end the racer before anything else moves
    if !world.racer.is_alive() {
        return player_died(host);
    }

    // Indexed sweep: anything spawned along the way is appended and reached
    // before the loop ends
    let mut index = 0;
    while index < world.entities.len() {
        if world.souls_saved >= required {
            host.increase_score(world.bonus);
            log::info!(
                "Level {} finished with {} souls, bonus {}",
                level,
                world.souls_saved,
                world.bonus
            );
            world.entities.retain(Entity::is_alive);
            return TickStatus::LevelFinished;
        }

        let (before, rest) = world.entities.split_at_mut(index);
        if let Some((current, after)) = rest.split_first_mut() {
            if current.is_alive() {
                let mut neighbors = Neighbors::new(before, after);
                let mut ctx = TickContext::new(
                    host,
                    &mut spawned,
                    &mut world.next_id,
                    &mut world.souls_saved,
                    drop_odds,
                );
                current.tick(&mut world.racer, &mut neighbors, &mut ctx);
            }
        }
        world.entities.append(&mut spawned);
        index += 1;

        if !world.racer.is_alive() {
            break;
        }
    }
    world.entities.retain(Entity::is_alive);

    if !world.racer.is_alive() {
        return player_died(host);
    }

    scroll_borders(world);
    spawn_actors(world, host, level);

    world.bonus = world.bonus.saturating_sub(1);
    let status = status_text(world, host, level);
    host.set_status_text(&status);

    TickStatus::Continue
}

fn player_died(host: &mut dyn Host) -> TickStatus {
    host.dec_lives();
    log::info!("Racer lost, {} lives left", host.lives());
    TickStatus::PlayerDied
}

/// Status line shown above the road
pub fn status_text(world: &World, host: &dyn Host, level: u32) -> String {
    format!(
        "Score: {}  Lvl: {}  Souls2Save: {}  Lives: {}  Health: {}  Sprays: {}  Bonus: {}",
        host.score(),
        level,
        world.souls_remaining(level),
        host.lives(),
        world.racer.health(),
        world.racer.sprays,
        world.bonus
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SoundId;
    use crate::platform::{HeadlessHost, Key};
    use crate::sim::collision::Lane;
    use crate::sim::entity::{EntityKind, GoodieKind};
    use crate::sim::rng::{ScriptedRng, SeededRng};
    use crate::tuning::Tuning;
    use glam::DVec2;

    fn setup() -> (World, HeadlessHost<ScriptedRng>) {
        (
            World::new("assets", Tuning::default()),
            HeadlessHost::new(ScriptedRng::new()),
        )
    }

    fn count_kind(world: &World, pred: impl Fn(&EntityKind) -> bool) -> usize {
        world.entities().iter().filter(|e| pred(&e.kind)).count()
    }

    #[test]
    fn test_quiet_tick_continues() {
        let (mut world, mut host) = setup();
        assert_eq!(tick(&mut world, &mut host), TickStatus::Continue);
        assert_eq!(world.bonus(), 4999);
        assert_eq!(
            host.status_text(),
            "Score: 0  Lvl: 1  Souls2Save: 7  Lives: 3  Health: 100  Sprays: 10  Bonus: 4999"
        );
        // both pairs at y 0 scrolled off, one yellow pair came in
        assert_eq!(world.entities().len(), 40 - 4 + 2);
    }

    #[test]
    fn test_bonus_floors_at_zero() {
        let (mut world, mut host) = setup();
        world.bonus = 1;
        tick(&mut world, &mut host);
        tick(&mut world, &mut host);
        assert_eq!(world.bonus(), 0);
    }

    #[test]
    fn test_cab_kills_weak_racer() {
        let (mut world, mut host) = setup();
        world.racer.body.hp = 15;
        let pos = world.racer().body.pos + DVec2::new(2.0, 8.0);
        world.add_entity(Entity::cab(pos, 0.0, Lane::Middle));

        assert_eq!(tick(&mut world, &mut host), TickStatus::PlayerDied);
        assert_eq!(host.lives(), 2);
        assert!(!world.racer().is_alive());
        assert_eq!(host.sound_count(SoundId::PlayerDie), 1);
        assert_eq!(host.sound_count(SoundId::VehicleCrash), 1);
    }

    #[test]
    fn test_dead_racer_reports_immediately() {
        let (mut world, mut host) = setup();
        world.racer.body.kill();
        let before = world.entities().to_vec();
        assert_eq!(tick(&mut world, &mut host), TickStatus::PlayerDied);
        assert_eq!(host.lives(), 2);
        assert_eq!(world.entities(), before.as_slice());
    }

    /// Racer scraping the left edge facing away from the road with 10 HP left
    fn setup_fatal_bump() -> (World, HeadlessHost<ScriptedRng>) {
        let (mut world, host) = setup();
        world.racer.body.pos.x = crate::consts::LEFT_EDGE;
        world.racer.body.set_heading(100);
        world.racer.body.hp = 10;
        (world, host)
    }

    #[test]
    fn test_edge_bump_kills_racer_before_sweep() {
        let (mut world, mut host) = setup_fatal_bump();
        let before = world.entities().to_vec();

        assert_eq!(tick(&mut world, &mut host), TickStatus::PlayerDied);
        assert_eq!(host.lives(), 2);
        assert_eq!(host.score(), 0);
        assert_eq!(host.sound_count(SoundId::PlayerDie), 1);
        assert_eq!(world.entities(), before.as_slice());
        assert_eq!(world.bonus(), 5000);
    }

    #[test]
    fn test_dead_racer_cannot_finish_level() {
        let (mut world, mut host) = setup_fatal_bump();
        world.souls_saved = 7;

        assert_eq!(tick(&mut world, &mut host), TickStatus::PlayerDied);
        assert_eq!(host.lives(), 2);
        assert_eq!(host.score(), 0);
    }

    #[test]
    fn test_dead_racer_earns_no_kills() {
        let (mut world, mut host) = setup_fatal_bump();
        world.entities.clear();
        let pos = world.racer().body.pos;
        let zombie = world.add_entity(Entity::zombie(pos));
        if let Some(z) = world.entity_mut(zombie) {
            z.body.hp = 1;
        }

        assert_eq!(tick(&mut world, &mut host), TickStatus::PlayerDied);
        assert_eq!(host.score(), 0);
        assert_eq!(world.entity(zombie).map(|z| z.body.hp), Some(1));
        assert_eq!(host.sound_count(SoundId::PedDie), 0);
    }

    #[test]
    fn test_sweep_stops_when_racer_dies() {
        let (mut world, mut host) = setup();
        world.entities.clear();
        world.add_entity(Entity::human(world.racer().body.pos));
        let heal = world.add_entity(Entity::heal(DVec2::new(100.0, 200.0)));

        assert_eq!(tick(&mut world, &mut host), TickStatus::PlayerDied);
        assert_eq!(world.entity(heal).map(|e| e.body.pos.y), Some(200.0));
    }

    #[test]
    fn test_soul_quota_pays_bonus() {
        let (mut world, mut host) = setup();
        world.souls_saved = 7;
        assert_eq!(tick(&mut world, &mut host), TickStatus::LevelFinished);
        assert_eq!(host.score(), 5000);
        assert_eq!(world.bonus(), 5000);
    }

    #[test]
    fn test_last_soul_finishes_next_tick() {
        let (mut world, mut host) = setup();
        world.souls_saved = 6;
        let pos = world.racer().body.pos + DVec2::new(0.0, 4.0);
        world.add_entity(Entity::soul(pos));

        assert_eq!(tick(&mut world, &mut host), TickStatus::Continue);
        assert_eq!(world.souls_saved(), 7);
        assert_eq!(host.score(), 100);

        assert_eq!(tick(&mut world, &mut host), TickStatus::LevelFinished);
        assert_eq!(host.score(), 100 + 4999);
    }

    #[test]
    fn test_fired_spray_moves_same_tick() {
        let (mut world, mut host) = setup();
        host.push_key(Key::Fire);
        tick(&mut world, &mut host);

        let sprays: Vec<&Entity> = world
            .entities()
            .iter()
            .filter(|e| matches!(e.kind, EntityKind::Spray { .. }))
            .collect();
        assert_eq!(sprays.len(), 1);
        assert_eq!(sprays[0].body.pos.y, 32.0 + 16.0 * 2.0);
        assert_eq!(world.racer().sprays, 9);
    }

    #[test]
    fn test_spray_kills_zombie() {
        let (mut world, mut host) = setup();
        world.entities.clear();
        // just out of the racer's reach, inside the spray's after one step
        let zombie = world.add_entity(Entity::zombie(DVec2::new(128.0, 70.0)));
        if let Some(z) = world.entity_mut(zombie) {
            z.body.hp = 1;
        }
        host.push_key(Key::Fire);

        assert_eq!(tick(&mut world, &mut host), TickStatus::Continue);
        assert_eq!(host.score(), 150);
        assert!(world.entity(zombie).is_none());
        assert_eq!(count_kind(&world, |k| matches!(k, EntityKind::Spray { .. })), 0);
        assert_eq!(host.sound_count(SoundId::PedDie), 1);
    }

    #[test]
    fn test_spray_with_last_charge() {
        let (mut world, mut host) = setup();
        world.racer.sprays = 1;
        host.push_key(Key::Fire);
        host.push_key(Key::Fire);
        tick(&mut world, &mut host);
        tick(&mut world, &mut host);
        assert_eq!(world.racer().sprays, 0);
        assert_eq!(host.sound_count(SoundId::PlayerSpray), 1);
    }

    #[test]
    fn test_zombie_heal_drop_rate() {
        let mut host = HeadlessHost::new(SeededRng::new(2024));
        host.set_muted(true);
        let trials = 2000;
        let mut drops = 0;

        for _ in 0..trials {
            let mut world = World::new("assets", Tuning::default());
            world.entities.clear();
            let zombie = world.add_entity(Entity::zombie(DVec2::new(128.0, 150.0)));
            if let Some(z) = world.entity_mut(zombie) {
                z.body.hp = 1;
            }
            world.add_entity(Entity::spray(DVec2::new(128.0, 150.0), 90));

            let score = host.score();
            tick(&mut world, &mut host);
            assert_eq!(host.score() - score, 150);
            drops += count_kind(&world, |k| *k == EntityKind::Goodie(GoodieKind::Heal));
        }

        let rate = drops as f64 / f64::from(trials);
        assert!((0.15..0.25).contains(&rate), "drop rate {rate}");
    }
}
