//! Road scrolling and new arrivals
//!
//! Runs once per tick after every entity has moved. New border lines keep the
//! road continuous; everything else enters through a one-in-N spawn roll.

use glam::DVec2;

use super::collision::Lane;
use super::entity::{BorderColor, Entity, EntityId};
use super::state::World;
use crate::consts::*;
use crate::platform::Host;
use crate::tuning::SpawnWindow;

/// Add border pairs at the top of the screen as the road scrolls by
pub fn scroll_borders(world: &mut World) {
    let new_y = VIEW_HEIGHT - SPRITE_HEIGHT;
    world.last_white_y += ROAD_SCROLL_SPEED - world.racer.body.vel.y;
    let gap = new_y - world.last_white_y;

    if gap >= SPRITE_HEIGHT {
        world.add_border_pair(BorderColor::Yellow, new_y);
    }
    if gap >= 4.0 * SPRITE_HEIGHT {
        world.add_border_pair(BorderColor::White, new_y);
        world.last_white_y = new_y;
    }
}

fn roll(host: &mut dyn Host, window: SpawnWindow, level: u32) -> bool {
    host.rng().random_int(0, window.size(level) - 1) == 0
}

/// One spawn roll per actor type, in a fixed order
pub fn spawn_actors(world: &mut World, host: &mut dyn Host, level: u32) {
    let tuning = world.tuning.clone();
    let top = VIEW_HEIGHT;

    if roll(host, tuning.human, level) {
        let x = host.rng().random_int(0, VIEW_WIDTH as i32);
        world.add_entity(Entity::human(DVec2::new(f64::from(x), top)));
    }

    if roll(host, tuning.zombie, level) {
        let x = host.rng().random_int(0, VIEW_WIDTH as i32);
        world.add_entity(Entity::zombie(DVec2::new(f64::from(x), top)));
    }

    let lane = Lane::from_index(host.rng().random_int(0, 2));
    if roll(host, tuning.cab, level) {
        place_cab(world, host, lane);
    }

    if roll(host, tuning.oil, level) {
        let x = road_x(host);
        let size = host.rng().random_int(2, 5);
        world.add_entity(Entity::oil(DVec2::new(x, top), f64::from(size)));
    }

    if roll(host, tuning.holy_water, level) {
        let x = road_x(host);
        world.add_entity(Entity::holy_water(DVec2::new(x, top)));
    }

    if roll(host, tuning.soul, level) {
        let x = road_x(host);
        world.add_entity(Entity::soul(DVec2::new(x, top)));
    }
}

/// Random column between the road edges
fn road_x(host: &mut dyn Host) -> f64 {
    f64::from(host.rng().random_int(LEFT_EDGE as i32, RIGHT_EDGE as i32))
}

/// Lowest and highest collidable Y in a lane
///
/// The racer only counts toward the lowest.
fn lane_extent(world: &World, lane: Lane) -> (Option<f64>, Option<f64>) {
    let mut min_y: Option<f64> = None;
    let mut max_y: Option<f64> = None;
    for body in world.entities.iter().map(|e| &e.body) {
        if !body.alive || !body.collidable || !lane.contains(body.pos.x) {
            continue;
        }
        let y = body.pos.y;
        min_y = Some(min_y.map_or(y, |m| m.min(y)));
        max_y = Some(max_y.map_or(y, |m| m.max(y)));
    }

    let racer = &world.racer.body;
    if lane.contains(racer.pos.x) {
        min_y = Some(min_y.map_or(racer.pos.y, |m| m.min(racer.pos.y)));
    }
    (min_y, max_y)
}

/// Find a lane with room at the bottom or top and add a cab there
///
/// Tries at most three lanes starting at `first`.
pub fn place_cab(world: &mut World, host: &mut dyn Host, first: Lane) -> Option<EntityId> {
    let racer_speed = world.racer.body.vel.y;
    let mut lane = first;

    for _ in 0..Lane::ALL.len() {
        let (min_y, max_y) = lane_extent(world, lane);

        if min_y.is_none_or(|y| y > VIEW_HEIGHT / 3.0) {
            let speed = racer_speed + f64::from(host.rng().random_int(2, 4));
            let pos = DVec2::new(lane.spawn_x(), SPRITE_HEIGHT / 2.0);
            log::debug!("Cab enters {lane:?} lane from below at speed {speed}");
            return Some(world.add_entity(Entity::cab(pos, speed, lane)));
        }

        if max_y.is_none_or(|y| y < VIEW_HEIGHT * 2.0 / 3.0) {
            let speed = racer_speed - f64::from(host.rng().random_int(2, 4));
            let pos = DVec2::new(lane.spawn_x(), VIEW_HEIGHT - SPRITE_HEIGHT / 2.0);
            log::debug!("Cab enters {lane:?} lane from above at speed {speed}");
            return Some(world.add_entity(Entity::cab(pos, speed, lane)));
        }

        lane = lane.next();
    }

    log::debug!("No lane has room for a cab");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::HeadlessHost;
    use crate::sim::entity::EntityKind;
    use crate::sim::rng::ScriptedRng;
    use crate::tuning::Tuning;

    fn world() -> World {
        World::new("assets", Tuning::default())
    }

    fn cab_in(world: &World, id: EntityId) -> (Lane, f64, f64) {
        match world.entity(id) {
            Some(Entity {
                body,
                kind: EntityKind::Cab { lane, .. },
            }) => (*lane, body.pos.y, body.vel.y),
            other => panic!("expected a cab, got {other:?}"),
        }
    }

    #[test]
    fn test_cab_enters_from_below_in_open_lane() {
        let mut world = world();
        let mut host = HeadlessHost::new(ScriptedRng::with_script([3]));
        let id = place_cab(&mut world, &mut host, Lane::Left).expect("room");
        assert_eq!(cab_in(&world, id), (Lane::Left, 8.0, 3.0));
        assert_eq!(world.entity(id).map(|e| e.body.pos.x), Some(LEFT_LANE_X));
    }

    #[test]
    fn test_racer_blocks_bottom_of_middle_lane() {
        // racer starts at y 32 in the middle lane
        let mut world = world();
        let mut host = HeadlessHost::new(ScriptedRng::with_script([2]));
        let id = place_cab(&mut world, &mut host, Lane::Middle).expect("room");
        assert_eq!(cab_in(&world, id), (Lane::Middle, 248.0, -2.0));
    }

    #[test]
    fn test_full_lane_moves_on() {
        let mut world = world();
        world.add_entity(Entity::zombie(DVec2::new(RIGHT_LANE_X, 50.0)));
        world.add_entity(Entity::zombie(DVec2::new(RIGHT_LANE_X, 200.0)));
        let mut host = HeadlessHost::new(ScriptedRng::new());
        let id = place_cab(&mut world, &mut host, Lane::Right).expect("room");
        // wraps right -> left
        assert_eq!(cab_in(&world, id), (Lane::Left, 8.0, 4.0));
    }

    #[test]
    fn test_no_room_anywhere() {
        let mut world = world();
        for x in [LEFT_LANE_X, ROAD_CENTER, RIGHT_LANE_X] {
            world.add_entity(Entity::human(DVec2::new(x, 50.0)));
            world.add_entity(Entity::human(DVec2::new(x, 200.0)));
        }
        let before = world.entities().len();
        let mut host = HeadlessHost::new(ScriptedRng::new());
        assert_eq!(place_cab(&mut world, &mut host, Lane::Middle), None);
        assert_eq!(world.entities().len(), before);
    }

    #[test]
    fn test_lane_extent_ignores_scenery() {
        let mut world = world();
        world.add_entity(Entity::soul(DVec2::new(LEFT_LANE_X, 20.0)));
        assert_eq!(lane_extent(&world, Lane::Left), (None, None));
        assert_eq!(lane_extent(&world, Lane::Middle), (Some(32.0), None));
    }

    fn count(world: &World, color: BorderColor) -> usize {
        world
            .entities()
            .iter()
            .filter(|e| e.kind == EntityKind::BorderLine(color))
            .count()
    }

    #[test]
    fn test_scroll_adds_border_pairs() {
        let mut world = world();
        world.entities.clear();
        // marker 192 -> 188 -> 184 -> 180, gap already past one sprite height
        for _ in 0..3 {
            scroll_borders(&mut world);
        }
        assert_eq!(world.last_white_y(), 180.0);
        assert_eq!(count(&world, BorderColor::Yellow), 6);
        assert_eq!(count(&world, BorderColor::White), 0);

        scroll_borders(&mut world);
        assert_eq!(world.last_white_y(), 240.0);
        assert_eq!(count(&world, BorderColor::Yellow), 8);
        assert_eq!(count(&world, BorderColor::White), 2);

        // fresh marker: a gap of 4 adds nothing
        scroll_borders(&mut world);
        assert_eq!(world.entities().len(), 10);
    }

    #[test]
    fn test_scroll_white_pair_resets_marker() {
        let mut world = world();
        world.last_white_y = 180.0;
        world.entities.clear();
        world.racer.body.vel.y = 4.0;
        // 180 - 4 - 4 = 172, gap 68
        scroll_borders(&mut world);
        assert_eq!(world.entities().len(), 4);
        assert_eq!(world.last_white_y(), 240.0);
    }

    #[test]
    fn test_spawn_rolls_in_order() {
        let mut world = world();
        world.entities.clear();
        // human hit at x 10, zombie miss, lane 0, cab miss, oil hit at x 100 size 4,
        // holy water and soul miss
        let mut host = HeadlessHost::new(ScriptedRng::with_script([0, 10, 1, 0, 1, 0, 100, 4, 1, 1]));
        spawn_actors(&mut world, &mut host, 1);
        let kinds: Vec<&EntityKind> = world.entities().iter().map(|e| &e.kind).collect();
        assert_eq!(kinds.len(), 2);
        assert!(matches!(kinds[0], EntityKind::Human(_)));
        assert_eq!(world.entities()[0].body.pos, DVec2::new(10.0, 256.0));
        assert!(matches!(kinds[1], EntityKind::Goodie(_)));
        assert_eq!(world.entities()[1].body.pos, DVec2::new(100.0, 256.0));
        assert_eq!(world.entities()[1].body.size, 4.0);
        assert_eq!(host.rng_mut().remaining(), 0);
    }
}
