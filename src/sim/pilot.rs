//! Idle/demo autopilot
//!
//! Synthesizes the input a player would give, from world state alone. Used
//! by the headless binary and attract mode.

use glam::Vec2;

use super::collision::strictly_within_radius;
use super::state::World;
use super::tick::{InputEvent, Key, PointerButton, TickInput};
use crate::heading;

/// Frames between raze casts
const CAST_INTERVAL_TICKS: u64 = 15;
/// Frames between bursts
const BURST_INTERVAL_TICKS: u64 = 120;
/// Creeps inside the requiem ring before it is worth the souls
const REQUIEM_MIN_TARGETS: usize = 3;
/// How far the hero backs off when a creep closes in
const RETREAT_DISTANCE: f32 = 120.0;
/// Wander radius around the arena center before walking back
const HOME_RADIUS: f32 = 200.0;

/// Build this frame's input for the autopilot.
///
/// Events already present in `base` (a quit request, say) are kept.
pub fn demo_input(world: &World, base: &TickInput) -> TickInput {
    let mut input = TickInput {
        events: base.events.clone(),
        pointer: base.pointer,
        idle_mode: false,
    };
    let hero = &world.hero;
    let tuning = &world.tuning;
    let hero_center = hero.center();

    let nearest = world.creeps.iter().min_by(|a, b| {
        let da = a.center().distance_squared(hero_center);
        let db = b.center().distance_squared(hero_center);
        da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
    });

    let Some(nearest) = nearest else {
        if hero.target.is_none() && hero_center.distance(world.arena_center()) > HOME_RADIUS {
            input.events.push(right_click(world.arena_center()));
        }
        return input;
    };

    // Aim every raze at the closest threat
    let aim = nearest.center();
    input.pointer = aim;
    let dist = hero_center.distance(aim);

    if world.time_ticks % CAST_INTERVAL_TICKS == 0 {
        let slot = tuning
            .raze_ranges
            .iter()
            .position(|&range| (dist - range).abs() <= tuning.raze_radius);
        if let Some(key) = slot.and_then(Key::for_raze_slot) {
            input.events.push(InputEvent::KeyDown(key));
        }
    }

    let in_requiem = world
        .creeps
        .iter()
        .filter(|c| strictly_within_radius(hero_center, c.center(), tuning.requiem_radius))
        .count();
    if hero.souls >= tuning.requiem_cost && in_requiem >= REQUIEM_MIN_TARGETS {
        input.events.push(InputEvent::KeyDown(Key::F));
    }

    let wounded = hero.body.health * 2 < tuning.hero_health;
    if wounded && in_requiem >= REQUIEM_MIN_TARGETS && world.time_ticks % BURST_INTERVAL_TICKS == 0
    {
        input.events.push(InputEvent::KeyDown(Key::R));
    }

    if dist < tuning.melee_range + 10.0 {
        let away = hero_center + heading(aim, hero_center) * RETREAT_DISTANCE;
        input.events.push(right_click(clamp_to_arena(world, away)));
    } else if hero.target.is_none() && hero_center.distance(world.arena_center()) > HOME_RADIUS {
        input.events.push(right_click(world.arena_center()));
    }

    input
}

fn right_click(pos: Vec2) -> InputEvent {
    InputEvent::PointerDown {
        button: PointerButton::Right,
        pos,
    }
}

fn clamp_to_arena(world: &World, pos: Vec2) -> Vec2 {
    let m = world.tuning.spawn_margin;
    let max = Vec2::new(world.tuning.arena_width - m, world.tuning.arena_height - m);
    pos.clamp(Vec2::splat(m), max.max(Vec2::splat(m)))
}
