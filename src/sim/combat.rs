//! Basic attacks, cooldowns and hero abilities
//!
//! Every ability resolves instantly against the creep slice it is handed.
//! Effects spawned here are cosmetic: damage is already applied on return.

use glam::Vec2;

use super::collision::{any_corner_within, strictly_within_radius, within_radius};
use super::state::{Ability, Body, Creep, Effect, Hero};
use crate::tuning::Tuning;
use crate::{heading, polar_to_cartesian};

/// Hit `target` if the attacker is off cooldown.
///
/// Returns true when damage was dealt; the attacker's cooldown is then reset.
pub fn basic_attack(attacker: &mut Body, target: &mut Body, cooldown_ticks: u32) -> bool {
    if !attacker.can_attack() {
        return false;
    }
    target.take_damage(attacker.attack_damage);
    attacker.attack_cooldown = cooldown_ticks;
    true
}

/// Count one frame off the attack cooldown, floored at zero
#[inline]
pub fn cool_down(body: &mut Body) {
    body.attack_cooldown = body.attack_cooldown.saturating_sub(1);
}

/// Creep AI: step toward the hero and swing if it was in melee range.
///
/// Range is measured before the step. Returns true if the hero was hit.
pub fn creep_pursue(creep: &mut Creep, hero: &mut Hero, tuning: &Tuning) -> bool {
    let hero_center = hero.center();
    let dist = creep.center().distance(hero_center);
    creep.body.step_toward(hero_center);

    if dist < tuning.melee_range {
        basic_attack(&mut creep.body, &mut hero.body, tuning.attack_cooldown_ticks)
    } else {
        false
    }
}

/// Cast `ability`. Returns the number of hits dealt, or `None` if the cast
/// did not happen (unaffordable requiem or unknown raze slot).
pub fn cast(
    ability: Ability,
    hero: &mut Hero,
    creeps: &mut [Creep],
    pointer: Vec2,
    tuning: &Tuning,
) -> Option<usize> {
    match ability {
        Ability::ShadowRaze(slot) => {
            let range = *tuning.raze_ranges.get(slot)?;
            let (_, hits) = shadow_raze(hero, creeps, range, pointer, tuning);
            Some(hits)
        }
        Ability::Requiem => requiem(hero, creeps, tuning),
        Ability::RazeBurst => Some(raze_burst(hero, creeps, tuning)),
    }
}

/// Where a raze cast at `range` toward `pointer` lands
pub fn raze_point(origin: Vec2, range: f32, pointer: Vec2) -> Vec2 {
    origin + heading(origin, pointer) * range
}

/// Ranged nova: strike the point `range` units toward the pointer.
///
/// Every creep whose center is within `raze_radius` of the point takes
/// `raze_damage`. Returns the struck point and the number of creeps hit.
pub fn shadow_raze(
    hero: &mut Hero,
    creeps: &mut [Creep],
    range: f32,
    pointer: Vec2,
    tuning: &Tuning,
) -> (Vec2, usize) {
    let point = raze_point(hero.center(), range, pointer);
    hero.effects.push(Effect::point(
        point,
        tuning.raze_effect_radius,
        tuning.effect_ticks,
        tuning.raze_damage,
    ));

    let mut hits = 0;
    for creep in creeps.iter_mut() {
        if within_radius(point, creep.center(), tuning.raze_radius) {
            creep.body.take_damage(tuning.raze_damage);
            hits += 1;
        }
    }
    (point, hits)
}

/// Souls-gated nova around the hero. No-op without enough souls.
pub fn requiem(hero: &mut Hero, creeps: &mut [Creep], tuning: &Tuning) -> Option<usize> {
    if !hero.try_spend_souls(tuning.requiem_cost) {
        log::trace!("Requiem needs {} souls, have {}", tuning.requiem_cost, hero.souls);
        return None;
    }

    let origin = hero.center();
    let mut hits = 0;
    for creep in creeps.iter_mut() {
        if strictly_within_radius(origin, creep.center(), tuning.requiem_radius) {
            creep.body.take_damage(tuning.requiem_damage);
            hits += 1;
        }
    }
    Some(hits)
}

/// Fire `burst_directions` evenly spaced rays from the hero.
///
/// Each ray damages every creep with a box corner within `burst_length` of
/// the hero, at most once per creep per ray. The test is distance only, so a
/// creep in range is struck by every ray. Returns the total hit count.
pub fn raze_burst(hero: &mut Hero, creeps: &mut [Creep], tuning: &Tuning) -> usize {
    let origin = hero.center();
    let step = 360.0 / tuning.burst_directions as f32;
    let mut hits = 0;

    for i in 0..tuning.burst_directions {
        let angle = (i as f32 * step).to_radians();
        let end = origin + polar_to_cartesian(tuning.burst_length, angle);
        hero.effects.push(Effect::line(
            origin,
            end,
            tuning.burst_line_width,
            tuning.effect_ticks,
            tuning.burst_damage,
        ));

        for creep in creeps.iter_mut() {
            if any_corner_within(origin, &creep.body.bounds, tuning.burst_length) {
                creep.body.take_damage(tuning.burst_damage);
                hits += 1;
            }
        }
    }
    hits
}
