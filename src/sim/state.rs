//! Game state and core simulation types
//!
//! The `World` owns every entity collection; nothing here is shared.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::aabb::Aabb;
use crate::heading;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Hero health reached zero; the run is over
    Defeated,
}

/// Movable, damageable state shared by the hero and creeps
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub bounds: Aabb,
    pub health: i32,
    /// Distance moved per frame
    pub speed: f32,
    /// Frames until the next basic attack is allowed
    pub attack_cooldown: u32,
    pub attack_damage: i32,
}

impl Body {
    pub fn new(center: Vec2, size: f32, health: i32, speed: f32, attack_damage: i32) -> Self {
        Self {
            bounds: Aabb::square(center, size),
            health,
            speed,
            attack_cooldown: 0,
            attack_damage,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.bounds.center
    }

    /// Move one frame's worth of `speed` toward `target`
    pub fn step_toward(&mut self, target: Vec2) {
        let dir = heading(self.center(), target);
        self.bounds.translate(dir * self.speed);
    }

    #[inline]
    pub fn take_damage(&mut self, amount: i32) {
        self.health -= amount;
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    #[inline]
    pub fn can_attack(&self) -> bool {
        self.attack_cooldown == 0
    }
}

/// Shape of an ability effect
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EffectShape {
    /// Filled circle
    Point { pos: Vec2, radius: f32 },
    /// Line between two points
    Line { start: Vec2, end: Vec2, width: f32 },
}

/// A timed marker left where an ability struck.
///
/// Damage is applied when the ability is cast; the effect only lingers.
#[derive(Debug, Clone, PartialEq)]
pub struct Effect {
    pub shape: EffectShape,
    pub damage: i32,
    /// Lifespan in frames
    pub duration: u32,
    /// Frames lived so far
    pub elapsed: u32,
}

impl Effect {
    pub fn point(pos: Vec2, radius: f32, duration: u32, damage: i32) -> Self {
        Self {
            shape: EffectShape::Point { pos, radius },
            damage,
            duration,
            elapsed: 0,
        }
    }

    pub fn line(start: Vec2, end: Vec2, width: f32, duration: u32, damage: i32) -> Self {
        Self {
            shape: EffectShape::Line { start, end, width },
            damage,
            duration,
            elapsed: 0,
        }
    }

    /// Age by one frame; returns true once expired
    pub fn advance(&mut self) -> bool {
        self.elapsed += 1;
        self.is_expired()
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// The player unit
#[derive(Debug, Clone)]
pub struct Hero {
    pub body: Body,
    pub souls: u32,
    pub max_souls: u32,
    pub souls_per_kill: u32,
    /// Point the hero is walking toward (cleared on arrival)
    pub target: Option<Vec2>,
    /// Active effects in cast order
    pub effects: Vec<Effect>,
}

impl Hero {
    pub fn new(center: Vec2, tuning: &Tuning) -> Self {
        Self {
            body: Body::new(
                center,
                tuning.hero_size,
                tuning.hero_health,
                tuning.hero_speed,
                tuning.hero_attack_damage,
            ),
            souls: 0,
            max_souls: tuning.max_souls,
            souls_per_kill: tuning.souls_per_kill,
            target: None,
            effects: Vec::new(),
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.body.center()
    }

    /// Walk toward the target, clearing it once within `arrival_epsilon`
    pub fn advance_movement(&mut self, arrival_epsilon: f32) {
        if let Some(target) = self.target {
            if self.center().distance(target) > arrival_epsilon {
                self.body.step_toward(target);
            } else {
                self.target = None;
            }
        }
    }

    /// Age every effect, dropping the expired ones (order preserved)
    pub fn advance_effects(&mut self) {
        self.effects.retain_mut(|effect| !effect.advance());
    }

    /// Credit one kill, clamped to `max_souls`
    pub fn reward_kill(&mut self) {
        self.souls = self.souls.saturating_add(self.souls_per_kill).min(self.max_souls);
    }

    /// Spend `cost` souls if available
    pub fn try_spend_souls(&mut self, cost: u32) -> bool {
        if self.souls >= cost {
            self.souls -= cost;
            true
        } else {
            false
        }
    }
}

/// An AI enemy
#[derive(Debug, Clone)]
pub struct Creep {
    pub id: u32,
    pub body: Body,
}

impl Creep {
    pub fn new(id: u32, center: Vec2, tuning: &Tuning) -> Self {
        Self {
            id,
            body: Body::new(
                center,
                tuning.creep_size,
                tuning.creep_health,
                tuning.creep_speed,
                tuning.creep_attack_damage,
            ),
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.body.center()
    }
}

/// Hero abilities, bound to keys by the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ability {
    /// Ranged nova; index into `Tuning::raze_ranges` (0 near, 1 mid, 2 far)
    ShadowRaze(usize),
    /// Souls-gated nova around the hero
    Requiem,
    /// Rays in every direction
    RazeBurst,
}

/// Something notable that happened during a frame
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    AbilityCast { ability: Ability, hits: usize },
    CreepKilled { id: u32 },
    CreepSpawned { id: u32, pos: Vec2 },
    HeroDefeated,
    QuitRequested,
}

/// Complete world state for one run
#[derive(Debug, Clone)]
pub struct World {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub hero: Hero,
    /// Living enemies, in spawn order
    pub creeps: Vec<Creep>,
    /// Milliseconds accumulated toward the next spawn
    pub spawn_timer_ms: u32,
    /// Simulation frame counter
    pub time_ticks: u64,
    /// Last known pointer position
    pub pointer: Vec2,
    next_id: u32,
}

impl World {
    /// Create a world with the hero centered and the opening creeps placed
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut world = Self::empty(seed, tuning);
        for _ in 0..world.tuning.initial_creeps {
            world.spawn_creep_random();
        }
        log::info!(
            "World created (seed {}, {} creeps)",
            seed,
            world.creeps.len()
        );
        world
    }

    /// Create a world with only the hero
    pub fn empty(seed: u64, tuning: Tuning) -> Self {
        let arena_center = Vec2::new(tuning.arena_width / 2.0, tuning.arena_height / 2.0);
        let hero = Hero::new(arena_center, &tuning);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            phase: GamePhase::Playing,
            hero,
            creeps: Vec::new(),
            spawn_timer_ms: 0,
            time_ticks: 0,
            pointer: arena_center,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn a creep at `pos`, returning its id
    pub fn spawn_creep_at(&mut self, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.creeps.push(Creep::new(id, pos, &self.tuning));
        id
    }

    /// Spawn a creep uniformly inside the margin-bounded arena
    pub fn spawn_creep_random(&mut self) -> (u32, Vec2) {
        let pos = self.random_spawn_point();
        (self.spawn_creep_at(pos), pos)
    }

    fn random_spawn_point(&mut self) -> Vec2 {
        let m = self.tuning.spawn_margin;
        let x = sample_axis(&mut self.rng, m, self.tuning.arena_width);
        let y = sample_axis(&mut self.rng, m, self.tuning.arena_height);
        Vec2::new(x, y)
    }

    /// Every unit box, hero first (draw order)
    pub fn entities(&self) -> impl Iterator<Item = &Body> {
        std::iter::once(&self.hero.body).chain(self.creeps.iter().map(|c| &c.body))
    }

    pub fn creep(&self, id: u32) -> Option<&Creep> {
        self.creeps.iter().find(|c| c.id == id)
    }

    pub fn arena_center(&self) -> Vec2 {
        Vec2::new(self.tuning.arena_width / 2.0, self.tuning.arena_height / 2.0)
    }
}

/// Uniform coordinate in `[margin, extent - margin]`; the midpoint if that is empty
fn sample_axis(rng: &mut Pcg32, margin: f32, extent: f32) -> f32 {
    let hi = extent - margin;
    if hi > margin {
        rng.random_range(margin..=hi)
    } else {
        extent / 2.0
    }
}
