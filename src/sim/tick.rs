//! Fixed timestep simulation tick
//!
//! One call advances the world by exactly one frame. Movement is
//! frame-locked: a port to a variable frame rate must scale speeds by the
//! elapsed time to keep the same feel.

use glam::Vec2;

use super::combat::{cast, cool_down, creep_pursue};
use super::pilot;
use super::state::{Ability, GameEvent, GamePhase, World};

/// Mouse buttons the input layer can report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Left,
    Middle,
    Right,
    Other(u8),
}

/// Keys the input layer can report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Q,
    W,
    E,
    R,
    F,
    Other(u32),
}

impl Key {
    /// Ability bound to this key, if any
    pub fn ability(self) -> Option<Ability> {
        match self {
            Key::Q => Some(Ability::ShadowRaze(0)),
            Key::W => Some(Ability::ShadowRaze(1)),
            Key::E => Some(Ability::ShadowRaze(2)),
            Key::R => Some(Ability::RazeBurst),
            Key::F => Some(Ability::Requiem),
            Key::Other(_) => None,
        }
    }

    /// Key that casts the raze in `slot`
    pub fn for_raze_slot(slot: usize) -> Option<Key> {
        match slot {
            0 => Some(Key::Q),
            1 => Some(Key::W),
            2 => Some(Key::E),
            _ => None,
        }
    }
}

/// A discrete input event polled during one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Quit,
    PointerDown { button: PointerButton, pos: Vec2 },
    KeyDown(Key),
}

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Events in the order they were polled
    pub events: Vec<InputEvent>,
    /// Current pointer position (aims the razes)
    pub pointer: Vec2,
    /// Idle/demo mode - the autopilot plays the game
    pub idle_mode: bool,
}

impl TickInput {
    pub fn with_events(pointer: Vec2, events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
            pointer,
            idle_mode: false,
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.events.contains(&InputEvent::Quit)
    }
}

/// Advance the world by one frame.
///
/// `elapsed_ms` is the real time since the previous frame; it only feeds the
/// spawn timer. Returns everything notable that happened this frame.
pub fn tick(world: &mut World, input: &TickInput, elapsed_ms: u32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if world.phase == GamePhase::Defeated {
        if input.quit_requested() {
            events.push(GameEvent::QuitRequested);
        }
        return events;
    }

    let demo;
    let input = if input.idle_mode {
        demo = pilot::demo_input(world, input);
        &demo
    } else {
        input
    };

    world.time_ticks += 1;
    world.pointer = input.pointer;

    // Age effects first so one cast on frame N is visible for `effect_ticks` frames
    world.hero.advance_effects();

    for event in &input.events {
        apply_input_event(world, event, &mut events);
    }

    world.hero.advance_movement(world.tuning.arrival_epsilon);

    for creep in &mut world.creeps {
        creep_pursue(creep, &mut world.hero, &world.tuning);
    }

    cool_down(&mut world.hero.body);
    for creep in &mut world.creeps {
        cool_down(&mut creep.body);
    }

    resolve_deaths(world, &mut events);
    advance_spawn_timer(world, elapsed_ms, &mut events);
    check_defeat(world, &mut events);

    events
}

fn apply_input_event(world: &mut World, event: &InputEvent, events: &mut Vec<GameEvent>) {
    match *event {
        InputEvent::Quit => events.push(GameEvent::QuitRequested),
        InputEvent::PointerDown {
            button: PointerButton::Right,
            pos,
        } => {
            world.hero.target = Some(pos);
        }
        InputEvent::PointerDown { .. } => {}
        InputEvent::KeyDown(key) => {
            let Some(ability) = key.ability() else {
                return;
            };
            let pointer = world.pointer;
            if let Some(hits) = cast(
                ability,
                &mut world.hero,
                &mut world.creeps,
                pointer,
                &world.tuning,
            ) {
                log::debug!("Cast {:?}: {} hits", ability, hits);
                events.push(GameEvent::AbilityCast { ability, hits });
            }
        }
    }
}

/// Remove dead creeps, crediting one kill each
pub fn resolve_deaths(world: &mut World, events: &mut Vec<GameEvent>) {
    let hero = &mut world.hero;
    world.creeps.retain(|creep| {
        if creep.body.is_dead() {
            hero.reward_kill();
            log::debug!("Creep {} killed (souls: {})", creep.id, hero.souls);
            events.push(GameEvent::CreepKilled { id: creep.id });
            false
        } else {
            true
        }
    });
}

/// Accumulate frame time and spawn one creep per elapsed interval
pub fn advance_spawn_timer(world: &mut World, elapsed_ms: u32, events: &mut Vec<GameEvent>) {
    world.spawn_timer_ms = world.spawn_timer_ms.saturating_add(elapsed_ms);
    if world.spawn_timer_ms >= world.tuning.spawn_interval_ms {
        let (id, pos) = world.spawn_creep_random();
        log::debug!("Creep {} spawned at ({:.0}, {:.0})", id, pos.x, pos.y);
        events.push(GameEvent::CreepSpawned { id, pos });
        world.spawn_timer_ms = 0;
    }
}

fn check_defeat(world: &mut World, events: &mut Vec<GameEvent>) {
    if world.hero.body.is_dead() {
        world.hero.body.health = 0;
        world.hero.target = None;
        world.phase = GamePhase::Defeated;
        log::info!(
            "Hero defeated after {} frames with {} souls",
            world.time_ticks,
            world.hero.souls
        );
        events.push(GameEvent::HeroDefeated);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FRAME_MS;
    use crate::tuning::Tuning;

    fn empty_world() -> World {
        World::empty(12345, Tuning::default())
    }

    fn keys(world: &World, keys: &[Key]) -> TickInput {
        TickInput::with_events(world.pointer, keys.iter().map(|&k| InputEvent::KeyDown(k)))
    }

    #[test]
    fn test_right_click_sets_target_and_hero_walks() {
        let mut world = empty_world();
        let input = TickInput::with_events(
            Vec2::new(500.0, 300.0),
            [InputEvent::PointerDown {
                button: PointerButton::Right,
                pos: Vec2::new(500.0, 300.0),
            }],
        );
        tick(&mut world, &input, FRAME_MS);
        assert_eq!(world.hero.target, Some(Vec2::new(500.0, 300.0)));
        assert!((world.hero.center().x - 404.0).abs() < 1e-4);

        for _ in 0..30 {
            tick(&mut world, &TickInput::default(), FRAME_MS);
        }
        assert!(world.hero.target.is_none());
        assert!(world.hero.center().distance(Vec2::new(500.0, 300.0)) <= 5.0);
    }

    #[test]
    fn test_other_buttons_and_keys_ignored() {
        let mut world = empty_world();
        let input = TickInput::with_events(
            Vec2::new(500.0, 300.0),
            [
                InputEvent::PointerDown {
                    button: PointerButton::Left,
                    pos: Vec2::new(500.0, 300.0),
                },
                InputEvent::KeyDown(Key::Other(42)),
            ],
        );
        let events = tick(&mut world, &input, FRAME_MS);
        assert!(events.is_empty());
        assert!(world.hero.target.is_none());
        assert!(world.hero.effects.is_empty());
    }

    #[test]
    fn test_quit_is_reported() {
        let mut world = empty_world();
        let input = TickInput::with_events(Vec2::ZERO, [InputEvent::Quit]);
        let events = tick(&mut world, &input, FRAME_MS);
        assert_eq!(events, vec![GameEvent::QuitRequested]);
    }

    #[test]
    fn test_raze_uses_current_pointer() {
        let mut world = empty_world();
        let id = world.spawn_creep_at(Vec2::new(400.0, 400.0));
        // Pointer straight below the hero; W lands 100 units down
        let input = TickInput::with_events(Vec2::new(400.0, 550.0), [InputEvent::KeyDown(Key::W)]);
        let events = tick(&mut world, &input, FRAME_MS);

        assert!(events.contains(&GameEvent::AbilityCast {
            ability: Ability::ShadowRaze(1),
            hits: 1
        }));
        assert_eq!(world.creep(id).map(|c| c.body.health), Some(10));
    }

    #[test]
    fn test_dead_creep_removed_once_with_one_soul() {
        let mut world = empty_world();
        let doomed = world.spawn_creep_at(Vec2::new(600.0, 300.0));
        let survivor = world.spawn_creep_at(Vec2::new(100.0, 100.0));
        world.creeps[0].body.health = -500;

        let events = tick(&mut world, &TickInput::default(), FRAME_MS);
        let kills: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, GameEvent::CreepKilled { .. }))
            .collect();
        assert_eq!(kills, vec![&GameEvent::CreepKilled { id: doomed }]);
        assert_eq!(world.hero.souls, 1);
        assert!(world.creep(doomed).is_none());
        assert!(world.creep(survivor).is_some());
        assert_eq!(world.entities().count(), 2);

        let events = tick(&mut world, &TickInput::default(), FRAME_MS);
        assert!(!events.iter().any(|e| matches!(e, GameEvent::CreepKilled { .. })));
        assert_eq!(world.hero.souls, 1);
    }

    #[test]
    fn test_burst_kills_award_souls_same_frame() {
        let mut world = empty_world();
        for i in 0..3 {
            world.spawn_creep_at(Vec2::new(100.0 + i as f32 * 40.0, 100.0));
        }
        let input = keys(&world, &[Key::R]);
        let events = tick(&mut world, &input, FRAME_MS);

        assert!(world.creeps.is_empty());
        assert_eq!(world.hero.souls, 3);
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, GameEvent::CreepKilled { .. }))
                .count(),
            3
        );
        assert_eq!(world.hero.effects.len(), 8);
    }

    #[test]
    fn test_requiem_key_spends_souls() {
        let mut world = empty_world();
        world.hero.souls = 25;
        let near = world.spawn_creep_at(Vec2::new(500.0, 300.0));
        world.creeps[0].body.health = 100;

        let cast_requiem = keys(&world, &[Key::F]);
        tick(&mut world, &cast_requiem, FRAME_MS);
        assert_eq!(world.hero.souls, 5);
        assert_eq!(world.creep(near).map(|c| c.body.health), Some(70));

        let events = tick(&mut world, &cast_requiem, FRAME_MS);
        assert!(!events.iter().any(|e| matches!(e, GameEvent::AbilityCast { .. })));
        assert_eq!(world.hero.souls, 5);
        assert_eq!(world.creep(near).map(|c| c.body.health), Some(70));
    }

    #[test]
    fn test_souls_clamped_at_max() {
        let mut world = empty_world();
        world.hero.souls = 30;
        world.spawn_creep_at(Vec2::new(100.0, 100.0));
        world.creeps[0].body.health = 0;
        tick(&mut world, &TickInput::default(), FRAME_MS);
        assert_eq!(world.hero.souls, 30);
    }

    #[test]
    fn test_effect_visible_for_twenty_frames() {
        let mut world = empty_world();
        let input = keys(&world, &[Key::Q]);
        tick(&mut world, &input, FRAME_MS);
        assert_eq!(world.hero.effects.len(), 1);
        assert_eq!(world.hero.effects[0].elapsed, 0);

        for frame in 1..20 {
            tick(&mut world, &TickInput::default(), FRAME_MS);
            assert_eq!(world.hero.effects.len(), 1, "missing at frame {frame}");
            assert_eq!(world.hero.effects[0].elapsed, frame);
        }
        tick(&mut world, &TickInput::default(), FRAME_MS);
        assert!(world.hero.effects.is_empty());
    }

    #[test]
    fn test_spawn_timer_exact_interval() {
        let mut world = empty_world();
        let events = tick(&mut world, &TickInput::default(), 1999);
        assert!(events.is_empty());
        assert_eq!(world.spawn_timer_ms, 1999);
        assert!(world.creeps.is_empty());

        let mut world = empty_world();
        let mut spawned = Vec::new();
        for _ in 0..4 {
            spawned.extend(tick(&mut world, &TickInput::default(), 500));
        }
        assert_eq!(spawned.len(), 1);
        assert!(matches!(spawned[0], GameEvent::CreepSpawned { .. }));
        assert_eq!(world.creeps.len(), 1);
        assert_eq!(world.spawn_timer_ms, 0);
    }

    #[test]
    fn test_spawn_timer_resets_not_carries() {
        let mut world = empty_world();
        tick(&mut world, &TickInput::default(), 2500);
        assert_eq!(world.creeps.len(), 1);
        assert_eq!(world.spawn_timer_ms, 0);
    }

    #[test]
    fn test_creep_melee_respects_cooldown() {
        let mut world = empty_world();
        world.spawn_creep_at(Vec2::new(430.0, 300.0));

        tick(&mut world, &TickInput::default(), FRAME_MS);
        assert_eq!(world.hero.body.health, 95);
        // Attacked, then one frame cooled off in the same tick
        assert_eq!(world.creeps[0].body.attack_cooldown, 29);

        for _ in 0..29 {
            tick(&mut world, &TickInput::default(), FRAME_MS);
        }
        assert_eq!(world.hero.body.health, 95);
        assert_eq!(world.creeps[0].body.attack_cooldown, 0);

        tick(&mut world, &TickInput::default(), FRAME_MS);
        assert_eq!(world.hero.body.health, 90);
    }

    #[test]
    fn test_hero_defeat_is_terminal() {
        let mut world = empty_world();
        world.hero.body.health = 5;
        world.spawn_creep_at(Vec2::new(420.0, 300.0));

        let events = tick(&mut world, &TickInput::default(), FRAME_MS);
        assert!(events.contains(&GameEvent::HeroDefeated));
        assert_eq!(world.phase, GamePhase::Defeated);
        assert_eq!(world.hero.body.health, 0);

        let frame = world.time_ticks;
        let creep_pos = world.creeps[0].center();
        let input = keys(&world, &[Key::R]);
        let events = tick(&mut world, &input, 5000);
        assert!(events.is_empty());
        assert_eq!(world.time_ticks, frame);
        assert_eq!(world.creeps[0].center(), creep_pos);
        assert_eq!(world.creeps.len(), 1);

        let events = tick(&mut world, &TickInput::with_events(Vec2::ZERO, [InputEvent::Quit]), 0);
        assert_eq!(events, vec![GameEvent::QuitRequested]);
    }

    #[test]
    fn test_determinism() {
        let mut a = World::new(99999, Tuning::default());
        let mut b = World::new(99999, Tuning::default());
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        for _ in 0..600 {
            tick(&mut a, &input, FRAME_MS);
            tick(&mut b, &input, FRAME_MS);
        }
        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.creeps.len(), b.creeps.len());
        assert_eq!(a.hero.souls, b.hero.souls);
        assert_eq!(a.hero.center(), b.hero.center());
    }
}
