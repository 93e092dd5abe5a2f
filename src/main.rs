//! Fiend Arena entry point
//!
//! Runs the fixed-rate frame loop. No window backend is wired in: frames are
//! tessellated into a `VertexBatch` and the autopilot plays.

use fiend_arena::platform::{FixedRateClock, FrameClock, InputSource, ScriptedInput};
use fiend_arena::renderer::{VertexBatch, draw_world};
use fiend_arena::sim::{GameEvent, World, tick};
use fiend_arena::{Settings, Tuning};

fn main() {
    env_logger::init();

    let settings = Settings::default();
    let tuning = Tuning::default();
    if let Err(e) = tuning.validate() {
        log::error!("Refusing to start: {}", e);
        std::process::exit(1);
    }

    let seed = settings.resolve_seed();
    log::info!("{} starting (seed {}, {} Hz)", settings.title, seed, settings.tick_hz);

    let mut world = World::new(seed, tuning);
    let mut input: Box<dyn InputSource> = if settings.idle_mode {
        Box::new(ScriptedInput::idle())
    } else {
        Box::new(ScriptedInput::new())
    };
    let mut clock = FixedRateClock::new(settings.tick_hz);
    let mut canvas = VertexBatch::new();

    let mut elapsed_ms = 0;
    let mut kills = 0u32;
    let mut running = true;

    while running {
        let frame_input = input.poll();
        for event in tick(&mut world, &frame_input, elapsed_ms) {
            match event {
                GameEvent::QuitRequested => running = false,
                GameEvent::CreepKilled { .. } => kills += 1,
                GameEvent::HeroDefeated => running = false,
                _ => {}
            }
        }

        draw_world(&world, &mut canvas, settings.show_hud);

        if world.time_ticks % u64::from(settings.tick_hz) == 0 {
            log::debug!(
                "frame {}: hp {}, souls {}, creeps {}, {} vertices",
                world.time_ticks,
                world.hero.body.health,
                world.hero.souls,
                world.creeps.len(),
                canvas.vertices().len()
            );
        }

        if settings.max_frames.is_some_and(|max| world.time_ticks >= max) {
            log::info!("Frame cap reached");
            running = false;
        }

        elapsed_ms = clock.tick();
    }

    log::info!(
        "Run over after {} frames: {} kills, {} souls, hero health {}",
        world.time_ticks,
        kills,
        world.hero.souls,
        world.hero.body.health
    );
}
