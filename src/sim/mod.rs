//! Frame-locked simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One `tick` per frame, no delta-time scaling of movement
//! - Seeded RNG only
//! - Stable iteration order (creeps in spawn order)
//! - No rendering or platform dependencies

pub mod aabb;
pub mod collision;
pub mod combat;
pub mod pilot;
pub mod state;
pub mod tick;

pub use aabb::Aabb;
pub use combat::{basic_attack, cast, cool_down, raze_burst, requiem, shadow_raze};
pub use state::{Ability, Body, Creep, Effect, EffectShape, GameEvent, GamePhase, Hero, World};
pub use tick::{InputEvent, Key, PointerButton, TickInput, tick};
