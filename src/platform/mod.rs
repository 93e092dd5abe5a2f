//! Platform abstraction layer
//!
//! The simulation never talks to a window or a wall clock directly. It is
//! handed:
//! - a `TickInput` polled from an `InputSource` once per frame
//! - the elapsed milliseconds reported by a `FrameClock`

use std::collections::VecDeque;
use std::thread;
use std::time::{Duration, Instant};

use glam::Vec2;

use crate::sim::{InputEvent, TickInput};

/// Anything that can report one frame of input
pub trait InputSource {
    fn poll(&mut self) -> TickInput;
}

/// Replays a fixed list of frames, then reports idle frames forever.
///
/// The pointer position persists between frames like a real mouse.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<(Vec2, Vec<InputEvent>)>,
    pointer: Vec2,
    idle_mode: bool,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Idle frames let the autopilot drive
    pub fn idle() -> Self {
        Self {
            idle_mode: true,
            ..Self::default()
        }
    }

    /// Queue one frame of input
    pub fn push_frame(&mut self, pointer: Vec2, events: impl IntoIterator<Item = InputEvent>) {
        self.frames.push_back((pointer, events.into_iter().collect()));
    }

    /// Queue `count` frames with no events
    pub fn push_idle_frames(&mut self, count: usize) {
        for _ in 0..count {
            self.frames.push_back((self.last_pointer(), Vec::new()));
        }
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }

    fn last_pointer(&self) -> Vec2 {
        self.frames.back().map(|(p, _)| *p).unwrap_or(self.pointer)
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> TickInput {
        let events = match self.frames.pop_front() {
            Some((pointer, events)) => {
                self.pointer = pointer;
                events
            }
            None => Vec::new(),
        };
        TickInput {
            events,
            pointer: self.pointer,
            idle_mode: self.idle_mode,
        }
    }
}

/// Frame limiter and elapsed-time source
pub trait FrameClock {
    /// Finish the current frame. Returns milliseconds since the previous call.
    fn tick(&mut self) -> u32;
}

/// Wall clock that sleeps to hold a fixed frame rate
#[derive(Debug)]
pub struct FixedRateClock {
    frame: Duration,
    last: Instant,
}

impl FixedRateClock {
    pub fn new(hz: u32) -> Self {
        Self {
            frame: Duration::from_secs(1) / hz.max(1),
            last: Instant::now(),
        }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame
    }
}

impl FrameClock for FixedRateClock {
    fn tick(&mut self) -> u32 {
        let busy = self.last.elapsed();
        if busy < self.frame {
            thread::sleep(self.frame - busy);
        }
        let now = Instant::now();
        let elapsed = now.duration_since(self.last);
        self.last = now;
        u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX)
    }
}

/// Deterministic clock advancing a fixed step per frame, without sleeping
#[derive(Debug, Clone)]
pub struct ManualClock {
    step_ms: u32,
    total_ms: u64,
}

impl ManualClock {
    pub fn new(step_ms: u32) -> Self {
        Self {
            step_ms,
            total_ms: 0,
        }
    }

    pub fn total_ms(&self) -> u64 {
        self.total_ms
    }
}

impl FrameClock for ManualClock {
    fn tick(&mut self) -> u32 {
        self.total_ms += u64::from(self.step_ms);
        self.step_ms
    }
}
