//! Rendering collaborator
//!
//! The simulation holds no rendering state. Each frame `draw_world` issues
//! primitive draw calls against a `Canvas`; a backend decides what a call
//! means. `VertexBatch` tessellates into GPU-ready triangle lists.

pub mod shapes;
pub mod vertex;

pub use vertex::{Color, Vertex, colors};

use glam::Vec2;

use crate::consts::{HUD_HEALTH_POS, HUD_SOULS_POS};
use crate::sim::{Aabb, EffectShape, World};

/// Primitive drawing surface
pub trait Canvas {
    fn clear(&mut self, color: Color);
    fn fill_rect(&mut self, bounds: &Aabb, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn line(&mut self, start: Vec2, end: Vec2, width: f32, color: Color);
    fn text(&mut self, pos: Vec2, text: &str, color: Color);
    /// Finish the frame
    fn present(&mut self);
}

/// Draw one frame: units, then effects, then the HUD
pub fn draw_world(world: &World, canvas: &mut impl Canvas, show_hud: bool) {
    canvas.clear(colors::BACKGROUND);

    canvas.fill_rect(&world.hero.body.bounds, colors::HERO);
    for creep in &world.creeps {
        canvas.fill_rect(&creep.body.bounds, colors::CREEP);
    }

    for effect in &world.hero.effects {
        match effect.shape {
            EffectShape::Point { pos, radius } => canvas.fill_circle(pos, radius, colors::EFFECT),
            EffectShape::Line { start, end, width } => {
                canvas.line(start, end, width, colors::EFFECT)
            }
        }
    }

    if show_hud {
        canvas.text(
            Vec2::from(HUD_HEALTH_POS),
            &format!("Health: {}", world.hero.body.health),
            colors::HUD_TEXT,
        );
        canvas.text(
            Vec2::from(HUD_SOULS_POS),
            &format!("Souls: {}", world.hero.souls),
            colors::HUD_TEXT,
        );
    }

    canvas.present();
}

/// A text draw call (glyph rasterization is left to the backend)
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub pos: Vec2,
    pub text: String,
    pub color: Color,
}

/// Canvas that tessellates every primitive into one vertex list per frame
#[derive(Debug, Default)]
pub struct VertexBatch {
    clear_color: Color,
    vertices: Vec<Vertex>,
    labels: Vec<TextLabel>,
    frame_vertices: Vec<Vertex>,
    frame_labels: Vec<TextLabel>,
    frames_presented: u64,
}

impl VertexBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Vertices of the last presented frame
    pub fn vertices(&self) -> &[Vertex] {
        &self.frame_vertices
    }

    /// Raw bytes of the last presented frame, ready for a buffer upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.frame_vertices)
    }

    /// Text of the last presented frame
    pub fn labels(&self) -> &[TextLabel] {
        &self.frame_labels
    }

    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }
}

impl Canvas for VertexBatch {
    fn clear(&mut self, color: Color) {
        self.clear_color = color;
        self.vertices.clear();
        self.labels.clear();
    }

    fn fill_rect(&mut self, bounds: &Aabb, color: Color) {
        self.vertices.extend(shapes::rect(bounds, color));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.vertices
            .extend(shapes::circle(center, radius, color, shapes::CIRCLE_SEGMENTS));
    }

    fn line(&mut self, start: Vec2, end: Vec2, width: f32, color: Color) {
        self.vertices.extend(shapes::line(start, end, width, color));
    }

    fn text(&mut self, pos: Vec2, text: &str, color: Color) {
        self.labels.push(TextLabel {
            pos,
            text: text.to_string(),
            color,
        });
    }

    fn present(&mut self) {
        std::mem::swap(&mut self.vertices, &mut self.frame_vertices);
        std::mem::swap(&mut self.labels, &mut self.frame_labels);
        self.vertices.clear();
        self.labels.clear();
        self.frames_presented += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Effect, InputEvent, Key, TickInput, tick};
    use crate::tuning::Tuning;

    /// Records calls by name
    #[derive(Default)]
    struct CallLog(Vec<String>);

    impl Canvas for CallLog {
        fn clear(&mut self, _: Color) {
            self.0.push("clear".into());
        }
        fn fill_rect(&mut self, _: &Aabb, color: Color) {
            self.0.push(format!("rect {:?}", color));
        }
        fn fill_circle(&mut self, _: Vec2, radius: f32, _: Color) {
            self.0.push(format!("circle {}", radius));
        }
        fn line(&mut self, _: Vec2, _: Vec2, width: f32, _: Color) {
            self.0.push(format!("line {}", width));
        }
        fn text(&mut self, _: Vec2, text: &str, _: Color) {
            self.0.push(text.to_string());
        }
        fn present(&mut self) {
            self.0.push("present".into());
        }
    }

    #[test]
    fn test_draw_order_and_hud() {
        let mut world = World::empty(1, Tuning::default());
        world.spawn_creep_at(Vec2::new(100.0, 100.0));
        world.hero.souls = 7;
        world
            .hero
            .effects
            .push(Effect::point(Vec2::new(10.0, 10.0), 10.0, 20, 20));
        world
            .hero
            .effects
            .push(Effect::line(Vec2::ZERO, Vec2::X, 5.0, 20, 20));

        let mut log = CallLog::default();
        draw_world(&world, &mut log, true);

        assert_eq!(
            log.0,
            vec![
                "clear".to_string(),
                format!("rect {:?}", colors::GREEN),
                format!("rect {:?}", colors::BLUE),
                "circle 10".to_string(),
                "line 5".to_string(),
                "Health: 100".to_string(),
                "Souls: 7".to_string(),
                "present".to_string(),
            ]
        );
    }

    #[test]
    fn test_hud_can_be_hidden() {
        let world = World::empty(1, Tuning::default());
        let mut log = CallLog::default();
        draw_world(&world, &mut log, false);
        assert!(!log.0.iter().any(|c| c.starts_with("Health")));
    }

    #[test]
    fn test_vertex_batch_swaps_on_present() {
        let mut world = World::new(5, Tuning::default());
        let mut batch = VertexBatch::new();
        draw_world(&world, &mut batch, true);

        // Hero + 5 creeps, six vertices each
        assert_eq!(batch.vertices().len(), 36);
        assert_eq!(batch.vertex_bytes().len(), 36 * Vertex::STRIDE);
        assert_eq!(batch.labels().len(), 2);
        assert_eq!(batch.clear_color(), colors::BLACK);
        assert_eq!(batch.frames_presented(), 1);

        let input = TickInput::with_events(
            world.hero.center() + Vec2::X,
            [InputEvent::KeyDown(Key::R)],
        );
        tick(&mut world, &input, 16);
        draw_world(&world, &mut batch, true);
        assert_eq!(batch.frames_presented(), 2);
        // Eight burst rays add a quad each
        assert!(batch.vertices().len() >= 8 * 6);
    }
}
