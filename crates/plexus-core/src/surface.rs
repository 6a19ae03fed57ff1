//! The 2D drawing seam.
//!
//! [`Surface`] is the subset of a canvas 2D context the field needs. The
//! bindings crate implements it for `CanvasRenderingContext2d`;
//! [`RecordingSurface`] captures the calls as [`DrawCommand`]s so tests can
//! inspect a frame.

use glam::Vec2;

pub trait Surface {
    /// Clear `[0, width) x [0, height)`.
    fn clear(&mut self, width: f32, height: f32);
    /// Set the fill style (CSS color string).
    fn set_fill_color(&mut self, color: &str);
    /// Fill a full circle with the current fill style.
    fn fill_circle(&mut self, center: Vec2, radius: f32);
    /// Set the stroke style (CSS color string) and line width.
    fn set_stroke(&mut self, color: &str, width: f32);
    /// Stroke a single segment with the current stroke style.
    fn line(&mut self, from: Vec2, to: Vec2);
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear { width: f32, height: f32 },
    FillColor(String),
    Circle { center: Vec2, radius: f32 },
    Stroke { color: String, width: f32 },
    Line { from: Vec2, to: Vec2 },
}

/// A [`Surface`] that records every call in order.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn circles(&self) -> impl Iterator<Item = (Vec2, f32)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Circle { center, radius } => Some((*center, *radius)),
            _ => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Line { from, to } => Some((*from, *to)),
            _ => None,
        })
    }

    pub fn clear_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Clear { .. }))
            .count()
    }

    pub fn reset(&mut self) {
        self.commands.clear();
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, width: f32, height: f32) {
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn set_fill_color(&mut self, color: &str) {
        self.commands.push(DrawCommand::FillColor(color.to_owned()));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32) {
        self.commands.push(DrawCommand::Circle { center, radius });
    }

    fn set_stroke(&mut self, color: &str, width: f32) {
        self.commands.push(DrawCommand::Stroke {
            color: color.to_owned(),
            width,
        });
    }

    fn line(&mut self, from: Vec2, to: Vec2) {
        self.commands.push(DrawCommand::Line { from, to });
    }
}
