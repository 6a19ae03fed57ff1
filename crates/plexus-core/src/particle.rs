use crate::color::Rgb;
use crate::config::FieldConfig;
use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

/// A single animated point. Plain value; the field owns them in a `Vec`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    /// Rest point the particle springs back to. Wanders every frame.
    pub base: Vec2,
    /// Circle radius in px.
    pub size: f32,
    /// Scales how far the pointer pushes this particle.
    pub density: f32,
    /// Drift phase angle in radians.
    pub phase: f32,
    /// Drift angular speed.
    pub speed: f32,
    pub color: Rgb,
}

impl Particle {
    /// A particle resting at `position`.
    pub fn at_rest(position: Vec2, size: f32, density: f32, speed: f32, phase: f32, color: Rgb) -> Self {
        Self {
            position,
            base: position,
            size,
            density,
            phase,
            speed,
            color,
        }
    }

    /// Spawn uniformly over `[0, width) x [0, height)` with the configured
    /// size, density, speed and phase distributions.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, width: f32, height: f32, config: &FieldConfig) -> Self {
        let position = Vec2::new(uniform(rng, 0.0, width), uniform(rng, 0.0, height));
        Self::at_rest(
            position,
            uniform(rng, config.size_range.0, config.size_range.1),
            uniform(rng, config.density_range.0, config.density_range.1),
            uniform(rng, config.speed_range.0, config.speed_range.1),
            uniform(rng, 0.0, TAU),
            config.particle_color,
        )
    }

    /// Offset from the rest point.
    #[inline]
    pub fn offset(&self) -> Vec2 {
        self.position - self.base
    }
}

/// Sample `[min, max)`. Degenerate ranges return `min` instead of panicking.
#[inline]
fn uniform<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max > min {
        rng.gen_range(min..max)
    } else {
        min
    }
}
