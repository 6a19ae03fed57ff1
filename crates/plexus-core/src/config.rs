use crate::color::Rgb;
use crate::error::FieldError;
use serde::{Deserialize, Serialize};

/// Every tunable of the field. Ranges are half-open `(min, max)` pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Hard cap on particle count, bounds per-frame cost.
    pub max_particles: usize,
    /// Surface area (px²) per particle.
    pub area_per_particle: f32,
    pub size_range: (f32, f32),
    pub density_range: (f32, f32),
    pub speed_range: (f32, f32),
    /// Phase advance per frame is `speed * phase_rate`.
    pub phase_rate: f32,
    /// Rest-point wander per frame, in px.
    pub drift_amplitude: f32,
    pub pointer_radius: f32,
    /// Repulsion displacement is `force * density * repulsion_scale`.
    pub repulsion_scale: f32,
    /// Fraction `1 / return_divisor` of the offset to rest is removed per frame.
    pub return_divisor: f32,
    /// Link threshold is `(width / link_divisor) * (height / link_divisor)`.
    pub link_divisor: f32,
    /// Link alpha is `1 - d² / link_falloff`.
    pub link_falloff: f32,
    pub link_width: f32,
    /// Clamp link alpha into [0, 1] before it reaches the surface.
    pub clamp_link_opacity: bool,
    pub particle_color: Rgb,
    pub link_color: Rgb,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            max_particles: 100,
            area_per_particle: 15_000.0,
            size_range: (1.0, 4.0),
            density_range: (1.0, 31.0),
            speed_range: (0.1, 0.6),
            phase_rate: 0.01,
            drift_amplitude: 0.5,
            pointer_radius: 150.0,
            repulsion_scale: 0.6,
            return_divisor: 10.0,
            link_divisor: 7.0,
            link_falloff: 20_000.0,
            link_width: 1.0,
            clamp_link_opacity: false,
            particle_color: Rgb::ACCENT,
            link_color: Rgb::new(108, 99, 255),
        }
    }
}

impl FieldConfig {
    /// Parse a (possibly partial) JSON object; missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, FieldError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Number of particles for a `width` x `height` surface.
    pub fn particle_count(&self, width: f32, height: f32) -> usize {
        if !(width > 0.0 && height > 0.0) || !(self.area_per_particle > 0.0) {
            return 0;
        }
        let area = width * height;
        if !area.is_finite() {
            return 0;
        }
        ((area / self.area_per_particle).floor() as usize).min(self.max_particles)
    }
}
