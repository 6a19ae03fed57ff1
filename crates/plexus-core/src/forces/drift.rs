use crate::particle::Particle;
use glam::Vec2;

/// Advance the drift phase and move the rest point one step along the wave.
///
/// `phase += speed * phase_rate`, then `base += (sin, cos)(phase) * amplitude`.
#[inline]
pub fn apply_drift(p: &mut Particle, phase_rate: f32, amplitude: f32) {
    p.phase += p.speed * phase_rate;
    p.base += drift_step(p.phase, amplitude);
}

#[inline]
pub fn drift_step(phase: f32, amplitude: f32) -> Vec2 {
    Vec2::new(phase.sin(), phase.cos()) * amplitude
}
