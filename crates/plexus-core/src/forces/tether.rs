use crate::particle::Particle;

/// Relax the particle toward its rest point by `1 / divisor` of the offset.
///
/// No velocity state: the offset decays geometrically and never overshoots
/// for `divisor >= 1`.
#[inline]
pub fn relax_toward_base(p: &mut Particle, divisor: f32) {
    if divisor <= 0.0 {
        return;
    }
    let offset = p.offset();
    p.position -= offset / divisor;
}
