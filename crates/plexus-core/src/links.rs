/// Squared-distance threshold below which two particles are linked:
/// `(width / divisor) * (height / divisor)`.
#[inline]
pub fn link_threshold(width: f32, height: f32, divisor: f32) -> f32 {
    (width / divisor) * (height / divisor)
}

/// Line alpha for a pair at squared distance `dist_sq`: `1 - dist_sq / falloff`.
///
/// Not clamped. With a large surface the threshold exceeds `falloff` and
/// distant links come out negative; callers decide whether to clamp.
#[inline]
pub fn link_opacity(dist_sq: f32, falloff: f32) -> f32 {
    1.0 - dist_sq / falloff
}
