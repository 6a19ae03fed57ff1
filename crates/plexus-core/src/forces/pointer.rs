use glam::Vec2;

/// Cursor/touch input as seen by the field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerState {
    /// `None` once the pointer has left the surface.
    pub position: Option<Vec2>,
    /// Repulsion only applies strictly inside this distance.
    pub radius: f32,
}

impl PointerState {
    pub fn absent(radius: f32) -> Self {
        Self {
            position: None,
            radius,
        }
    }

    pub fn at(x: f32, y: f32, radius: f32) -> Self {
        Self {
            position: Some(Vec2::new(x, y)),
            radius,
        }
    }

    pub fn is_present(&self) -> bool {
        self.position.is_some()
    }
}

impl Default for PointerState {
    fn default() -> Self {
        Self::absent(150.0)
    }
}

/// Outcome of the pointer test for one particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerForceResult {
    /// Pointer absent or not strictly inside the radius; the tether applies.
    OutOfRange,
    /// Inside the radius. Add `push` to the particle position.
    Repel { push: Vec2, magnitude: f32 },
}

impl PointerForceResult {
    pub fn in_range(&self) -> bool {
        matches!(self, PointerForceResult::Repel { .. })
    }

    /// Displacement to add to the position this frame.
    pub fn push(&self) -> Vec2 {
        match self {
            PointerForceResult::OutOfRange => Vec2::ZERO,
            PointerForceResult::Repel { push, .. } => *push,
        }
    }
}

/// Normalized falloff `(radius - distance) / radius`, floored at zero.
#[inline]
pub fn falloff(distance: f32, radius: f32) -> f32 {
    if radius <= 0.0 {
        return 0.0;
    }
    ((radius - distance) / radius).max(0.0)
}

/// Compute the pointer repulsion for a particle at `pos`.
///
/// The push points away from the pointer with length
/// `falloff * density * scale`. A particle sitting exactly on the pointer has
/// no direction and gets a zero push while still counting as in range.
pub fn compute_pointer_force(pos: Vec2, density: f32, scale: f32, pointer: &PointerState) -> PointerForceResult {
    let Some(target) = pointer.position else {
        return PointerForceResult::OutOfRange;
    };

    let to_pointer = target - pos;
    let distance = to_pointer.length();
    if !(distance < pointer.radius) {
        return PointerForceResult::OutOfRange;
    }

    let magnitude = falloff(distance, pointer.radius) * density * scale;
    let dir = to_pointer.try_normalize().unwrap_or(Vec2::ZERO);

    PointerForceResult::Repel {
        push: -dir * magnitude,
        magnitude,
    }
}
