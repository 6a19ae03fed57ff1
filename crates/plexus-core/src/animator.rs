use crate::config::FieldConfig;
use crate::field::Field;
use crate::forces::pointer::PointerState;
use crate::surface::Surface;
use glam::Vec2;
use rand::Rng;

/// What one frame drew.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub particles: usize,
    pub links: usize,
    /// True when this frame started by replacing the collection.
    pub reinitialized: bool,
}

/// Owns the field and the latest external signals.
///
/// Pointer and resize updates are last-write-wins and only take effect on the
/// next [`Animator::frame`]; a resize never swaps the collection mid-frame.
pub struct Animator<R: Rng> {
    field: Field,
    pointer: PointerState,
    pending_resize: Option<(f32, f32)>,
    rng: R,
    frames: u64,
}

impl<R: Rng> Animator<R> {
    pub fn new(width: f32, height: f32, config: FieldConfig, mut rng: R) -> Self {
        let pointer = PointerState::absent(config.pointer_radius);
        let field = Field::new(width, height, config, &mut rng);
        log::info!(
            "animator created: {}x{} surface, {} particles",
            width,
            height,
            field.len()
        );
        Self {
            field,
            pointer,
            pending_resize: None,
            rng,
            frames: 0,
        }
    }

    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.pointer.position = Some(Vec2::new(x, y));
    }

    /// The pointer left the surface.
    pub fn clear_pointer(&mut self) {
        self.pointer.position = None;
    }

    /// Record new surface dimensions, applied at the start of the next frame.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.pending_resize = Some((width, height));
    }

    pub fn has_pending_resize(&self) -> bool {
        self.pending_resize.is_some()
    }

    /// Run one tick: apply a pending resize, clear, advance + draw every
    /// particle, then draw the links.
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S) -> FrameStats {
        let reinitialized = self.apply_pending_resize();

        surface.clear(self.field.width(), self.field.height());
        let particles = self.field.advance(&self.pointer, surface);
        let links = self.field.connect(surface);
        self.frames += 1;

        FrameStats {
            particles,
            links,
            reinitialized,
        }
    }

    /// Physics-only tick for callers that render the particles themselves.
    ///
    /// Returns true when the collection was replaced by a pending resize.
    pub fn step(&mut self) -> bool {
        let reinitialized = self.apply_pending_resize();
        self.field.step(&self.pointer);
        self.frames += 1;
        reinitialized
    }

    fn apply_pending_resize(&mut self) -> bool {
        match self.pending_resize.take() {
            Some((width, height)) => {
                self.field.reinitialize(width, height, &mut self.rng);
                true
            }
            None => false,
        }
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut Field {
        &mut self.field
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    /// Frames run so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
