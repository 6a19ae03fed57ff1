//! Particle field simulation for an animated "plexus" background.
//!
//! Particles wander around a drifting rest point, are pushed away by the
//! pointer, spring back when it leaves, and are joined by translucent lines
//! when close. Drawing goes through the [`Surface`] trait so the same code
//! drives a browser canvas or a test recorder.

pub mod animator;
pub mod color;
pub mod config;
pub mod error;
pub mod field;
pub mod forces;
pub mod links;
pub mod particle;
pub mod surface;

pub use animator::{Animator, FrameStats};
pub use color::Rgb;
pub use config::FieldConfig;
pub use error::FieldError;
pub use field::Field;
pub use forces::pointer::PointerState;
pub use particle::Particle;
pub use surface::{DrawCommand, RecordingSurface, Surface};
