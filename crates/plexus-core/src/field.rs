use crate::color::Rgb;
use crate::config::FieldConfig;
use crate::forces::drift::apply_drift;
use crate::forces::pointer::{compute_pointer_force, PointerState};
use crate::forces::tether::relax_toward_base;
use crate::links::{link_opacity, link_threshold};
use crate::particle::Particle;
use crate::surface::Surface;
use rand::Rng;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// The particle collection plus the surface it lives on.
pub struct Field {
    particles: Vec<Particle>,
    width: f32,
    height: f32,
    config: FieldConfig,
}

impl Field {
    /// Populate a `width` x `height` surface.
    ///
    /// Count is `min(max_particles, floor(area / area_per_particle))`.
    pub fn new<R: Rng + ?Sized>(width: f32, height: f32, config: FieldConfig, rng: &mut R) -> Self {
        let mut field = Self {
            particles: Vec::new(),
            width,
            height,
            config,
        };
        field.reinitialize(width, height, rng);
        field
    }

    /// Discard every particle and respawn for the new dimensions.
    pub fn reinitialize<R: Rng + ?Sized>(&mut self, width: f32, height: f32, rng: &mut R) {
        self.width = width;
        self.height = height;
        let count = self.config.particle_count(width, height);

        self.particles = (0..count)
            .map(|_| Particle::spawn(rng, width, height, &self.config))
            .collect();

        log::debug!("field reinitialized: {}x{} -> {} particles", width, height, count);
    }

    /// Recolor the current particles and every particle spawned later.
    pub fn set_particle_color(&mut self, color: Rgb) {
        self.config.particle_color = color;
        for p in &mut self.particles {
            p.color = color;
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Advance every particle one frame, then draw them.
    ///
    /// Returns the number of particles drawn.
    pub fn advance<S: Surface + ?Sized>(&mut self, pointer: &PointerState, surface: &mut S) -> usize {
        self.step(pointer);
        self.draw_particles(surface)
    }

    /// Physics only: drift, then pointer repulsion or tether relaxation.
    pub fn step(&mut self, pointer: &PointerState) {
        let cfg = &self.config;
        let update = |p: &mut Particle| {
            apply_drift(p, cfg.phase_rate, cfg.drift_amplitude);

            let force = compute_pointer_force(p.position, p.density, cfg.repulsion_scale, pointer);
            if force.in_range() {
                p.position += force.push();
            } else {
                relax_toward_base(p, cfg.return_divisor);
            }
        };

        #[cfg(feature = "parallel")]
        self.particles.par_iter_mut().for_each(update);

        #[cfg(not(feature = "parallel"))]
        self.particles.iter_mut().for_each(update);
    }

    /// Emit one filled circle per particle.
    pub fn draw_particles<S: Surface + ?Sized>(&self, surface: &mut S) -> usize {
        let mut current = None;
        for p in &self.particles {
            if current != Some(p.color) {
                surface.set_fill_color(&p.color.to_css());
                current = Some(p.color);
            }
            surface.fill_circle(p.position, p.size);
        }
        self.particles.len()
    }

    /// Visit every linked pair `(a, b, alpha)` with `a < b`.
    ///
    /// O(n²) over the capped particle count.
    pub fn for_each_link<F: FnMut(usize, usize, f32)>(&self, mut f: F) {
        let threshold = link_threshold(self.width, self.height, self.config.link_divisor);
        let n = self.particles.len();

        for a in 0..n {
            let pa = self.particles[a].position;
            for b in (a + 1)..n {
                let dist_sq = pa.distance_squared(self.particles[b].position);
                if dist_sq < threshold {
                    let mut alpha = link_opacity(dist_sq, self.config.link_falloff);
                    if self.config.clamp_link_opacity {
                        alpha = alpha.clamp(0.0, 1.0);
                    }
                    f(a, b, alpha);
                }
            }
        }
    }

    /// Draw connector lines between nearby particles. Returns the line count.
    pub fn connect<S: Surface + ?Sized>(&self, surface: &mut S) -> usize {
        let color = self.config.link_color;
        let width = self.config.link_width;
        let mut drawn = 0;

        self.for_each_link(|a, b, alpha| {
            surface.set_stroke(&color.to_css_alpha(alpha), width);
            surface.line(self.particles[a].position, self.particles[b].position);
            drawn += 1;
        });

        drawn
    }
}
