use plexus_core::{Animator, FieldConfig, FieldError, Rgb};
use rand::rngs::ThreadRng;
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

mod canvas;
mod logger;
mod run;

pub use canvas::CanvasSurface;
pub use run::{start, PlexusHandle};

/// Per-particle instance record: 16 bytes, `[x, y, size, density]`.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct GpuParticle {
    position: [f32; 2], // 8 bytes
    size: f32,          // 4 bytes
    density: f32,       // 4 bytes
}

/// Per-link record: 20 bytes, `[x0, y0, x1, y1, alpha]`.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct GpuLink {
    from: [f32; 2],
    to: [f32; 2],
    alpha: f32,
}

pub(crate) fn js_error(err: FieldError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Parse optional JSON overrides on top of the defaults.
pub(crate) fn parse_config(config_json: Option<String>) -> Result<FieldConfig, JsValue> {
    match config_json {
        Some(json) if !json.trim().is_empty() => FieldConfig::from_json(&json).map_err(js_error),
        _ => Ok(FieldConfig::default()),
    }
}

/// Install the console logger. `level` is one of error/warn/info/debug/trace.
#[wasm_bindgen]
pub fn init_logging(level: &str) {
    let filter = level.parse().unwrap_or(log::LevelFilter::Info);
    logger::init(filter);
}

/// A field driven by the page: it owns the loop and forwards input.
#[wasm_bindgen]
pub struct PlexusField {
    animator: Animator<ThreadRng>,
    gpu_buffer: Vec<GpuParticle>,
    link_buffer: Vec<GpuLink>,
}

#[wasm_bindgen]
impl PlexusField {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, config_json: Option<String>) -> Result<PlexusField, JsValue> {
        let config = parse_config(config_json)?;
        let animator = Animator::new(width, height, config, rand::thread_rng());

        web_sys::console::log_1(
            &format!("WASM PlexusField created: {} particles", animator.field().len()).into(),
        );

        let mut field = PlexusField {
            animator,
            gpu_buffer: Vec::new(),
            link_buffer: Vec::new(),
        };
        field.write_gpu_output();
        Ok(field)
    }

    /// Clear, advance, draw particles and links. Returns elapsed ms.
    #[wasm_bindgen]
    pub fn frame(&mut self, ctx: &CanvasRenderingContext2d) -> f32 {
        let start = js_sys::Date::now();
        let mut surface = CanvasSurface::new(ctx.clone());
        self.animator.frame(&mut surface);
        let elapsed = js_sys::Date::now() - start;
        elapsed as f32
    }

    /// Physics only; refreshes the particle and link buffers. Returns elapsed ms.
    #[wasm_bindgen]
    pub fn step(&mut self) -> f32 {
        let start = js_sys::Date::now();
        self.animator.step();
        self.write_gpu_output();
        let elapsed = js_sys::Date::now() - start;
        elapsed as f32
    }

    #[wasm_bindgen]
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.animator.set_pointer(x, y);
    }

    #[wasm_bindgen]
    pub fn clear_pointer(&mut self) {
        self.animator.clear_pointer();
    }

    /// Takes effect at the start of the next `frame`/`step`.
    #[wasm_bindgen]
    pub fn resize(&mut self, width: f32, height: f32) {
        self.animator.resize(width, height);
    }

    /// Recolor every particle, e.g. after a theme switch.
    #[wasm_bindgen]
    pub fn set_particle_color(&mut self, color: &str) -> Result<(), JsValue> {
        let rgb = Rgb::from_hex(color).map_err(js_error)?;
        self.animator.field_mut().set_particle_color(rgb);
        Ok(())
    }

    #[wasm_bindgen]
    pub fn particle_count(&self) -> usize {
        self.animator.field().len()
    }

    #[wasm_bindgen]
    pub fn frames(&self) -> f64 {
        self.animator.frames() as f64
    }

    #[wasm_bindgen]
    pub fn get_gpu_buffer_ptr(&self) -> *const f32 {
        bytemuck::cast_slice::<GpuParticle, f32>(&self.gpu_buffer).as_ptr()
    }

    #[wasm_bindgen]
    pub fn get_gpu_buffer_byte_length(&self) -> usize {
        self.gpu_buffer.len() * std::mem::size_of::<GpuParticle>()
    }

    #[wasm_bindgen]
    pub fn get_link_buffer_ptr(&self) -> *const f32 {
        bytemuck::cast_slice::<GpuLink, f32>(&self.link_buffer).as_ptr()
    }

    #[wasm_bindgen]
    pub fn link_count(&self) -> usize {
        self.link_buffer.len()
    }
}

impl PlexusField {
    fn write_gpu_output(&mut self) {
        let field = self.animator.field();

        self.gpu_buffer.clear();
        self.gpu_buffer.extend(field.particles().iter().map(|p| GpuParticle {
            position: p.position.to_array(),
            size: p.size,
            density: p.density,
        }));

        let particles = field.particles();
        let links = &mut self.link_buffer;
        links.clear();
        field.for_each_link(|a, b, alpha| {
            links.push(GpuLink {
                from: particles[a].position.to_array(),
                to: particles[b].position.to_array(),
                alpha,
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gpu_records_are_tightly_packed() {
        assert_eq!(std::mem::size_of::<GpuParticle>(), 16);
        assert_eq!(std::mem::size_of::<GpuLink>(), 20);
    }

    #[test]
    fn empty_config_uses_defaults() {
        assert_eq!(parse_config(None).ok(), Some(FieldConfig::default()));
        assert_eq!(parse_config(Some("  ".into())).ok(), Some(FieldConfig::default()));
    }
}
