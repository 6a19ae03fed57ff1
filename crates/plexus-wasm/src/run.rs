//! Self-driving mode: the field owns a `requestAnimationFrame` loop and
//! listens to window pointer and resize events itself.

use crate::canvas::CanvasSurface;
use crate::{js_error, parse_config};
use plexus_core::{Animator, FieldError, Rgb};
use rand::rngs::ThreadRng;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Event, HtmlCanvasElement, MouseEvent, Window};

type SharedAnimator = Rc<RefCell<Animator<ThreadRng>>>;
type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// CSS custom property holding the theme accent.
const THEME_COLOR_PROPERTY: &str = "--primary-color";

/// Keeps the loop and its listeners alive. Call `stop()` to tear down.
#[wasm_bindgen]
pub struct PlexusHandle {
    animator: SharedAnimator,
    running: Rc<Cell<bool>>,
    window: Window,
    listeners: Vec<(&'static str, Closure<dyn FnMut(Event)>)>,
}

#[wasm_bindgen]
impl PlexusHandle {
    /// Stop requesting frames and detach the window listeners.
    #[wasm_bindgen]
    pub fn stop(&mut self) {
        // the loop may already have ended on its own; listeners still need detaching
        self.running.set(false);
        if self.listeners.is_empty() {
            return;
        }
        for (name, listener) in self.listeners.drain(..) {
            let _ = self
                .window
                .remove_event_listener_with_callback(name, listener.as_ref().unchecked_ref());
        }
        log::info!("plexus loop stopped after {} frames", self.animator.borrow().frames());
    }

    #[wasm_bindgen]
    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    #[wasm_bindgen]
    pub fn particle_count(&self) -> usize {
        self.animator.borrow().field().len()
    }

    /// Recolor every particle, e.g. after a theme switch.
    #[wasm_bindgen]
    pub fn set_particle_color(&self, color: &str) -> Result<(), JsValue> {
        let rgb = Rgb::from_hex(color).map_err(js_error)?;
        self.animator.borrow_mut().field_mut().set_particle_color(rgb);
        Ok(())
    }
}

impl Drop for PlexusHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Size the canvas to the window, populate it and start animating.
///
/// `config_json` is an optional partial `FieldConfig` object. The particle
/// color falls back to the page's `--primary-color` when it parses.
#[wasm_bindgen]
pub fn start(canvas_id: &str, config_json: Option<String>) -> Result<PlexusHandle, JsValue> {
    let window = web_sys::window().ok_or_else(|| canvas_error("no window"))?;
    let document = window.document().ok_or_else(|| canvas_error("no document"))?;
    let canvas = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| canvas_error(&format!("no element #{canvas_id}")))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| canvas_error(&format!("#{canvas_id} is not a canvas")))?;
    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| canvas_error("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()?;

    let mut config = parse_config(config_json)?;
    if let Some(rgb) = theme_color(&window) {
        config.particle_color = rgb;
    }

    let (width, height) = fit_to_window(&window, &canvas);
    let animator: SharedAnimator = Rc::new(RefCell::new(Animator::new(
        width,
        height,
        config,
        rand::thread_rng(),
    )));
    let running = Rc::new(Cell::new(true));

    let mut handle = PlexusHandle {
        animator: animator.clone(),
        running: running.clone(),
        window: window.clone(),
        listeners: Vec::new(),
    };

    {
        let animator = animator.clone();
        handle.listen("mousemove", move |event: Event| {
            if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                animator
                    .borrow_mut()
                    .set_pointer(mouse.client_x() as f32, mouse.client_y() as f32);
            }
        })?;
    }
    {
        let animator = animator.clone();
        handle.listen("mouseout", move |_| animator.borrow_mut().clear_pointer())?;
    }
    {
        let animator = animator.clone();
        let window = window.clone();
        handle.listen("resize", move |_| {
            let (width, height) = fit_to_window(&window, &canvas);
            let mut animator = animator.borrow_mut();
            // the theme may have switched since the field was built
            if let Some(rgb) = theme_color(&window) {
                animator.field_mut().set_particle_color(rgb);
            }
            animator.resize(width, height);
        })?;
    }

    run_loop(window, animator, running, CanvasSurface::new(ctx))?;
    Ok(handle)
}

impl PlexusHandle {
    fn listen<F>(&mut self, name: &'static str, f: F) -> Result<(), JsValue>
    where
        F: FnMut(Event) + 'static,
    {
        let listener = Closure::<dyn FnMut(Event)>::new(f);
        self.window
            .add_event_listener_with_callback(name, listener.as_ref().unchecked_ref())?;
        self.listeners.push((name, listener));
        Ok(())
    }
}

/// Schedule `frame` once per repaint until `running` is cleared.
fn run_loop(
    window: Window,
    animator: SharedAnimator,
    running: Rc<Cell<bool>>,
    mut surface: CanvasSurface,
) -> Result<(), JsValue> {
    let callback: FrameCallback = Rc::new(RefCell::new(None));
    let next = callback.clone();
    let scheduler = window.clone();

    *callback.borrow_mut() = Some(Closure::new(move || {
        if !running.get() {
            // drop our own closure; it is freed once this call returns
            let _ = next.borrow_mut().take();
            return;
        }

        let stats = animator.borrow_mut().frame(&mut surface);
        if stats.reinitialized {
            log::debug!("resized: {} particles", stats.particles);
        }

        let scheduled = match next.borrow().as_ref() {
            Some(cb) => match scheduler.request_animation_frame(cb.as_ref().unchecked_ref()) {
                Ok(_) => true,
                Err(err) => {
                    log::error!("requestAnimationFrame failed: {:?}", err);
                    false
                }
            },
            None => false,
        };
        if !scheduled {
            // nothing will call us again: break the closure's self-reference
            running.set(false);
            let _ = next.borrow_mut().take();
        }
    }));

    if let Some(cb) = callback.borrow().as_ref() {
        window.request_animation_frame(cb.as_ref().unchecked_ref())?;
    }
    Ok(())
}

/// Match the canvas backing store to the viewport; returns the new size.
fn fit_to_window(window: &Window, canvas: &HtmlCanvasElement) -> (f32, f32) {
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(canvas.width() as f64);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(canvas.height() as f64);

    canvas.set_width(width as u32);
    canvas.set_height(height as u32);
    (width as f32, height as f32)
}

/// Accent color from `--primary-color`, if the page sets a parseable one.
fn theme_color(window: &Window) -> Option<Rgb> {
    let value = window
        .document()
        .and_then(|doc| doc.document_element())
        .and_then(|root| window.get_computed_style(&root).ok().flatten())
        .and_then(|style| style.get_property_value(THEME_COLOR_PROPERTY).ok())
        .unwrap_or_default();

    if value.trim().is_empty() {
        return None;
    }
    match Rgb::from_hex(&value) {
        Ok(rgb) => Some(rgb),
        Err(err) => {
            log::warn!("{THEME_COLOR_PROPERTY}: {err}, keeping the configured color");
            None
        }
    }
}

fn canvas_error(msg: &str) -> JsValue {
    js_error(FieldError::Canvas(msg.to_owned()))
}
