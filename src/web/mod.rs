//! Browser front-end: canvas surface, animation-frame loop and the
//! `StreakBackground` export for host pages.

mod canvas;

pub use canvas::CanvasSurface;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, error, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, Window};

use crate::core::{StreakConfig, StreakRenderer, Viewport};
use crate::loop_state::LoopState;

/// Canvas attribute holding an optional JSON `StreakConfig`
const CONFIG_ATTRIBUTE: &str = "data-config";

/// Frames between debug stats lines
const STATS_EVERY: u64 = 600;

type Renderer = StreakRenderer<CanvasSurface, StdRng>;

/// Slot holding the animation-frame closure so it can re-request itself
type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn viewport(window: &Window) -> Viewport {
    let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Viewport::new(dim(window.inner_width()), dim(window.inner_height()))
}

fn request_frame(window: &Window, slot: &FrameSlot) -> Result<i32, JsValue> {
    let slot = slot.borrow();
    let closure = slot.as_ref().ok_or("frame callback released")?;
    window.request_animation_frame(closure.as_ref().unchecked_ref())
}

/// Full-viewport, behind content, transparent to pointer input
fn apply_background_style(canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
    let style = canvas.style();
    style.set_property("position", "fixed")?;
    style.set_property("inset", "0")?;
    style.set_property("width", "100%")?;
    style.set_property("height", "100%")?;
    style.set_property("pointer-events", "none")?;
    style.set_property("z-index", "-1")?;
    Ok(())
}

fn load_config(canvas: &HtmlCanvasElement) -> StreakConfig {
    let Some(json) = canvas.get_attribute(CONFIG_ATTRIBUTE) else {
        return StreakConfig::default();
    };
    StreakConfig::from_json(&json).unwrap_or_else(|e| {
        warn!(error = %e, "Ignoring invalid streak config");
        StreakConfig::default()
    })
}

/// Animation-frame loop driving a streak renderer.
///
/// Dropping the loop (or calling `stop`) cancels the pending frame and
/// removes the resize listener.
pub struct WebFrameLoop {
    renderer: Rc<RefCell<Renderer>>,
    state: Rc<Cell<LoopState>>,
    /// Id of the pending `requestAnimationFrame`, if any
    frame_id: Rc<Cell<Option<i32>>>,
    frame_closure: FrameSlot,
    resize_closure: Option<Closure<dyn FnMut()>>,
}

impl WebFrameLoop {
    /// Mount on `canvas` and start animating.
    ///
    /// Returns `Ok(None)` when the canvas has no 2D context.
    pub fn start(canvas: HtmlCanvasElement, config: StreakConfig) -> Result<Option<Self>, JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        apply_background_style(&canvas)?;

        let Some(renderer) = StreakRenderer::mount(
            CanvasSurface::acquire(canvas),
            viewport(&window),
            config,
            StdRng::from_entropy(),
        ) else {
            return Ok(None);
        };
        let renderer = Rc::new(RefCell::new(renderer));

        // Resize - no debounce, every event resizes immediately
        let resize_closure = {
            let renderer = renderer.clone();
            let window = window.clone();
            Closure::wrap(Box::new(move || {
                renderer.borrow_mut().resize(viewport(&window));
            }) as Box<dyn FnMut()>)
        };
        window.add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref())?;

        let state = Rc::new(Cell::new(LoopState::Running));
        let frame_id = Rc::new(Cell::new(None));
        let frame_closure: FrameSlot = Rc::new(RefCell::new(None));

        {
            let renderer = renderer.clone();
            let state = state.clone();
            let frame_id = frame_id.clone();
            let slot = frame_closure.clone();
            let window = window.clone();
            *frame_closure.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                frame_id.set(None);
                if !state.get().is_running() {
                    return;
                }

                {
                    let mut renderer = renderer.borrow_mut();
                    renderer.frame();
                    let stats = renderer.stats();
                    if stats.frames % STATS_EVERY == 0 {
                        debug!(
                            frames = stats.frames,
                            recycled = stats.recycled,
                            fps = format!("{:.1}", renderer.fps()),
                            "stats"
                        );
                    }
                }

                match request_frame(&window, &slot) {
                    Ok(id) => frame_id.set(Some(id)),
                    Err(e) => {
                        error!(?e, "Failed to request animation frame");
                        state.set(LoopState::Stopped);
                    }
                }
            }) as Box<dyn FnMut()>));
        }

        frame_id.set(Some(request_frame(&window, &frame_closure)?));
        info!("Streak background started");

        Ok(Some(Self {
            renderer,
            state,
            frame_id,
            frame_closure,
            resize_closure: Some(resize_closure),
        }))
    }

    /// Cancel the pending frame and unsubscribe from resize events
    pub fn stop(&mut self) {
        if !self.state.get().is_running() && self.resize_closure.is_none() {
            return;
        }
        self.state.set(LoopState::Stopped);

        if let Some(window) = web_sys::window() {
            if let Some(id) = self.frame_id.take() {
                if let Err(e) = window.cancel_animation_frame(id) {
                    error!(?e, "Failed to cancel animation frame");
                }
            }
            if let Some(resize) = self.resize_closure.take() {
                if let Err(e) = window.remove_event_listener_with_callback(
                    "resize",
                    resize.as_ref().unchecked_ref(),
                ) {
                    error!(?e, "Failed to remove resize listener");
                }
            }
        }

        // Breaks the closure -> slot reference cycle
        self.frame_closure.borrow_mut().take();
        info!(frames = self.renderer.borrow().stats().frames, "Streak background stopped");
    }

    pub fn state(&self) -> LoopState {
        self.state.get()
    }

    pub fn renderer(&self) -> &Rc<RefCell<Renderer>> {
        &self.renderer
    }
}

impl Drop for WebFrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Decorative streak background mounted on a host page canvas
#[wasm_bindgen]
pub struct StreakBackground {
    frame_loop: Option<WebFrameLoop>,
}

#[wasm_bindgen]
impl StreakBackground {
    /// Mount on the canvas with id `canvas_id`. Without a 2D context the
    /// background stays inactive and draws nothing.
    pub fn mount(canvas_id: &str) -> Result<StreakBackground, JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or("canvas not found")?
            .dyn_into::<HtmlCanvasElement>()?;

        let config = load_config(&canvas);
        let frame_loop = WebFrameLoop::start(canvas, config)?;
        Ok(StreakBackground { frame_loop })
    }

    /// Stop animating and release the resize listener. Frame totals stay
    /// readable afterwards.
    pub fn unmount(&mut self) {
        if let Some(frame_loop) = self.frame_loop.as_mut() {
            frame_loop.stop();
        }
    }

    #[wasm_bindgen(getter)]
    pub fn active(&self) -> bool {
        self.frame_loop
            .as_ref()
            .is_some_and(|l| l.state().is_running())
    }

    /// Frames rendered since mount
    #[wasm_bindgen(getter)]
    pub fn frames(&self) -> f64 {
        self.frame_loop
            .as_ref()
            .map_or(0.0, |l| l.renderer().borrow().stats().frames as f64)
    }
}
