use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, Window};

use crate::animation::{Animation, FrameScheduler, Layer};
use crate::backdrop::Backdrop;
use crate::canvas::CanvasSurface;
use crate::config::BackdropConfig;
use crate::error::BackdropError;
use crate::orbs::{OrbConfig, OrbField};
use crate::random::{Lcg, MathRandom, RandomSource};
use crate::surface::Surface;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
}

/// `requestAnimationFrame`, always re-registering the same callback.
struct RafScheduler {
    window: Window,
    callback: FrameCallback,
}

impl FrameScheduler for RafScheduler {
    type Handle = i32;

    fn request_frame(&mut self) -> Option<i32> {
        let slot = self.callback.borrow();
        let closure = slot.as_ref()?;
        match self.window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(handle) => Some(handle),
            Err(e) => {
                log::warn!("requestAnimationFrame failed: {:?}", e);
                None
            }
        }
    }

    fn cancel_frame(&mut self, handle: i32) {
        if let Err(e) = self.window.cancel_animation_frame(handle) {
            log::warn!("cancelAnimationFrame failed: {:?}", e);
        }
    }
}

fn viewport_size(window: &Window) -> (f64, f64) {
    let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (width, height)
}

/// Current time on the same page-relative clock as rAF timestamps. Without
/// `performance`, the last frame's timestamp stands in.
fn now_ms<L: Layer>(window: &Window, animation: &Animation<L, CanvasSurface, RafScheduler>) -> f64 {
    match window.performance() {
        Some(performance) => performance.now(),
        None => animation.last_frame_ms().unwrap_or(0.0),
    }
}

fn create_canvas(window: &Window) -> Option<HtmlCanvasElement> {
    let document = window.document()?;
    let canvas = document.create_element("canvas").ok()?.dyn_into::<HtmlCanvasElement>().ok()?;
    document.body()?.append_child(&canvas).ok()?;
    Some(canvas)
}

/// A running layer bound to a canvas: frame loop, resize listener and teardown.
struct Mount<L: Layer + 'static> {
    window: Window,
    canvas: HtmlCanvasElement,
    owns_canvas: bool,
    animation: Rc<RefCell<Animation<L, CanvasSurface, RafScheduler>>>,
    frame_callback: FrameCallback,
    resize_callback: Option<Closure<dyn FnMut()>>,
}

impl<L: Layer + 'static> Mount<L> {
    /// `Ok(None)` when no 2D context is available: the background is then
    /// simply absent.
    fn start(
        canvas: HtmlCanvasElement,
        owns_canvas: bool,
        z_index: i32,
        debounce_ms: f64,
        build: impl FnOnce(f64, f64) -> Result<L, BackdropError>,
    ) -> Result<Option<Self>, BackdropError> {
        let Some(window) = web_sys::window() else {
            log::debug!("no window, background disabled");
            return Ok(None);
        };
        let Some(mut surface) = CanvasSurface::acquire(canvas.clone()) else {
            log::debug!("2d context unavailable, background disabled");
            if owns_canvas {
                canvas.remove();
            }
            return Ok(None);
        };

        let (width, height) = viewport_size(&window);
        surface.pin_behind(z_index);
        surface.resize(width, height);
        let layer = match build(width, height) {
            Ok(layer) => layer,
            Err(e) => {
                if owns_canvas {
                    canvas.remove();
                }
                return Err(e);
            }
        };

        let frame_callback: FrameCallback = Rc::new(RefCell::new(None));
        let scheduler = RafScheduler { window: window.clone(), callback: Rc::clone(&frame_callback) };
        let animation = Rc::new(RefCell::new(Animation::new(layer, surface, scheduler, debounce_ms)));

        {
            let animation = Rc::clone(&animation);
            *frame_callback.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
                animation.borrow_mut().on_frame(now);
            }) as Box<dyn FnMut(f64)>));
        }

        let resize_callback = {
            let animation = Rc::clone(&animation);
            let window = window.clone();
            Closure::wrap(Box::new(move || {
                let (width, height) = viewport_size(&window);
                let mut animation = animation.borrow_mut();
                let now = now_ms(&window, &animation);
                animation.notify_resize(width, height, now);
            }) as Box<dyn FnMut()>)
        };
        if let Err(e) = window.add_event_listener_with_callback("resize", resize_callback.as_ref().unchecked_ref()) {
            log::warn!("resize listener not registered: {:?}", e);
        }

        animation.borrow_mut().start();
        Ok(Some(Mount {
            window,
            canvas,
            owns_canvas,
            animation,
            frame_callback,
            resize_callback: Some(resize_callback),
        }))
    }

    fn is_running(&self) -> bool {
        self.animation.borrow().is_running()
    }
}

impl<L: Layer + 'static> Drop for Mount<L> {
    fn drop(&mut self) {
        self.animation.borrow_mut().stop();
        if let Some(callback) = self.resize_callback.take() {
            let _ = self.window.remove_event_listener_with_callback("resize", callback.as_ref().unchecked_ref());
        }
        // the frame closure owns the animation, which owns this slot
        self.frame_callback.borrow_mut().take();
        if self.owns_canvas {
            self.canvas.remove();
        }
    }
}

fn random_source(seed: Option<u32>) -> Box<dyn RandomSource> {
    match seed {
        Some(seed) => Box::new(Lcg::new(seed)),
        None => Box::new(MathRandom),
    }
}

fn start_backdrop(
    canvas: HtmlCanvasElement,
    owns_canvas: bool,
    config: BackdropConfig,
    seed: Option<u32>,
) -> Result<Option<Mount<Backdrop>>, BackdropError> {
    let debounce_ms = config.resize_debounce_ms;
    Mount::start(canvas, owns_canvas, -1, debounce_ms, move |width, height| {
        Backdrop::new(config, width, height, random_source(seed).as_mut())
    })
}

fn start_orbs(canvas: HtmlCanvasElement, owns_canvas: bool, config: OrbConfig) -> Result<Option<Mount<OrbField>>, BackdropError> {
    let debounce_ms = config.resize_debounce_ms;
    Mount::start(canvas, owns_canvas, -2, debounce_ms, move |width, height| OrbField::new(config, width, height))
}

/// Missing options mean defaults.
fn parse_options<T: serde::de::DeserializeOwned + Default>(options: JsValue) -> Result<T, BackdropError> {
    if options.is_undefined() || options.is_null() {
        return Ok(T::default());
    }
    serde_wasm_bindgen::from_value(options).map_err(|e| BackdropError::InvalidOptions(e.to_string()))
}

/// Drifting dots, links and glyphs painted behind the page.
#[wasm_bindgen]
pub struct AmbientBackground {
    mount: Option<Mount<Backdrop>>,
}

#[wasm_bindgen]
impl AmbientBackground {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement) -> Result<AmbientBackground, JsValue> {
        let mount = start_backdrop(canvas, false, BackdropConfig::default(), None)?;
        Ok(AmbientBackground { mount })
    }

    /// `options` is a partial `BackdropConfig` object; `seed` makes the layout reproducible.
    pub fn with_options(canvas: HtmlCanvasElement, options: JsValue, seed: Option<u32>) -> Result<AmbientBackground, JsValue> {
        let config: BackdropConfig = parse_options(options)?;
        let mount = start_backdrop(canvas, false, config, seed)?;
        Ok(AmbientBackground { mount })
    }

    /// Creates its own canvas at the end of `<body>`; it goes away on unmount.
    pub fn attach() -> Result<AmbientBackground, JsValue> {
        Self::attach_with_options(JsValue::UNDEFINED, None)
    }

    /// [`AmbientBackground::attach`] with a partial `BackdropConfig` and optional seed.
    pub fn attach_with_options(options: JsValue, seed: Option<u32>) -> Result<AmbientBackground, JsValue> {
        let config: BackdropConfig = parse_options(options)?;
        let Some(canvas) = web_sys::window().as_ref().and_then(create_canvas) else {
            return Ok(AmbientBackground { mount: None });
        };
        let mount = start_backdrop(canvas, true, config, seed)?;
        Ok(AmbientBackground { mount })
    }

    pub fn is_running(&self) -> bool {
        self.mount.as_ref().map(|m| m.is_running()).unwrap_or(false)
    }

    pub fn unmount(&mut self) {
        self.mount = None;
    }
}

/// Soft floating color orbs, one layer below [`AmbientBackground`].
#[wasm_bindgen]
pub struct GradientBackground {
    mount: Option<Mount<OrbField>>,
}

#[wasm_bindgen]
impl GradientBackground {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement) -> Result<GradientBackground, JsValue> {
        let mount = start_orbs(canvas, false, OrbConfig::default())?;
        Ok(GradientBackground { mount })
    }

    pub fn with_options(canvas: HtmlCanvasElement, options: JsValue) -> Result<GradientBackground, JsValue> {
        let config: OrbConfig = parse_options(options)?;
        let mount = start_orbs(canvas, false, config)?;
        Ok(GradientBackground { mount })
    }

    pub fn attach() -> Result<GradientBackground, JsValue> {
        let Some(canvas) = web_sys::window().as_ref().and_then(create_canvas) else {
            return Ok(GradientBackground { mount: None });
        };
        let mount = start_orbs(canvas, true, OrbConfig::default())?;
        Ok(GradientBackground { mount })
    }

    pub fn is_running(&self) -> bool {
        self.mount.as_ref().map(|m| m.is_running()).unwrap_or(false)
    }

    pub fn unmount(&mut self) {
        self.mount = None;
    }
}
