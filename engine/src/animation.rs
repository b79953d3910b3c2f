use crate::surface::Surface;

/// Something redrawn from scratch on every frame.
pub trait Layer {
    fn name(&self) -> &'static str;
    /// The viewport changed. Must not touch anything but the stored dimensions.
    fn resize(&mut self, width: f64, height: f64);
    fn render(&mut self, now_ms: f64, surface: &mut dyn Surface);
}

/// Host primitive that calls back once per display refresh.
pub trait FrameScheduler {
    type Handle: Copy;

    /// Registers the next frame callback. `None` when the host refused.
    fn request_frame(&mut self) -> Option<Self::Handle>;
    fn cancel_frame(&mut self, handle: Self::Handle);
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct PendingResize {
    width: f64,
    height: f64,
    at_ms: f64,
}

/// Drives a [`Layer`] onto a [`Surface`], one frame per scheduler tick, until stopped.
pub struct Animation<L, S, F: FrameScheduler> {
    layer: L,
    surface: S,
    scheduler: F,
    pending_frame: Option<F::Handle>,
    pending_resize: Option<PendingResize>,
    debounce_ms: f64,
    last_frame_ms: Option<f64>,
    running: bool,
}

impl<L: Layer, S: Surface, F: FrameScheduler> Animation<L, S, F> {
    pub fn new(layer: L, surface: S, scheduler: F, debounce_ms: f64) -> Self {
        Animation {
            layer,
            surface,
            scheduler,
            pending_frame: None,
            pending_resize: None,
            debounce_ms,
            last_frame_ms: None,
            running: false,
        }
    }

    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.pending_frame = self.scheduler.request_frame();
        log::debug!("{}: animation started", self.layer.name());
    }

    /// Frame callback. The handle that fired is spent either way.
    pub fn on_frame(&mut self, now_ms: f64) {
        self.pending_frame = None;
        if !self.running {
            return;
        }
        self.last_frame_ms = Some(now_ms);
        if let Some(resize) = self.pending_resize {
            if now_ms - resize.at_ms >= self.debounce_ms {
                self.pending_resize = None;
                self.surface.resize(resize.width, resize.height);
                self.layer.resize(resize.width, resize.height);
                log::debug!("{}: resized to {}x{}", self.layer.name(), resize.width, resize.height);
            }
        }
        self.layer.render(now_ms, &mut self.surface);
        self.pending_frame = self.scheduler.request_frame();
    }

    /// Viewport resize event. Only remembered here; the next frame past the
    /// debounce window applies it.
    pub fn notify_resize(&mut self, width: f64, height: f64, now_ms: f64) {
        self.pending_resize = Some(PendingResize { width, height, at_ms: now_ms });
    }

    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.pending_resize = None;
        if let Some(handle) = self.pending_frame.take() {
            self.scheduler.cancel_frame(handle);
        }
        log::debug!("{}: animation stopped", self.layer.name());
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Timestamp of the last rendered frame, on the scheduler's clock.
    pub fn last_frame_ms(&self) -> Option<f64> {
        self.last_frame_ms
    }

    pub fn layer(&self) -> &L {
        &self.layer
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }
}
