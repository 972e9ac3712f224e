use std::fmt::Debug;

use log::{debug, trace, warn};

use crate::error::Result;
use crate::frame::draw_frame;
use crate::layer::WaveCanvasConfig;
use crate::surface::Surface;

/// The host's "call me on the next frame" primitive.
///
/// Only one request is outstanding per canvas at any time. A cancelled
/// request must never be delivered.
pub trait FrameScheduler {
    type Handle: Copy + PartialEq + Debug;

    fn request_frame(&mut self) -> Result<Self::Handle>;

    fn cancel_frame(&mut self, handle: Self::Handle) -> Result<()>;
}

/// Per-run animation bookkeeping, owned by a single canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationState<H> {
    start: Option<f64>,
    frame: Option<H>,
}

impl<H> AnimationState<H> {
    fn new() -> Self {
        Self {
            start: None,
            frame: None,
        }
    }

    /// Milliseconds since the first frame. The first call records `timestamp`
    /// as the start time, so it always yields `0`.
    pub fn elapsed(&mut self, timestamp: f64) -> f64 {
        let start = *self.start.get_or_insert(timestamp);

        timestamp - start
    }

    pub fn start_time(&self) -> Option<f64> {
        self.start
    }

    pub fn pending_frame(&self) -> Option<&H> {
        self.frame.as_ref()
    }
}

/// A continuously redrawn wave surface.
///
/// `start` sizes the surface and asks the scheduler for a frame; every
/// delivered frame repaints the surface and asks for the next one until
/// `stop` cancels the outstanding request.
pub struct WaveCanvas<S, F: FrameScheduler> {
    surface: S,
    scheduler: F,
    config: WaveCanvasConfig,
    state: Option<AnimationState<F::Handle>>,
}

impl<S, F: FrameScheduler> WaveCanvas<S, F> {
    pub fn config(&self) -> &WaveCanvasConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }

    pub fn state(&self) -> Option<&AnimationState<F::Handle>> {
        self.state.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.state.is_some()
    }

    /// Cancels the outstanding frame and forgets the animation state.
    /// Calling it on a stopped canvas does nothing.
    pub fn stop(&mut self) -> Result<()> {
        if let Some(state) = self.state.take() {
            if let Some(handle) = state.frame {
                trace!("cancelling frame {:?}", handle);
                self.scheduler.cancel_frame(handle)?;
            }

            debug!("animation stopped");
        }

        Ok(())
    }
}

impl<S: Surface, F: FrameScheduler> WaveCanvas<S, F> {
    pub fn new(surface: S, scheduler: F, config: WaveCanvasConfig) -> Self {
        Self {
            surface,
            scheduler,
            config,
            state: None,
        }
    }

    /// Sizes the surface and requests the first frame. Does nothing while
    /// already running.
    pub fn start(&mut self) -> Result<()> {
        if self.state.is_some() {
            return Ok(());
        }

        let (width, height) = self.config.dimensions();
        self.surface.resize(width, height)?;

        let mut state = AnimationState::new();
        state.frame = Some(self.scheduler.request_frame()?);
        self.state = Some(state);

        debug!(
            "animation started on {}x{} surface with {} layers",
            width,
            height,
            self.config.waves.len()
        );

        Ok(())
    }

    /// Delivers a frame at `timestamp` milliseconds.
    ///
    /// Returns `false` without drawing when the canvas is stopped or has no
    /// frame outstanding. A failed draw stops the loop.
    pub fn on_frame(&mut self, timestamp: f64) -> Result<bool> {
        let state = match self.state.as_mut() {
            Some(state) => state,
            None => return Ok(false),
        };

        if state.frame.take().is_none() {
            return Ok(false);
        }

        let elapsed = state.elapsed(timestamp);

        if let Err(err) = draw_frame(&mut self.surface, &self.config, elapsed) {
            self.state = None;
            return Err(err);
        }

        match self.scheduler.request_frame() {
            Ok(handle) => {
                if let Some(state) = self.state.as_mut() {
                    state.frame = Some(handle);
                }

                Ok(true)
            }
            Err(err) => {
                self.state = None;
                Err(err)
            }
        }
    }

    /// Swaps the configuration. A running canvas is torn down and set up
    /// again from scratch; an identical config changes nothing.
    pub fn set_config(&mut self, config: WaveCanvasConfig) -> Result<()> {
        if config == self.config {
            return Ok(());
        }

        let running = self.is_running();

        self.stop()?;
        self.config = config;

        if running {
            self.start()?;
        }

        Ok(())
    }
}

impl<S, F: FrameScheduler> Drop for WaveCanvas<S, F> {
    fn drop(&mut self) {
        if let Err(err) = self.stop() {
            warn!("Failed to cancel pending frame: {}", err);
        }
    }
}

/// Frame scheduler for hosts without a display-driven callback.
///
/// Requests fall due one interval after the previous one; the first is due
/// right away. Time is plain milliseconds fed in through [`poll`], so the
/// same scheduler runs against a wall clock or a simulated one.
///
/// [`poll`]: FixedRateScheduler::poll
#[derive(Debug, Clone)]
pub struct FixedRateScheduler {
    interval: f64,
    now: f64,
    next_id: u64,
    pending: Option<(u64, f64)>,
    last_due: Option<f64>,
}

impl FixedRateScheduler {
    pub fn new(fps: f64) -> Self {
        Self::with_interval(1000.0 / fps)
    }

    pub fn with_interval(interval: f64) -> Self {
        Self {
            interval,
            now: 0.0,
            next_id: 0,
            pending: None,
            last_due: None,
        }
    }

    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// Deadline of the outstanding request, if any.
    pub fn next_due(&self) -> Option<f64> {
        self.pending.map(|(_, due)| due)
    }

    /// Advances the clock to `now` and consumes the outstanding request if
    /// it is due.
    pub fn poll(&mut self, now: f64) -> bool {
        self.now = now;

        match self.pending {
            Some((_, due)) if now >= due => {
                self.pending = None;
                self.last_due = Some(due);
                true
            }
            _ => false,
        }
    }
}

impl FrameScheduler for FixedRateScheduler {
    type Handle = u64;

    fn request_frame(&mut self) -> Result<u64> {
        let due = match self.last_due {
            Some(last) => (last + self.interval).max(self.now),
            None => self.now,
        };

        let id = self.next_id;
        self.next_id += 1;
        self.pending = Some((id, due));

        Ok(id)
    }

    fn cancel_frame(&mut self, handle: u64) -> Result<()> {
        if matches!(self.pending, Some((id, _)) if id == handle) {
            self.pending = None;
            self.last_due = None;
        }

        Ok(())
    }
}
