//! Fixed-timestep frame loop
//!
//! Converts display-refresh callbacks into a deterministic run of fixed-size
//! updates followed by a single draw. The host owns the callback source; the
//! loop only asks it to schedule or cancel the next frame.

/// Something the loop can step and render
pub trait Frame {
    fn update(&mut self, dt: f32);
    fn draw(&mut self);
}

/// Opaque id of a scheduled frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// Host-side frame scheduler (e.g. `requestAnimationFrame`)
pub trait FrameSource {
    /// Schedule the next callback; `None` if the host refused
    fn request_frame(&mut self) -> Option<FrameHandle>;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// What a single callback did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    pub updates: u32,
    pub drew: bool,
    /// Catch-up work that was discarded at the substep cap
    pub dropped_backlog: bool,
}

/// Accumulator state plus the pending callback
#[derive(Debug)]
pub struct FrameLoop {
    fixed_dt: f32,
    max_substeps: u32,
    accumulator: f64,
    last_timestamp: Option<f64>,
    pending: Option<FrameHandle>,
    running: bool,
}

impl FrameLoop {
    pub fn new(fixed_dt: f32, max_substeps: u32) -> Self {
        Self {
            fixed_dt,
            max_substeps,
            accumulator: 0.0,
            last_timestamp: None,
            pending: None,
            running: false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Begin the callback chain. Starting a running loop does nothing.
    pub fn start(&mut self, source: &mut dyn FrameSource) {
        if self.running {
            return;
        }
        self.running = true;
        self.accumulator = 0.0;
        self.last_timestamp = None;
        self.pending = source.request_frame();
        log::info!("Frame loop started");
    }

    /// Cancel the pending callback. Safe to call any number of times.
    pub fn stop(&mut self, source: &mut dyn FrameSource) {
        if let Some(handle) = self.pending.take() {
            source.cancel_frame(handle);
        }
        if self.running {
            self.running = false;
            log::info!("Frame loop stopped");
        }
    }

    /// Handle one frame callback
    ///
    /// `timestamp_ms` is the host's monotonic clock in milliseconds. The first
    /// callback after `start` counts as zero elapsed time.
    pub fn on_frame<F: Frame + ?Sized>(
        &mut self,
        timestamp_ms: f64,
        game: &mut F,
        source: &mut dyn FrameSource,
    ) -> FrameStats {
        self.pending = None;
        if !self.running {
            return FrameStats::default();
        }

        let frame_time = match self.last_timestamp {
            Some(last) => ((timestamp_ms - last) / 1000.0).max(0.0),
            None => 0.0,
        };
        self.last_timestamp = Some(timestamp_ms);
        self.accumulator += frame_time;

        let step = self.fixed_dt as f64;
        let mut stats = FrameStats::default();
        while self.accumulator >= step && stats.updates < self.max_substeps {
            game.update(self.fixed_dt);
            self.accumulator -= step;
            stats.updates += 1;
        }

        // Saturated: drop the backlog rather than chase it forever
        if stats.updates == self.max_substeps && self.accumulator >= step {
            log::warn!(
                "Dropping {:.1} ms of simulation backlog",
                self.accumulator * 1000.0
            );
            self.accumulator %= step;
            stats.dropped_backlog = true;
        }

        game.draw();
        stats.drew = true;

        if self.running {
            self.pending = source.request_frame();
        }
        stats
    }
}
