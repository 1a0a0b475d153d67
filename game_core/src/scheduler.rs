//! Fixed-cadence update loop with bounded catch-up.
//!
//! Each rendered frame gets an update phase: ticks repeat until the frame
//! interval has elapsed or `max_frameskip` ticks have run, whichever comes
//! first. Every tick is handed the wall-clock milliseconds since the
//! previous tick as its step size.

use std::cell::Cell;
use std::ops::ControlFlow;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::Config;

/// Time source for the scheduler
pub trait Clock {
    /// Monotonic time since an arbitrary origin
    fn now(&self) -> Duration;
}

/// Wall clock backed by [`Instant`]
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Outcome of one update phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateReport {
    /// Ticks run before handing over to the render
    pub ticks: u32,
    /// True if the frame interval elapsed, false if the catch-up cap hit first
    pub caught_up: bool,
    /// A tick asked the loop to stop
    pub stopped: bool,
}

/// Drives update ticks and measures the render cadence
#[derive(Debug)]
pub struct FrameScheduler<C: Clock> {
    clock: C,
    frame_interval: Duration,
    max_frameskip: u32,
    last_tick: Duration,
    last_frame: Option<Duration>,
    frames: u64,
}

impl<C: Clock> FrameScheduler<C> {
    pub fn new(clock: C, frame_interval: Duration, max_frameskip: u32) -> Self {
        let now = clock.now();
        Self {
            clock,
            frame_interval,
            max_frameskip: max_frameskip.max(1),
            last_tick: now,
            last_frame: None,
            frames: 0,
        }
    }

    pub fn from_config(clock: C, config: &Config) -> Self {
        Self::new(clock, config.frame_interval(), config.max_frameskip)
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    pub fn max_frameskip(&self) -> u32 {
        self.max_frameskip
    }

    /// Frames started so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Mark the start of a frame and return the render rate implied by the
    /// time since the previous one. The first frame reports 0.
    pub fn begin_frame(&mut self) -> f32 {
        let now = self.clock.now();
        let fps = match self.last_frame {
            Some(prev) if now > prev => (1.0 / (now - prev).as_secs_f64()) as f32,
            _ => 0.0,
        };
        self.last_frame = Some(now);
        self.frames += 1;
        fps
    }

    /// Run ticks until the frame interval has elapsed or the catch-up cap is
    /// reached. `tick` receives the milliseconds since the previous tick and
    /// may break to stop the loop.
    pub fn update_phase<F>(&mut self, mut tick: F) -> UpdateReport
    where
        F: FnMut(f32) -> ControlFlow<()>,
    {
        let start = self.clock.now();
        let deadline = start + self.frame_interval;
        let mut now = start;
        let mut ticks = 0;
        let mut stopped = false;

        while now < deadline && ticks < self.max_frameskip {
            let tick_start = self.clock.now();
            let dt = tick_start.saturating_sub(self.last_tick);
            self.last_tick = tick_start;
            ticks += 1;

            if tick(duration_ms(dt)).is_break() {
                stopped = true;
                break;
            }
            now = self.clock.now();
        }

        let report = UpdateReport {
            ticks,
            caught_up: self.clock.now() >= deadline,
            stopped,
        };
        tracing::trace!(frame = self.frames, ?report, "update phase");
        report
    }
}

fn duration_ms(d: Duration) -> f32 {
    (d.as_nanos() as f64 / 1_000_000.0) as f32
}
