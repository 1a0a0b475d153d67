//! The game loop: input, fixed-cadence updates, render, repeat.

use std::ops::ControlFlow;
use std::thread;
use std::time::Duration;

use game_core::{Clock, FrameScheduler, ManualClock, MatchPhase, Score, Simulation, SystemClock};

use crate::input::{apply_event, snapshot, InputSource};
use crate::render::Renderer;

/// How time passes between ticks and frames
pub trait Pace: Clock + Clone {
    fn after_tick(&self, _frame_interval: Duration) {}

    fn after_frame(&self, _frame_start: Duration, _frame_interval: Duration) {}
}

/// Runs as fast as the machine allows, one frame interval per tick
impl Pace for ManualClock {
    fn after_tick(&self, frame_interval: Duration) {
        self.advance(frame_interval);
    }
}

/// Sleeps out whatever is left of each frame
impl Pace for SystemClock {
    fn after_frame(&self, frame_start: Duration, frame_interval: Duration) {
        let elapsed = self.now().saturating_sub(frame_start);
        if let Some(rest) = frame_interval.checked_sub(elapsed) {
            thread::sleep(rest);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub ticks: u64,
    pub phase: MatchPhase,
    pub score: Score,
    /// Closed by the input rather than by the frame limit
    pub closed: bool,
}

pub struct App<C: Pace, I: InputSource, R: Renderer> {
    sim: Simulation,
    scheduler: FrameScheduler<C>,
    input: I,
    renderer: R,
    max_frames: Option<u64>,
}

impl<C: Pace, I: InputSource, R: Renderer> App<C, I, R> {
    pub fn new(sim: Simulation, clock: C, input: I, renderer: R) -> Self {
        let scheduler = FrameScheduler::from_config(clock, &sim.config);
        Self {
            sim,
            scheduler,
            input,
            renderer,
            max_frames: None,
        }
    }

    pub fn with_max_frames(mut self, max_frames: Option<u64>) -> Self {
        self.max_frames = max_frames;
        self
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    pub fn run(&mut self) -> anyhow::Result<RunSummary> {
        let clock = self.scheduler.clock().clone();
        let interval = self.scheduler.frame_interval();
        let mut ticks = 0u64;
        let mut closed = false;

        while self.max_frames.map_or(true, |max| self.scheduler.frames() < max) {
            let frame_start = clock.now();
            let fps = self.scheduler.begin_frame();

            let sim = &mut self.sim;
            let input = &mut self.input;
            let report = self.scheduler.update_phase(|dt| {
                for event in input.poll(sim) {
                    apply_event(sim, event)?;
                }
                sim.tick(dt, &snapshot(input));
                clock.after_tick(interval);
                ControlFlow::Continue(())
            });
            ticks += u64::from(report.ticks);

            self.renderer.render(&self.sim.scene(fps))?;

            if report.stopped {
                closed = true;
                break;
            }
            clock.after_frame(frame_start, interval);
        }

        let summary = RunSummary {
            frames: self.scheduler.frames(),
            ticks,
            phase: self.sim.phase(),
            score: self.sim.score,
            closed,
        };
        tracing::debug!(?summary, "loop finished");
        Ok(summary)
    }
}
