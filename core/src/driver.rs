//! Cooperative periodic timer for frame-based hosts.
//!
//! The host reports elapsed wall-clock time each frame; the driver replays the
//! ticks that fell due against the run it was armed for.

use crate::config::SimulationConfig;
use crate::engine::{Simulation, TickOutcome, TickToken};
use crate::traits::{FrameSink, NotificationSink, RandomSource};

#[derive(Debug, Clone)]
pub struct TickDriver {
    interval_ms: f64,
    accumulated_ms: f64,
    max_ticks_per_advance: u32,
    token: Option<TickToken>,
}

impl TickDriver {
    pub fn new(interval_ms: u64, max_ticks_per_advance: u32) -> Self {
        Self {
            interval_ms: interval_ms.max(1) as f64,
            accumulated_ms: 0.0,
            max_ticks_per_advance: max_ticks_per_advance.max(1),
            token: None,
        }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(config.tick_interval_ms, config.max_ticks_per_frame)
    }

    pub fn arm(&mut self, token: TickToken) {
        self.token = Some(token);
        self.accumulated_ms = 0.0;
    }

    pub fn cancel(&mut self) {
        self.token = None;
        self.accumulated_ms = 0.0;
    }

    pub fn is_armed(&self) -> bool {
        self.token.is_some()
    }

    /// Number of ticks due after `elapsed_ms` more milliseconds.
    ///
    /// A backlog beyond the per-advance cap is dropped rather than carried.
    pub fn advance(&mut self, elapsed_ms: f64) -> u32 {
        if !(elapsed_ms > 0.0) || !elapsed_ms.is_finite() {
            return 0;
        }
        self.accumulated_ms += elapsed_ms;
        let due = (self.accumulated_ms / self.interval_ms).floor();
        if due >= self.max_ticks_per_advance as f64 {
            self.accumulated_ms = 0.0;
            return self.max_ticks_per_advance;
        }
        self.accumulated_ms -= due * self.interval_ms;
        due as u32
    }

    /// Fires every due tick at `sim`. Disarms itself once the run stops.
    pub fn pump<R: RandomSource>(
        &mut self,
        elapsed_ms: f64,
        sim: &mut Simulation<R>,
        frames: &mut dyn FrameSink,
        notifier: &mut dyn NotificationSink,
    ) -> TickOutcome {
        let Some(token) = self.token else {
            return TickOutcome::Idle;
        };
        let mut outcome = TickOutcome::Idle;
        for _ in 0..self.advance(elapsed_ms) {
            outcome = sim.on_timer(token, frames, notifier);
            if outcome != TickOutcome::Advanced {
                break;
            }
        }
        if !sim.is_running() || sim.token() != Some(token) {
            self.cancel();
        }
        outcome
    }
}
