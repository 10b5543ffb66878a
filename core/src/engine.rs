use crate::analytics::{QueuePoint, RunStatistics, StatsSummary};
use crate::config::SimulationConfig;
use crate::error::{QueueError, QueueResult};
use crate::formulas::QueueParameters;
use crate::input::{read_field, ParamField};
use crate::notify::Notification;
use crate::sampling::{bernoulli, completion_probability, sample_poisson};
use crate::traits::{FrameSink, NotificationSink, ParameterSource, RandomSource};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

pub const START_NOTICE_MS: u64 = 3_500;
pub const HORIZON_NOTICE_MS: u64 = 4_000;
pub const SAFETY_NOTICE_MS: u64 = 8_000;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Horizon {
    Hours(f64),
    /// Runs until stopped explicitly (or by the safety ceiling).
    Unbounded,
}

impl Horizon {
    /// `hours <= 0` selects [`Horizon::Unbounded`]; NaN and infinities are rejected.
    pub fn from_hours(hours: f64) -> QueueResult<Self> {
        if !hours.is_finite() {
            return Err(QueueError::invalid_input(
                ParamField::HorizonHours.name(),
                "must be a finite number",
            ));
        }
        if hours <= 0.0 {
            Ok(Horizon::Unbounded)
        } else {
            Ok(Horizon::Hours(hours))
        }
    }

    pub fn max_ticks(&self, ticks_per_hour: f64) -> Option<u64> {
        match self {
            Horizon::Hours(h) => {
                let raw = h * ticks_per_hour;
                // 10 s typed as hours should still be exactly 10 ticks.
                let nearest = raw.round();
                let ticks = if (raw - nearest).abs() < 1e-9 { nearest } else { raw.floor() };
                Some(ticks as u64)
            }
            Horizon::Unbounded => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunRequest {
    pub params: QueueParameters,
    pub horizon: Horizon,
}

impl RunRequest {
    pub fn new(arrival_rate: f64, service_rate: f64, horizon_hours: f64) -> QueueResult<Self> {
        Ok(Self {
            params: QueueParameters::new(arrival_rate, service_rate)?,
            horizon: Horizon::from_hours(horizon_hours)?,
        })
    }

    pub fn from_source(source: &dyn ParameterSource) -> QueueResult<Self> {
        Self::new(
            read_field(source, ParamField::ArrivalRate)?,
            read_field(source, ParamField::ServiceRate)?,
            read_field(source, ParamField::HorizonHours)?,
        )
    }
}

/// What the frame sink sees after every tick.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationState {
    pub elapsed_ticks: u64,
    pub queue_length: u64,
    pub arrivals: u64,
    pub departures: u64,
    pub running: bool,
    pub tick_interval_ms: u64,
    pub max_ticks: Option<u64>,
    pub safety_max_queue: u64,
}

impl SimulationState {
    /// `queue_length == arrivals - departures`
    pub fn is_consistent(&self) -> bool {
        self.arrivals.checked_sub(self.departures) == Some(self.queue_length)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    Requested,
    HorizonReached,
    SafetyLimit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing ran: the simulation is idle or the timer token is stale.
    Idle,
    Advanced,
    Stopped(StopReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started(TickToken),
    AlreadyRunning,
}

/// Identifies the run a timer was armed for. Stopping a run invalidates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickToken {
    generation: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub params: QueueParameters,
    pub final_state: SimulationState,
    pub reason: StopReason,
    pub stats: StatsSummary,
    pub history: Vec<QueuePoint>,
}

struct ActiveRun {
    params: QueueParameters,
    token: TickToken,
    arrivals_per_tick: f64,
    completion_probability: f64,
    stats: RunStatistics,
}

/// Stepped M/M/1 simulation controller.
///
/// Each tick samples Poisson arrivals, then tries at most one service
/// completion. Ticks are advanced explicitly, either from a periodic timer via
/// [`Simulation::on_timer`] or synchronously via [`Simulation::tick`].
pub struct Simulation<R = StdRng> {
    config: SimulationConfig,
    rng: R,
    state: SimulationState,
    active: Option<ActiveRun>,
    generation: u64,
    last_run: Option<RunSummary>,
}

impl Simulation<StdRng> {
    pub fn new(config: SimulationConfig) -> QueueResult<Self> {
        Self::with_source(config, StdRng::from_entropy())
    }

    pub fn with_seed(config: SimulationConfig, seed: u64) -> QueueResult<Self> {
        Self::with_source(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: RandomSource> Simulation<R> {
    pub fn with_source(config: SimulationConfig, rng: R) -> QueueResult<Self> {
        config.validate()?;
        let state = idle_state(&config);
        Ok(Self {
            config,
            rng,
            state,
            active: None,
            generation: 0,
            last_run: None,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn token(&self) -> Option<TickToken> {
        self.active.as_ref().map(|run| run.token)
    }

    pub fn history(&self) -> Option<&VecDeque<QueuePoint>> {
        self.active.as_ref().map(|run| &run.stats.history)
    }

    pub fn live_stats(&self) -> Option<StatsSummary> {
        self.active.as_ref().map(|run| run.stats.summary())
    }

    pub fn last_run(&self) -> Option<&RunSummary> {
        self.last_run.as_ref()
    }

    pub fn random_source(&self) -> &R {
        &self.rng
    }

    /// Starts a run. Starting while already running changes nothing.
    pub fn start(
        &mut self,
        request: RunRequest,
        frames: &mut dyn FrameSink,
        notifier: &mut dyn NotificationSink,
    ) -> QueueResult<StartOutcome> {
        if self.is_running() {
            log::debug!("start ignored: simulation already running");
            return Ok(StartOutcome::AlreadyRunning);
        }

        let ticks_per_hour = self.config.ticks_per_hour();
        let stats = RunStatistics::new(self.config.history_points, ticks_per_hour)?;
        let params = request.params;

        self.generation += 1;
        let token = TickToken {
            generation: self.generation,
        };

        self.last_run = None;
        self.state = idle_state(&self.config);
        self.state.running = true;
        self.state.max_ticks = request.horizon.max_ticks(ticks_per_hour);

        self.active = Some(ActiveRun {
            params,
            token,
            arrivals_per_tick: params.arrival_rate() / ticks_per_hour,
            completion_probability: completion_probability(params.service_rate() / ticks_per_hour),
            stats,
        });

        if !params.is_stable() {
            log::warn!(
                "simulating an unstable queue (ρ={:.4}); expect unbounded growth",
                params.utilization()
            );
        }
        log::info!(
            "simulation started: λ={}/h μ={}/h max_ticks={:?}",
            params.arrival_rate(),
            params.service_rate(),
            self.state.max_ticks
        );

        frames.render(&self.state);
        notifier.notify(
            Notification::info(format!(
                "Simulation started. Updates every {}s. Use \"Stop\" to halt it.",
                self.config.tick_interval_ms as f64 / 1000.0
            ))
            .with_duration(START_NOTICE_MS),
        );
        Ok(StartOutcome::Started(token))
    }

    /// Reads λ, μ and the horizon from `source`, then starts.
    ///
    /// Invalid input is reported and returned before anything is mutated.
    pub fn start_from(
        &mut self,
        source: &dyn ParameterSource,
        frames: &mut dyn FrameSink,
        notifier: &mut dyn NotificationSink,
    ) -> QueueResult<StartOutcome> {
        if self.is_running() {
            return Ok(StartOutcome::AlreadyRunning);
        }
        let request = match RunRequest::from_source(source) {
            Ok(request) => request,
            Err(e) => {
                log::debug!("simulation start rejected: {e}");
                notifier.notify(Notification::warning(
                    "Please fill in every field with valid numbers (comma or point as decimal separator).",
                ));
                return Err(e);
            }
        };
        self.start(request, frames, notifier)
    }

    /// Timer entry point. A stale token or an idle simulation is a no-op.
    pub fn on_timer(
        &mut self,
        token: TickToken,
        frames: &mut dyn FrameSink,
        notifier: &mut dyn NotificationSink,
    ) -> TickOutcome {
        if self.token() != Some(token) {
            return TickOutcome::Idle;
        }
        self.tick(frames, notifier)
    }

    /// Advances the running simulation by exactly one tick.
    pub fn tick(
        &mut self,
        frames: &mut dyn FrameSink,
        notifier: &mut dyn NotificationSink,
    ) -> TickOutcome {
        let Some(run) = self.active.as_mut() else {
            return TickOutcome::Idle;
        };

        let arrived = sample_poisson(run.arrivals_per_tick, &mut self.rng);
        self.state.queue_length = self.state.queue_length.saturating_add(arrived);
        self.state.arrivals = self.state.arrivals.saturating_add(arrived);

        // One completion per tick at most.
        if self.state.queue_length > 0 && bernoulli(run.completion_probability, &mut self.rng) {
            self.state.queue_length = self.state.queue_length.saturating_sub(1);
            self.state.departures += 1;
        }

        self.state.elapsed_ticks += 1;
        debug_assert!(self.state.is_consistent(), "queue invariant broken: {:?}", self.state);
        run.stats.record(&self.state);

        frames.render(&self.state);

        let reason = if frames.stop_requested() {
            Some(StopReason::Requested)
        } else if self
            .state
            .max_ticks
            .is_some_and(|max| self.state.elapsed_ticks >= max)
        {
            Some(StopReason::HorizonReached)
        } else if self.state.queue_length >= self.state.safety_max_queue {
            Some(StopReason::SafetyLimit)
        } else {
            None
        };

        let Some(reason) = reason else {
            return TickOutcome::Advanced;
        };

        match reason {
            StopReason::HorizonReached => notifier.notify(
                Notification::info("Simulation finished: the simulation time was reached.")
                    .with_duration(HORIZON_NOTICE_MS),
            ),
            StopReason::SafetyLimit => {
                log::warn!(
                    "safety ceiling hit: queue={} after {} ticks",
                    self.state.queue_length,
                    self.state.elapsed_ticks
                );
                notifier.notify(
                    Notification::danger("Simulation stopped: excessive queue (saturation risk).")
                        .with_duration(SAFETY_NOTICE_MS),
                );
            }
            StopReason::Requested => {}
        }
        self.finish(reason, frames);
        TickOutcome::Stopped(reason)
    }

    /// Advances up to `ticks` ticks, returning early once the run stops.
    pub fn run_for(
        &mut self,
        ticks: u64,
        frames: &mut dyn FrameSink,
        notifier: &mut dyn NotificationSink,
    ) -> TickOutcome {
        let mut outcome = TickOutcome::Idle;
        for _ in 0..ticks {
            outcome = self.tick(frames, notifier);
            if outcome != TickOutcome::Advanced {
                break;
            }
        }
        outcome
    }

    /// Stops the current run. Returns `false` when nothing was running.
    pub fn stop(&mut self, frames: &mut dyn FrameSink) -> bool {
        if !self.is_running() {
            return false;
        }
        self.finish(StopReason::Requested, frames);
        true
    }

    /// Drops any run and its summary without emitting a frame.
    pub fn reset(&mut self) {
        if self.active.take().is_some() {
            self.generation += 1;
        }
        self.last_run = None;
        self.state = idle_state(&self.config);
    }

    fn finish(&mut self, reason: StopReason, frames: &mut dyn FrameSink) {
        let Some(run) = self.active.take() else {
            return;
        };
        self.generation += 1;
        self.state.running = false;
        frames.render(&self.state);

        log::info!(
            "simulation stopped ({reason:?}) at tick {}: queue={} arrivals={} departures={}",
            self.state.elapsed_ticks,
            self.state.queue_length,
            self.state.arrivals,
            self.state.departures
        );

        self.last_run = Some(RunSummary {
            params: run.params,
            final_state: self.state.clone(),
            reason,
            stats: run.stats.summary(),
            history: run.stats.history.into_iter().collect(),
        });
        self.state = idle_state(&self.config);
    }
}

fn idle_state(config: &SimulationConfig) -> SimulationState {
    SimulationState {
        tick_interval_ms: config.tick_interval_ms,
        safety_max_queue: config.safety_max_queue,
        ..SimulationState::default()
    }
}
