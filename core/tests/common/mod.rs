#![allow(dead_code)]

use queuelab_core::*;
use rand::rngs::StdRng;

/// Frame sink that keeps every snapshot and can request a stop once the run
/// reaches a given tick.
#[derive(Default)]
pub struct FrameRecorder {
    pub frames: Vec<SimulationState>,
    pub stop_at_tick: Option<u64>,
}

impl FrameSink for FrameRecorder {
    fn render(&mut self, frame: &SimulationState) {
        self.frames.push(frame.clone());
    }

    fn stop_requested(&self) -> bool {
        match (self.stop_at_tick, self.frames.last()) {
            (Some(at), Some(last)) => last.elapsed_ticks >= at,
            _ => false,
        }
    }
}

pub struct TestHarness<R = StdRng> {
    pub sim: Simulation<R>,
    pub frames: FrameRecorder,
    pub notes: Vec<Notification>,
}

impl TestHarness<StdRng> {
    pub fn new() -> Self {
        Self::new_with_seed(42)
    }

    pub fn new_with_seed(seed: u64) -> Self {
        Self::with_config(SimulationConfig::default(), seed)
    }

    pub fn with_config(config: SimulationConfig, seed: u64) -> Self {
        Self::from_sim(Simulation::with_seed(config, seed).unwrap())
    }
}

impl<R: RandomSource> TestHarness<R> {
    pub fn with_source(config: SimulationConfig, rng: R) -> Self {
        Self::from_sim(Simulation::with_source(config, rng).unwrap())
    }

    fn from_sim(sim: Simulation<R>) -> Self {
        Self {
            sim,
            frames: FrameRecorder::default(),
            notes: Vec::new(),
        }
    }

    pub fn try_start(&mut self, arrival: f64, service: f64, horizon_hours: f64) -> QueueResult<StartOutcome> {
        let request = RunRequest::new(arrival, service, horizon_hours)?;
        self.sim.start(request, &mut self.frames, &mut self.notes)
    }

    pub fn start(&mut self, arrival: f64, service: f64, horizon_hours: f64) -> TickToken {
        match self.try_start(arrival, service, horizon_hours).unwrap() {
            StartOutcome::Started(token) => token,
            StartOutcome::AlreadyRunning => panic!("simulation was already running"),
        }
    }

    pub fn start_from(&mut self, inputs: &RawInputs) -> QueueResult<StartOutcome> {
        self.sim.start_from(inputs, &mut self.frames, &mut self.notes)
    }

    pub fn tick(&mut self) -> TickOutcome {
        self.sim.tick(&mut self.frames, &mut self.notes)
    }

    pub fn fire(&mut self, token: TickToken) -> TickOutcome {
        self.sim.on_timer(token, &mut self.frames, &mut self.notes)
    }

    pub fn run_for(&mut self, ticks: u64) -> TickOutcome {
        self.sim.run_for(ticks, &mut self.frames, &mut self.notes)
    }

    pub fn stop(&mut self) -> bool {
        self.sim.stop(&mut self.frames)
    }

    pub fn state(&self) -> &SimulationState {
        self.sim.state()
    }

    pub fn notes_with(&self, severity: Severity) -> Vec<&Notification> {
        self.notes.iter().filter(|n| n.severity == severity).collect()
    }
}
