use crate::engine::SimulationState;
use crate::formulas::{Metric, MetricKind};
use crate::input::ParamField;
use crate::notify::Notification;
use rand::rngs::StdRng;
use rand::Rng;

/// Where numeric parameters come from (form fields, CLI flags, fixtures).
/// `None` is the "invalid input" signal: empty, non-numeric or non-finite.
pub trait ParameterSource {
    fn read(&self, field: ParamField) -> Option<f64>;
}

/// Receives user-facing status messages. The core never renders them.
pub trait NotificationSink {
    fn notify(&mut self, notification: Notification);
}

/// Receives a snapshot after every completed tick.
pub trait FrameSink {
    fn render(&mut self, frame: &SimulationState);

    /// Polled at the end of each tick; `true` stops the run with
    /// [`crate::StopReason::Requested`].
    fn stop_requested(&self) -> bool {
        false
    }
}

/// Receives analytic metrics by name.
pub trait ResultSink {
    fn publish(&mut self, kind: MetricKind, metric: Metric);
}

/// Uniform samples in `[0, 1)` driving arrivals and service completions.
pub trait RandomSource {
    fn next_uniform(&mut self) -> f64;
}

impl RandomSource for StdRng {
    fn next_uniform(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

impl NotificationSink for Vec<Notification> {
    fn notify(&mut self, notification: Notification) {
        self.push(notification);
    }
}

impl FrameSink for Vec<SimulationState> {
    fn render(&mut self, frame: &SimulationState) {
        self.push(frame.clone());
    }
}

impl ResultSink for Vec<(MetricKind, Metric)> {
    fn publish(&mut self, kind: MetricKind, metric: Metric) {
        self.push((kind, metric));
    }
}
