pub mod analytics;
pub mod calculator;
pub mod config;
pub mod driver;
pub mod engine;
pub mod error;
pub mod formulas;
pub mod input;
pub mod notify;
pub mod sampling;
pub mod traits;

pub use analytics::{QueuePoint, RunStatistics, StatsSummary};
pub use calculator::perform_calculation;
pub use config::SimulationConfig;
pub use driver::TickDriver;
pub use engine::{
    Horizon, RunRequest, RunSummary, Simulation, SimulationState, StartOutcome, StopReason,
    TickOutcome, TickToken,
};
pub use error::{QueueError, QueueResult};
pub use formulas::{occupancy_curve, AnalyticResult, CurvePoint, Metric, MetricKind, QueueParameters};
pub use input::{parse_numeric, ParamField, ParameterSet, RawInputs};
pub use notify::{Notification, Severity};
pub use sampling::ScriptedRandom;
pub use traits::{FrameSink, NotificationSink, ParameterSource, RandomSource, ResultSink};
