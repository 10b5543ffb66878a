//! Closed-form steady-state metrics of the M/M/1 queue.
//!
//! Rates are per hour, so times come out in hours. Metrics that diverge for an
//! unstable system (ρ ≥ 1) are returned as [`Metric::Divergent`] instead of
//! leaking `inf`/`NaN` to consumers.

use crate::error::{QueueError, QueueResult};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QueueParameters {
    arrival_rate: f64,
    service_rate: f64,
}

impl QueueParameters {
    pub fn new(arrival_rate: f64, service_rate: f64) -> QueueResult<Self> {
        check_rate("arrival rate (λ)", arrival_rate)?;
        check_rate("service rate (μ)", service_rate)?;
        if !(arrival_rate / service_rate).is_finite() {
            return Err(QueueError::invalid_input(
                "arrival rate (λ)",
                "is too large relative to the service rate",
            ));
        }
        Ok(Self {
            arrival_rate,
            service_rate,
        })
    }

    pub fn arrival_rate(&self) -> f64 {
        self.arrival_rate
    }

    pub fn service_rate(&self) -> f64 {
        self.service_rate
    }

    /// ρ = λ/μ
    pub fn utilization(&self) -> f64 {
        self.arrival_rate / self.service_rate
    }

    pub fn is_stable(&self) -> bool {
        self.service_rate > self.arrival_rate
    }

    /// L = ρ/(1-ρ)
    pub fn mean_customers_in_system(&self) -> Metric {
        if !self.is_stable() {
            return Metric::Divergent;
        }
        let rho = self.utilization();
        Metric::finite(rho / (1.0 - rho))
    }

    /// Lq = ρ²/(1-ρ)
    pub fn mean_customers_in_queue(&self) -> Metric {
        if !self.is_stable() {
            return Metric::Divergent;
        }
        let rho = self.utilization();
        Metric::finite(rho * rho / (1.0 - rho))
    }

    /// W = 1/(μ-λ), hours.
    pub fn mean_time_in_system(&self) -> Metric {
        if !self.is_stable() {
            return Metric::Divergent;
        }
        Metric::finite(1.0 / (self.service_rate - self.arrival_rate))
    }

    /// Wq = ρ/(μ-λ), hours.
    pub fn mean_time_in_queue(&self) -> Metric {
        if !self.is_stable() {
            return Metric::Divergent;
        }
        Metric::finite(self.utilization() / (self.service_rate - self.arrival_rate))
    }

    /// P0 = 1-ρ. Always computed; only a probability while ρ < 1.
    pub fn empty_probability(&self) -> Metric {
        let p0 = 1.0 - self.utilization();
        if self.is_stable() {
            Metric::Value(p0)
        } else {
            Metric::InvalidProbability(p0)
        }
    }

    pub fn evaluate(&self) -> AnalyticResult {
        AnalyticResult {
            params: *self,
            stable: self.is_stable(),
            utilization: self.utilization(),
            mean_customers_in_system: self.mean_customers_in_system(),
            mean_customers_in_queue: self.mean_customers_in_queue(),
            mean_time_in_system: self.mean_time_in_system(),
            mean_time_in_queue: self.mean_time_in_queue(),
            empty_probability: self.empty_probability(),
        }
    }
}

fn check_rate(field: &'static str, rate: f64) -> QueueResult<()> {
    if !rate.is_finite() {
        return Err(QueueError::invalid_input(field, "must be a finite number"));
    }
    if rate <= 0.0 {
        return Err(QueueError::invalid_input(field, "must be greater than zero"));
    }
    Ok(())
}

/// A display-safe metric value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Metric {
    Value(f64),
    /// Undefined: the steady-state average does not exist (ρ ≥ 1).
    Divergent,
    /// `1-ρ` for an unstable system; computed but not a probability.
    InvalidProbability(f64),
}

impl Metric {
    /// Wraps a stable-branch result; overflow (e.g. μ-λ underflowing to a
    /// subnormal) reads as divergent rather than `inf`.
    fn finite(v: f64) -> Self {
        if v.is_finite() {
            Metric::Value(v)
        } else {
            Metric::Divergent
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Metric::Value(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, Metric::Value(_))
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Value(v) => write!(f, "{v:.4}"),
            Metric::Divergent => f.write_str("undefined (unstable)"),
            Metric::InvalidProbability(v) => write!(f, "{v:.4} (not a valid probability)"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricKind {
    Utilization,
    MeanCustomersInSystem,
    MeanCustomersInQueue,
    MeanTimeInSystem,
    MeanTimeInQueue,
    EmptyProbability,
}

impl MetricKind {
    pub const ALL: [MetricKind; 6] = [
        MetricKind::Utilization,
        MetricKind::MeanCustomersInSystem,
        MetricKind::MeanCustomersInQueue,
        MetricKind::MeanTimeInSystem,
        MetricKind::MeanTimeInQueue,
        MetricKind::EmptyProbability,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MetricKind::Utilization => "Utilization (ρ)",
            MetricKind::MeanCustomersInSystem => "Mean customers in system (L)",
            MetricKind::MeanCustomersInQueue => "Mean customers in queue (Lq)",
            MetricKind::MeanTimeInSystem => "Mean time in system (W)",
            MetricKind::MeanTimeInQueue => "Mean time in queue (Wq)",
            MetricKind::EmptyProbability => "Empty system probability (P0)",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            MetricKind::MeanCustomersInSystem | MetricKind::MeanCustomersInQueue => "customers",
            MetricKind::MeanTimeInSystem | MetricKind::MeanTimeInQueue => "hours",
            MetricKind::Utilization | MetricKind::EmptyProbability => "",
        }
    }
}

/// Snapshot of every steady-state metric for one parameter pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalyticResult {
    pub params: QueueParameters,
    pub stable: bool,
    pub utilization: f64,
    pub mean_customers_in_system: Metric,
    pub mean_customers_in_queue: Metric,
    pub mean_time_in_system: Metric,
    pub mean_time_in_queue: Metric,
    pub empty_probability: Metric,
}

impl AnalyticResult {
    pub fn get(&self, kind: MetricKind) -> Metric {
        match kind {
            MetricKind::Utilization => Metric::Value(self.utilization),
            MetricKind::MeanCustomersInSystem => self.mean_customers_in_system,
            MetricKind::MeanCustomersInQueue => self.mean_customers_in_queue,
            MetricKind::MeanTimeInSystem => self.mean_time_in_system,
            MetricKind::MeanTimeInQueue => self.mean_time_in_queue,
            MetricKind::EmptyProbability => self.empty_probability,
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = (MetricKind, Metric)> + '_ {
        MetricKind::ALL.into_iter().map(|kind| (kind, self.get(kind)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub utilization: f64,
    pub customers_in_system: f64,
    pub customers_in_queue: f64,
}

/// Samples L and Lq over `0 ≤ ρ ≤ max_utilization` for charting.
///
/// `max_utilization` is clamped below 1 where both curves blow up.
pub fn occupancy_curve(samples: usize, max_utilization: f64) -> Vec<CurvePoint> {
    if samples < 2 {
        return Vec::new();
    }
    let top = max_utilization.clamp(0.0, 0.99);
    (0..samples)
        .map(|i| {
            let rho = top * i as f64 / (samples - 1) as f64;
            CurvePoint {
                utilization: rho,
                customers_in_system: rho / (1.0 - rho),
                customers_in_queue: rho * rho / (1.0 - rho),
            }
        })
        .collect()
}
