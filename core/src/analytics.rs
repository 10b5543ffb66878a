use crate::engine::SimulationState;
use crate::error::QueueResult;
use hdrhistogram::Histogram;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub struct QueuePoint {
    pub tick: u64,
    pub queue_length: u64,
}

/// Observed behaviour of one run, for comparison with the analytic model.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub struct StatsSummary {
    pub ticks: u64,
    pub mean_queue_length: f64,
    pub p50_queue_length: u64,
    pub p99_queue_length: u64,
    pub max_queue_length: u64,
    /// Completed services per modeled hour.
    pub throughput_per_hour: f64,
}

/// Per-tick queue-length recorder: an HDR histogram for percentiles plus a
/// sliding window of recent points for charts.
#[derive(Debug, Clone)]
pub struct RunStatistics {
    pub history: VecDeque<QueuePoint>,
    pub max_points: usize,
    histogram: Histogram<u64>,
    ticks_per_hour: f64,
    last_departures: u64,
    last_tick: u64,
}

impl RunStatistics {
    pub fn new(max_points: usize, ticks_per_hour: f64) -> QueueResult<Self> {
        Ok(Self {
            history: VecDeque::with_capacity(max_points),
            max_points,
            histogram: Histogram::new(3)?,
            ticks_per_hour,
            last_departures: 0,
            last_tick: 0,
        })
    }

    pub fn record(&mut self, state: &SimulationState) {
        self.histogram.saturating_record(state.queue_length);
        self.last_departures = state.departures;
        self.last_tick = state.elapsed_ticks;

        self.history.push_back(QueuePoint {
            tick: state.elapsed_ticks,
            queue_length: state.queue_length,
        });
        if self.history.len() > self.max_points {
            self.history.pop_front();
        }
    }

    /// Time-averaged queue length over all recorded ticks.
    pub fn mean_queue_length(&self) -> f64 {
        if self.histogram.len() == 0 {
            return 0.0;
        }
        self.histogram.mean()
    }

    pub fn queue_length_at(&self, quantile: f64) -> u64 {
        if self.histogram.len() == 0 {
            return 0;
        }
        self.histogram.value_at_quantile(quantile)
    }

    pub fn max_queue_length(&self) -> u64 {
        self.histogram.max()
    }

    pub fn throughput_per_hour(&self) -> f64 {
        if self.last_tick == 0 {
            return 0.0;
        }
        self.last_departures as f64 * self.ticks_per_hour / self.last_tick as f64
    }

    pub fn summary(&self) -> StatsSummary {
        StatsSummary {
            ticks: self.last_tick,
            mean_queue_length: self.mean_queue_length(),
            p50_queue_length: self.queue_length_at(0.5),
            p99_queue_length: self.queue_length_at(0.99),
            max_queue_length: self.max_queue_length(),
            throughput_per_hour: self.throughput_per_hour(),
        }
    }
}
