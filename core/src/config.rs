use crate::error::{QueueError, QueueResult};
use serde::{Deserialize, Serialize};

pub const SECONDS_PER_HOUR: f64 = 3_600.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Wall-clock period between ticks when driven by a timer.
    pub tick_interval_ms: u64,
    /// Modeled time covered by one tick.
    pub modeled_seconds_per_tick: f64,
    /// A run is force-stopped once the queue reaches this length.
    pub safety_max_queue: u64,
    /// Points kept in the queue-length history used for charts.
    pub history_points: usize,
    /// Upper bound on ticks replayed in one driver advance.
    pub max_ticks_per_frame: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1_000,
            modeled_seconds_per_tick: 1.0,
            safety_max_queue: 2_000_000,
            history_points: 300,
            max_ticks_per_frame: 10_000,
        }
    }
}

impl SimulationConfig {
    pub fn ticks_per_hour(&self) -> f64 {
        SECONDS_PER_HOUR / self.modeled_seconds_per_tick
    }

    pub fn validate(&self) -> QueueResult<()> {
        if self.tick_interval_ms == 0 {
            return Err(QueueError::InvalidConfig("tick_interval_ms must be positive".into()));
        }
        if !(self.modeled_seconds_per_tick > 0.0) || !self.modeled_seconds_per_tick.is_finite() {
            return Err(QueueError::InvalidConfig(format!(
                "modeled_seconds_per_tick must be positive and finite, got {}",
                self.modeled_seconds_per_tick
            )));
        }
        if self.safety_max_queue == 0 {
            return Err(QueueError::InvalidConfig("safety_max_queue must be positive".into()));
        }
        if self.history_points < 2 {
            return Err(QueueError::InvalidConfig("history_points must be at least 2".into()));
        }
        if self.max_ticks_per_frame == 0 {
            return Err(QueueError::InvalidConfig("max_ticks_per_frame must be positive".into()));
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> QueueResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> QueueResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
