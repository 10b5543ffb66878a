//! Boundary normalization of user-typed numbers.
//!
//! Form values may use a decimal comma (`2,5`) or point (`2.5`). Everything
//! past this module sees plain finite `f64`s.

use crate::error::{QueueError, QueueResult};
use crate::traits::ParameterSource;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamField {
    ArrivalRate,
    ServiceRate,
    HorizonHours,
}

impl ParamField {
    pub fn name(self) -> &'static str {
        match self {
            ParamField::ArrivalRate => "arrival rate (λ)",
            ParamField::ServiceRate => "service rate (μ)",
            ParamField::HorizonHours => "simulation horizon (hours)",
        }
    }
}

/// Parses a form value, accepting one decimal comma. Empty, malformed and
/// non-finite inputs yield `None`.
pub fn parse_numeric(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let normalized = trimmed.replacen(',', ".", 1);
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Reads a field, turning the "invalid input" signal into an error.
pub fn read_field(source: &dyn ParameterSource, field: ParamField) -> QueueResult<f64> {
    source
        .read(field)
        .ok_or_else(|| QueueError::invalid_input(field.name(), "expected a finite number"))
}

/// The three raw text fields of the input form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInputs {
    pub arrival_rate: String,
    pub service_rate: String,
    pub horizon_hours: String,
}

impl RawInputs {
    pub fn new(arrival_rate: &str, service_rate: &str, horizon_hours: &str) -> Self {
        Self {
            arrival_rate: arrival_rate.to_string(),
            service_rate: service_rate.to_string(),
            horizon_hours: horizon_hours.to_string(),
        }
    }
}

impl ParameterSource for RawInputs {
    fn read(&self, field: ParamField) -> Option<f64> {
        let raw = match field {
            ParamField::ArrivalRate => &self.arrival_rate,
            ParamField::ServiceRate => &self.service_rate,
            ParamField::HorizonHours => &self.horizon_hours,
        };
        parse_numeric(raw)
    }
}

/// Already-numeric parameters; non-finite values read as invalid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    pub arrival_rate: f64,
    pub service_rate: f64,
    pub horizon_hours: f64,
}

impl ParameterSource for ParameterSet {
    fn read(&self, field: ParamField) -> Option<f64> {
        let value = match field {
            ParamField::ArrivalRate => self.arrival_rate,
            ParamField::ServiceRate => self.service_rate,
            ParamField::HorizonHours => self.horizon_hours,
        };
        value.is_finite().then_some(value)
    }
}
