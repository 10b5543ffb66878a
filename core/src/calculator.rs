use crate::error::QueueResult;
use crate::formulas::{AnalyticResult, QueueParameters};
use crate::input::{read_field, ParamField};
use crate::notify::Notification;
use crate::traits::{NotificationSink, ParameterSource, ResultSink};

pub const UNSTABLE_WARNING_MS: u64 = 6_000;

/// Reads λ and μ, evaluates the model and publishes every metric.
///
/// Invalid input leaves `results` untouched. An unstable system still
/// publishes utilization plus divergent tags, alongside a warning.
pub fn perform_calculation(
    source: &dyn ParameterSource,
    results: &mut dyn ResultSink,
    notifier: &mut dyn NotificationSink,
) -> QueueResult<AnalyticResult> {
    let params = match read_parameters(source) {
        Ok(p) => p,
        Err(e) => {
            log::debug!("calculation rejected: {e}");
            notifier.notify(Notification::warning(
                "Please enter valid positive numbers for λ and μ (comma or point as decimal separator).",
            ));
            return Err(e);
        }
    };

    let result = params.evaluate();

    if !result.stable {
        log::warn!(
            "unstable parameters λ={} μ={} (ρ={:.4})",
            params.arrival_rate(),
            params.service_rate(),
            result.utilization
        );
        notifier.notify(
            Notification::warning(
                "Warning: μ ≤ λ. The system is theoretically unstable and the averages diverge. \
                 Simulation is still allowed to observe the behaviour over time.",
            )
            .with_duration(UNSTABLE_WARNING_MS),
        );
    }

    for (kind, metric) in result.entries() {
        results.publish(kind, metric);
    }

    if result.stable {
        notifier.notify(Notification::success("Calculations completed."));
    }
    Ok(result)
}

fn read_parameters(source: &dyn ParameterSource) -> QueueResult<QueueParameters> {
    let arrival = read_field(source, ParamField::ArrivalRate)?;
    let service = read_field(source, ParamField::ServiceRate)?;
    QueueParameters::new(arrival, service)
}
