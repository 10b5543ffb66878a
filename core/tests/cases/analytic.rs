use queuelab_core::*;

const TOL: f64 = 1e-4;

fn calculate(arrival: &str, service: &str) -> (AnalyticResult, Vec<(MetricKind, Metric)>, Vec<Notification>) {
    let mut results: Vec<(MetricKind, Metric)> = Vec::new();
    let mut notes: Vec<Notification> = Vec::new();
    let r = perform_calculation(&RawInputs::new(arrival, service, ""), &mut results, &mut notes).unwrap();
    (r, results, notes)
}

#[test]
fn test_textbook_scenario() {
    let (r, results, notes) = calculate("2", "5");
    assert!(r.stable);

    let expected = [
        (MetricKind::Utilization, 0.4),
        (MetricKind::MeanCustomersInSystem, 0.6667),
        (MetricKind::MeanCustomersInQueue, 0.2667),
        (MetricKind::MeanTimeInSystem, 0.3333),
        (MetricKind::MeanTimeInQueue, 0.1333),
        (MetricKind::EmptyProbability, 0.6),
    ];
    for ((kind, metric), (want_kind, want)) in results.iter().zip(expected) {
        assert_eq!(*kind, want_kind);
        let v = metric.value().unwrap();
        assert!((v - want).abs() < TOL, "{}: {v} vs {want}", kind.label());
    }
    assert_eq!(notes[0].severity, Severity::Success);
}

#[test]
fn test_critical_load_is_unstable() {
    let (r, results, notes) = calculate("5", "5");
    assert!(!r.stable);
    assert_eq!(r.utilization, 1.0);
    for (kind, metric) in &results[1..5] {
        assert_eq!(*metric, Metric::Divergent, "{}", kind.label());
    }
    assert_eq!(results[5].1, Metric::InvalidProbability(0.0));
    assert_eq!(notes[0].severity, Severity::Warning);
}

#[test]
fn test_overload_reports_raw_utilization() {
    let (r, _, _) = calculate("10", "1");
    assert!(!r.stable);
    assert_eq!(r.utilization, 10.0);
    assert!(!r.mean_time_in_system.is_defined());
    assert!(!r.mean_time_in_queue.is_defined());
}

#[test]
fn test_decimal_comma_inputs() {
    let (r, _, _) = calculate("2,5", "10,0");
    assert!((r.utilization - 0.25).abs() < 1e-12);
}

#[test]
fn test_identities_across_stable_grid() {
    for mu in [0.5, 1.0, 3.0, 12.0, 250.0] {
        for fraction in [0.01, 0.2, 0.5, 0.8, 0.99] {
            let lambda = mu * fraction;
            let r = QueueParameters::new(lambda, mu).unwrap().evaluate();
            assert!(r.stable);
            assert!(r.utilization > 0.0 && r.utilization < 1.0);
            assert!((r.utilization - lambda / mu).abs() < 1e-12);

            let l = r.mean_customers_in_system.value().unwrap();
            let lq = r.mean_customers_in_queue.value().unwrap();
            assert!((lq - r.utilization * l).abs() < 1e-9 * l.max(1.0));

            let w = r.mean_time_in_system.value().unwrap();
            let wq = r.mean_time_in_queue.value().unwrap();
            assert!((w - wq - 1.0 / mu).abs() < 1e-9 * w.max(1.0));
        }
    }
}

#[test]
fn test_empty_probability_is_one_minus_rho_everywhere() {
    for (lambda, mu) in [(1.0, 4.0), (3.0, 3.0), (9.0, 3.0), (100.0, 1.0)] {
        let p = QueueParameters::new(lambda, mu).unwrap();
        let raw = match p.empty_probability() {
            Metric::Value(v) | Metric::InvalidProbability(v) => v,
            Metric::Divergent => panic!("P0 is always computable"),
        };
        assert!((raw - (1.0 - p.utilization())).abs() < 1e-12);
        assert_eq!(p.empty_probability().is_defined(), p.is_stable());
    }
}
