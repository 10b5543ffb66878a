use crate::common::TestHarness;
use queuelab_core::*;

#[test]
fn test_stable_run_tracks_analytic_model() {
    // 0.1 arrivals and μ_tick = 0.25 per tick: ρ = 0.4, small enough per-tick
    // rates that the one-completion-per-tick approximation stays close.
    let (lambda, mu) = (360.0, 900.0);
    let analytic = QueueParameters::new(lambda, mu).unwrap().evaluate();
    let l = analytic.mean_customers_in_system.value().unwrap();

    let mut h = TestHarness::new_with_seed(77);
    h.start(lambda, mu, 0.0);
    h.run_for(200_000);

    let stats = h.sim.live_stats().unwrap();
    assert_eq!(stats.ticks, 200_000);
    assert!(
        (stats.mean_queue_length - l).abs() < 0.2 * l,
        "mean queue {} vs L {}",
        stats.mean_queue_length,
        l
    );
    assert!(
        (stats.throughput_per_hour - lambda).abs() < 0.05 * lambda,
        "throughput {}",
        stats.throughput_per_hour
    );
    assert!(stats.p50_queue_length <= stats.p99_queue_length);
    assert!(stats.p99_queue_length <= stats.max_queue_length);
}

#[test]
fn test_unstable_queue_grows() {
    // Half an arrival per tick against a 10% completion chance.
    let mu = -(0.9f64).ln() * 3_600.0;
    let mut h = TestHarness::new_with_seed(8);
    h.start(1_800.0, mu, 0.0);
    h.run_for(10_000);

    assert!(h.state().queue_length > 2_000, "queue {}", h.state().queue_length);
    let history = h.sim.history().unwrap();
    assert_eq!(history.len(), h.sim.config().history_points);
    assert_eq!(history.back().unwrap().tick, 10_000);
}

#[test]
fn test_summary_survives_stop() {
    let mut h = TestHarness::new_with_seed(21);
    h.start(1_800.0, 3_600.0, 0.0);
    h.run_for(500);
    let live = h.sim.live_stats().unwrap();
    h.stop();

    let summary = h.sim.last_run().unwrap();
    assert_eq!(summary.stats, live);
    assert_eq!(summary.history.len(), 300);
    assert!(h.sim.live_stats().is_none());
}
