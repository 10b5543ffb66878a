use crate::common::TestHarness;
use queuelab_core::*;
use std::time::{Duration, Instant};

#[test]
fn test_saturation_stops_the_run() {
    let mut h = TestHarness::new();
    // 2.1M expected arrivals in the first tick against the 2M default ceiling.
    let token = h.start(2_100_000.0 * 3_600.0, 1.0, 0.0);

    assert_eq!(h.tick(), TickOutcome::Stopped(StopReason::SafetyLimit));
    assert!(!h.sim.is_running());

    let summary = h.sim.last_run().unwrap();
    assert_eq!(summary.reason, StopReason::SafetyLimit);
    assert!(summary.final_state.queue_length >= 2_000_000);
    assert!(!summary.final_state.running);
    assert_eq!(summary.final_state.elapsed_ticks, 1);

    let danger = h.notes_with(Severity::Danger);
    assert_eq!(danger.len(), 1);
    assert_eq!(danger[0].display_ms, 8_000);

    // The timer was never cancelled externally; it keeps firing in vain.
    let frames = h.frames.frames.len();
    for _ in 0..3 {
        assert_eq!(h.fire(token), TickOutcome::Idle);
        assert_eq!(h.tick(), TickOutcome::Idle);
    }
    assert_eq!(h.frames.frames.len(), frames);
    assert_eq!(h.sim.last_run().unwrap().final_state.elapsed_ticks, 1);
}

#[test]
fn test_configured_ceiling() {
    let config = SimulationConfig {
        safety_max_queue: 100,
        ..SimulationConfig::default()
    };
    let mut h = TestHarness::with_config(config, 5);
    // ~10 arrivals per tick, at most one departure.
    h.start(36_000.0, 3_600.0, 0.0);

    assert_eq!(h.run_for(1_000), TickOutcome::Stopped(StopReason::SafetyLimit));
    let summary = h.sim.last_run().unwrap();
    assert!(summary.final_state.queue_length >= 100);
    assert!(summary.final_state.elapsed_ticks < 50);
}

#[test]
fn test_horizon_wins_over_safety_on_the_same_tick() {
    let config = SimulationConfig {
        safety_max_queue: 1,
        ..SimulationConfig::default()
    };
    // Two arrivals, failed service: both limits trip on tick 1.
    let script = ScriptedRandom::new(vec![0.9, 0.9, 0.1, 0.99]);
    let mut h = TestHarness::with_source(config, script);
    h.start(7_200.0, 3_600.0, 1.0 / 3_600.0);

    assert_eq!(h.tick(), TickOutcome::Stopped(StopReason::HorizonReached));
    assert!(h.notes_with(Severity::Danger).is_empty());
    assert_eq!(h.sim.last_run().unwrap().final_state.queue_length, 2);
}

#[test]
fn test_extreme_arrival_rate_stops_within_one_tick() {
    for arrival_rate in [3.6e11, 3.6e15, 1e20, 1e300] {
        let mut h = TestHarness::new();
        h.start(arrival_rate, 1.0, 0.0);

        let started = Instant::now();
        assert_eq!(h.tick(), TickOutcome::Stopped(StopReason::SafetyLimit));
        assert!(
            started.elapsed() < Duration::from_secs(1),
            "λ={arrival_rate}: one tick took {:?}",
            started.elapsed()
        );

        let summary = h.sim.last_run().unwrap();
        assert_eq!(summary.final_state.elapsed_ticks, 1);
        assert!(summary.final_state.queue_length >= 2_000_000);
        assert!(summary.final_state.is_consistent());
    }
}
