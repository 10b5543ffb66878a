use crate::common::TestHarness;
use queuelab_core::*;

#[test]
fn test_unbounded_horizon_runs_until_stopped() {
    for horizon in [0.0, -3.0] {
        let mut h = TestHarness::new();
        h.start(2.0, 5.0, horizon);
        assert_eq!(h.state().max_ticks, None);

        assert_eq!(h.run_for(1_000), TickOutcome::Advanced);
        assert!(h.state().running);
        assert_eq!(h.state().elapsed_ticks, 1_000);

        assert!(h.stop());
        assert!(!h.sim.is_running());
    }
}

#[test]
fn test_overloaded_parameters_still_simulate() {
    let mut h = TestHarness::new();
    h.start(10.0, 1.0, 0.0);
    assert_eq!(h.run_for(100), TickOutcome::Advanced);
    assert!(h.state().running);
}

#[test]
fn test_start_is_idempotent() {
    let mut h = TestHarness::new();
    let token = h.start(3_600.0, 1_800.0, 0.0);
    h.run_for(25);

    let before = h.state().clone();
    let frames_before = h.frames.frames.len();
    let notes_before = h.notes.len();

    assert_eq!(h.try_start(1.0, 2.0, 1.0).unwrap(), StartOutcome::AlreadyRunning);
    assert_eq!(h.start_from(&RawInputs::new("x", "", "")).unwrap(), StartOutcome::AlreadyRunning);

    assert_eq!(h.state(), &before);
    assert_eq!(h.sim.token(), Some(token));
    assert_eq!(h.frames.frames.len(), frames_before);
    assert_eq!(h.notes.len(), notes_before);
}

#[test]
fn test_stop_is_idempotent_and_cancels_timer() {
    let mut h = TestHarness::new();
    let token = h.start(3_600.0, 3_600.0, 0.0);
    h.run_for(10);

    assert!(h.stop());
    let frames = h.frames.frames.len();
    assert!(!h.stop());
    assert_eq!(h.frames.frames.len(), frames);

    // A timer that was never cleared keeps firing; nothing may change.
    for _ in 0..5 {
        assert_eq!(h.fire(token), TickOutcome::Idle);
    }
    assert_eq!(h.tick(), TickOutcome::Idle);
    assert_eq!(h.state().elapsed_ticks, 0);
    assert_eq!(h.frames.frames.len(), frames);
}

#[test]
fn test_restart_resets_counters_and_token() {
    let mut h = TestHarness::new();
    let first = h.start(7_200.0, 3_600.0, 0.0);
    h.run_for(40);
    h.stop();

    let second = h.start(7_200.0, 3_600.0, 0.0);
    assert_ne!(first, second);
    let s = h.state();
    assert_eq!((s.elapsed_ticks, s.queue_length, s.arrivals, s.departures), (0, 0, 0, 0));
    assert!(s.running);
    assert!(h.sim.last_run().is_none());

    assert_eq!(h.fire(first), TickOutcome::Idle);
    assert_eq!(h.fire(second), TickOutcome::Advanced);
}

#[test]
fn test_invalid_start_mutates_nothing() {
    let mut h = TestHarness::new();
    let idle = h.state().clone();

    for inputs in [
        RawInputs::new("", "5", "1"),
        RawInputs::new("2", "cinco", "1"),
        RawInputs::new("2", "5", ""),
        RawInputs::new("0", "5", "1"),
        RawInputs::new("2", "-5", "1"),
    ] {
        let err = h.start_from(&inputs).unwrap_err();
        assert!(err.is_invalid_input(), "{inputs:?}");
    }
    assert!(h.try_start(2.0, 5.0, f64::NAN).is_err());
    assert!(h.try_start(f64::INFINITY, 5.0, 1.0).is_err());

    assert_eq!(h.state(), &idle);
    assert!(!h.sim.is_running());
    assert!(h.frames.frames.is_empty());
    assert_eq!(h.notes_with(Severity::Warning).len(), 5);
}

#[test]
fn test_start_from_form_values() {
    let mut h = TestHarness::new();
    let outcome = h.start_from(&RawInputs::new("2,5", "5", "0,5")).unwrap();
    assert!(matches!(outcome, StartOutcome::Started(_)));
    assert_eq!(h.state().max_ticks, Some(1_800));

    let started = h.notes_with(Severity::Info);
    assert_eq!(started.len(), 1);
    assert_eq!(started[0].display_ms, 3_500);

    // Initial frame reflects the reset, running state.
    let first = &h.frames.frames[0];
    assert!(first.running);
    assert_eq!(first.elapsed_ticks, 0);
}

#[test]
fn test_horizon_completion_notifies_and_returns_to_idle() {
    let mut h = TestHarness::new();
    // 30 modeled seconds.
    h.start(720.0, 1_440.0, 30.0 / 3_600.0);
    assert_eq!(h.run_for(1_000), TickOutcome::Stopped(StopReason::HorizonReached));

    let summary = h.sim.last_run().unwrap();
    assert_eq!(summary.reason, StopReason::HorizonReached);
    assert_eq!(summary.final_state.elapsed_ticks, 30);
    assert!(!summary.final_state.running);

    let info = h.notes_with(Severity::Info);
    assert_eq!(info.len(), 2);
    assert_eq!(info[1].display_ms, 4_000);

    assert!(!h.sim.is_running());
    assert_eq!(h.state().elapsed_ticks, 0);
}

#[test]
fn test_frame_sink_stop_takes_precedence_over_horizon() {
    let mut h = TestHarness::new();
    h.frames.stop_at_tick = Some(20);
    h.start(3_600.0, 3_600.0, 20.0 / 3_600.0);

    assert_eq!(h.run_for(100), TickOutcome::Stopped(StopReason::Requested));
    assert_eq!(h.sim.last_run().unwrap().final_state.elapsed_ticks, 20);
    // Only the start notice: a requested stop is silent.
    assert_eq!(h.notes.len(), 1);
}

#[test]
fn test_every_frame_satisfies_queue_invariant() {
    let mut h = TestHarness::new_with_seed(9);
    h.start(5_400.0, 3_000.0, 0.0);
    h.run_for(5_000);
    h.stop();

    let ticked: Vec<_> = h.frames.frames.iter().filter(|f| f.elapsed_ticks > 0).collect();
    assert_eq!(ticked.len(), 5_001);
    for frame in &h.frames.frames {
        assert_eq!(frame.queue_length, frame.arrivals - frame.departures);
    }
    for pair in h.frames.frames.windows(2).take(5_000) {
        // At most one departure per tick.
        assert!(pair[1].departures - pair[0].departures <= 1);
    }
}
