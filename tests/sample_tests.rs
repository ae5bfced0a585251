// Integration tests for the built-in sample catalog

use looptty::samples;
use looptty::simulator::simulate;

#[test]
fn test_every_sample_produces_a_trace() {
    for sample in samples::all() {
        let steps = simulate(sample.code);
        assert!(
            !steps.is_empty(),
            "sample '{}' produced an empty trace",
            sample.id
        );
    }
}

#[test]
fn test_every_sample_ends_with_empty_call_stack() {
    for sample in samples::all() {
        let steps = simulate(sample.code);
        let last = steps.last().unwrap();
        assert!(
            last.snapshot.call_stack.is_empty(),
            "sample '{}' left {} frame(s) on the call stack",
            sample.id,
            last.snapshot.call_stack.len()
        );
    }
}

#[test]
fn test_every_sample_has_strictly_increasing_step_ids() {
    for sample in samples::all() {
        let steps = simulate(sample.code);
        for pair in steps.windows(2) {
            assert!(
                pair[0].id < pair[1].id,
                "sample '{}' has non-increasing step ids",
                sample.id
            );
        }
    }
}

#[test]
fn test_sample_ids_are_unique() {
    let mut ids: Vec<&str> = samples::all().iter().map(|s| s.id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), samples::all().len());
}

#[test]
fn test_find_resolves_every_listed_id() {
    for sample in samples::all() {
        let found = samples::find(sample.id).expect("listed sample must resolve");
        assert_eq!(found.id, sample.id);
    }
    assert!(samples::find("no-such-sample").is_none());
}

#[test]
fn test_default_sample_is_listed() {
    let default = samples::default_sample();
    assert!(samples::all().iter().any(|s| s.id == default.id));
}

#[test]
fn test_basic_timeout_sample_log_order() {
    let sample = samples::find("basic-timeout").expect("basic-timeout sample");
    let steps = simulate(sample.code);

    let logged: Vec<&str> = steps
        .iter()
        .flat_map(|s| s.console_logs.iter())
        .map(|l| l.message.as_str())
        .collect();
    assert_eq!(logged, vec!["Start", "End", "Timeout callback"]);
}

#[test]
fn test_mixed_async_sample_runs_microtask_first() {
    let sample = samples::find("mixed-async").expect("mixed-async sample");
    let steps = simulate(sample.code);

    let promise_pickup = steps
        .iter()
        .position(|s| s.description.contains("moved Promise.then callback"))
        .expect("promise pickup step");
    let timer_pickup = steps
        .iter()
        .position(|s| s.description.contains("moved setTimeout callback"))
        .expect("timer pickup step");
    assert!(promise_pickup < timer_pickup);
}
