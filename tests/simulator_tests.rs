// Integration tests for the execution simulator

use looptty::simulator::simulate;
use looptty::trace::{ExecutionStep, StepKind};

/// All console messages in emission order
fn messages(steps: &[ExecutionStep]) -> Vec<&str> {
    steps
        .iter()
        .flat_map(|s| s.console_logs.iter())
        .map(|l| l.message.as_str())
        .collect()
}

/// Index of the first step whose description contains `needle`
fn step_index(steps: &[ExecutionStep], needle: &str) -> usize {
    steps
        .iter()
        .position(|s| s.description.contains(needle))
        .unwrap_or_else(|| panic!("no step matching '{}'", needle))
}

#[test]
fn test_single_console_log() {
    let steps = simulate("console.log('Hello World')");

    assert_eq!(steps.len(), 2);

    assert_eq!(steps[0].kind, StepKind::FunctionCall);
    assert!(steps[0].description.contains("console.log"));
    assert_eq!(steps[0].line_number, Some(1));
    assert_eq!(steps[0].console_logs.len(), 1);
    assert_eq!(steps[0].console_logs[0].message, "Hello World");
    assert_eq!(steps[0].snapshot.call_stack.len(), 1);
    assert_eq!(steps[0].snapshot.call_stack[0].name, "console.log");

    assert_eq!(steps[1].kind, StepKind::FunctionReturn);
    assert!(steps[1].description.contains("executed and removed"));
    assert!(steps[1].snapshot.call_stack.is_empty());
}

#[test]
fn test_sequential_console_logs() {
    let source = "console.log('First')\nconsole.log('Second')\nconsole.log('Third')\n";
    let steps = simulate(source);

    // One call and one return step per statement
    assert_eq!(steps.len(), 6);
    assert_eq!(messages(&steps), vec!["First", "Second", "Third"]);

    for pair in steps.chunks(2) {
        assert_eq!(pair[0].kind, StepKind::FunctionCall);
        assert_eq!(pair[0].snapshot.call_stack.len(), 1);
        assert_eq!(pair[1].kind, StepKind::FunctionReturn);
        assert_eq!(pair[1].snapshot.call_stack.len(), 0);
    }
}

#[test]
fn test_set_timeout_registration_and_callback_order() {
    let source = "console.log('Start');\n\nsetTimeout(() => {\n  console.log('Timeout callback');\n}, 1000);\n\nconsole.log('End');\n";
    let steps = simulate(source);

    // Synchronous output first, callback output last, regardless of delay
    assert_eq!(messages(&steps), vec!["Start", "End", "Timeout callback"]);

    let registered = step_index(&steps, "timer registered with Web APIs for 1000ms");
    assert_eq!(steps[registered].kind, StepKind::WebApi);
    // Registration leaves the call stack empty and the timer in flight
    assert!(steps[registered].snapshot.call_stack.is_empty());
    assert_eq!(steps[registered].snapshot.web_apis.len(), 1);
    assert_eq!(
        steps[registered].snapshot.web_apis[0].name,
        "setTimeout(1000ms)"
    );

    let completed = step_index(&steps, "Timer completed (1000ms)");
    assert_eq!(steps[completed].kind, StepKind::CallbackQueue);
    assert!(registered < completed);
    // Handing the callback to the queue consumed the registration
    assert!(steps[completed].snapshot.web_apis.is_empty());
    assert_eq!(steps[completed].snapshot.callback_queue.len(), 1);

    let picked_up = step_index(&steps, "Event loop moved setTimeout callback");
    assert!(completed < picked_up);
    assert!(steps[picked_up].snapshot.callback_queue.is_empty());
    assert_eq!(steps[picked_up].snapshot.call_stack.len(), 1);

    // Every sync step precedes every callback-replay step
    let end_log = step_index(&steps, "console.log('End')");
    assert!(end_log < completed);

    // The trace finishes with everything drained
    let last = steps.last().unwrap();
    assert!(last.snapshot.call_stack.is_empty());
    assert!(last.snapshot.callback_queue.is_empty());
    assert!(last.snapshot.web_apis.is_empty());
}

#[test]
fn test_timer_delay_governs_drain_order() {
    let source = "setTimeout(() => {\n  console.log('slow');\n}, 2000);\n\nsetTimeout(() => {\n  console.log('fast');\n}, 1000);\n";
    let steps = simulate(source);

    // Declared second but drains first: delay governs order, not position
    assert_eq!(messages(&steps), vec!["fast", "slow"]);
    assert!(
        step_index(&steps, "Timer completed (1000ms)")
            < step_index(&steps, "Timer completed (2000ms)")
    );
}

#[test]
fn test_equal_delays_keep_source_order() {
    let source = "setTimeout(() => {\n  console.log('one');\n}, 500);\n\nsetTimeout(() => {\n  console.log('two');\n}, 500);\n";
    let steps = simulate(source);

    assert_eq!(messages(&steps), vec!["one", "two"]);
}

#[test]
fn test_microtask_priority_over_zero_delay_timer() {
    let source = "setTimeout(() => {\n  console.log('Timeout');\n}, 0);\n\nPromise.resolve().then(() => {\n  console.log('Promise');\n});\n";
    let steps = simulate(source);

    // The timer is declared first and has zero delay, yet the promise
    // callback still drains first
    assert_eq!(messages(&steps), vec!["Promise", "Timeout"]);
    assert!(
        step_index(&steps, "callback moved to microtask queue")
            < step_index(&steps, "Timer completed (0ms)")
    );
}

#[test]
fn test_promise_result_substitution() {
    let source = "console.log('Start');\n\nPromise.resolve('Promise result')\n  .then(result => {\n    console.log(result);\n  });\n\nconsole.log('End');\n";
    let steps = simulate(source);

    assert_eq!(messages(&steps), vec!["Start", "End", "Promise result"]);

    let registered = step_index(&steps, "promise registered with Web APIs");
    assert_eq!(steps[registered].kind, StepKind::WebApi);
    assert_eq!(steps[registered].snapshot.web_apis.len(), 1);
    assert_eq!(
        steps[registered].snapshot.web_apis[0].name,
        "Promise resolution"
    );

    let queued = step_index(&steps, "callback moved to microtask queue");
    assert_eq!(steps[queued].kind, StepKind::CallbackQueue);
    let picked_up = step_index(&steps, "moved Promise.then callback from microtask queue");
    let done = step_index(&steps, "Promise.then callback execution completed");
    assert!(queued < picked_up && picked_up < done);
}

#[test]
fn test_promise_string_literal_and_plain_token() {
    let literal = "Promise.resolve().then(() => {\n  console.log('done');\n});\n";
    assert_eq!(messages(&simulate(literal)), vec!["done"]);

    let token = "Promise.resolve().then(() => {\n  console.log(value);\n});\n";
    assert_eq!(messages(&simulate(token)), vec!["value"]);
}

#[test]
fn test_nested_function_calls() {
    let source = "function third() {\n  console.log(\"3\")\n}\n\nfunction second() {\n  console.log(\"2 before\")\n  third()\n  console.log(\"2 after\")\n}\n\nfunction first() {\n  console.log(\"1 before\")\n  second()\n  console.log(\"1 after\")\n}\n\nfirst();\n";
    let steps = simulate(source);

    assert_eq!(
        messages(&steps),
        vec!["1 before", "2 before", "3", "2 after", "1 after"]
    );

    // Calls nest first → second → third, returns unwind in reverse
    let call_first = step_index(&steps, "Called first()");
    let call_second = step_index(&steps, "Called second()");
    let call_third = step_index(&steps, "Called third()");
    assert!(call_first < call_second && call_second < call_third);

    let ret_third = step_index(&steps, "third() completed");
    let ret_second = step_index(&steps, "second() completed");
    let ret_first = step_index(&steps, "first() completed");
    assert!(ret_third < ret_second && ret_second < ret_first);

    // Function-frame depth is 3 at the deepest call
    assert_eq!(steps[call_third].snapshot.call_stack.len(), 3);
    let names: Vec<&str> = steps[call_third]
        .snapshot
        .call_stack
        .iter()
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(names, vec!["first", "second", "third"]);

    assert!(steps.last().unwrap().snapshot.call_stack.is_empty());
}

#[test]
fn test_single_line_function_body() {
    let source = "function second() { }\n\nfunction first() { second() }\n\nfirst();\n";
    let steps = simulate(source);

    assert_eq!(step_index(&steps, "Called first()"), 0);
    assert!(step_index(&steps, "Called first()") < step_index(&steps, "Called second()"));
    assert!(
        step_index(&steps, "second() completed") < step_index(&steps, "first() completed")
    );
    assert_eq!(steps.last().unwrap().kind, StepKind::FunctionReturn);
}

#[test]
fn test_function_body_with_trailing_brace_statement() {
    // Closing brace shares a line with the last statement
    let source = "function tenth() {\n  console.log(\"10\")\n }\n\nfunction ninth() {\n  console.log(\"9\")\n  tenth() }\n\nninth();\n";
    let steps = simulate(source);

    assert_eq!(messages(&steps), vec!["9", "10"]);
    assert!(step_index(&steps, "Called ninth()") < step_index(&steps, "Called tenth()"));
}

#[test]
fn test_unknown_call_target_is_ignored() {
    let steps = simulate("mystery();\n");
    assert!(steps.is_empty());
}

#[test]
fn test_set_interval_registers_but_never_fires() {
    let steps = simulate("setInterval(tick, 500);\n");

    assert_eq!(steps.len(), 2);
    assert_eq!(steps[0].kind, StepKind::FunctionCall);
    assert_eq!(steps[1].kind, StepKind::WebApi);
    assert!(steps[1].description.contains("repeats every 500ms"));

    // The registration stays in flight: no callback ever drains
    let last = steps.last().unwrap();
    assert_eq!(last.snapshot.web_apis.len(), 1);
    assert_eq!(last.snapshot.web_apis[0].name, "setInterval(500ms)");
    assert!(last.snapshot.call_stack.is_empty());
}

#[test]
fn test_multiline_set_timeout_delay_lookahead() {
    // The delay literal sits on the closing line, below the invocation
    let source = "console.log('Start');\nsetTimeout(() => {\n  console.log('Later');\n}, 3000);\n";
    let steps = simulate(source);

    let registered = step_index(&steps, "timer registered with Web APIs for 3000ms");
    assert_eq!(
        steps[registered].snapshot.web_apis[0].time_remaining,
        Some(3000)
    );
}

#[test]
fn test_missing_delay_defaults_to_zero() {
    let source = "setTimeout(() => {\n  console.log('x');\n});\n";
    let steps = simulate(source);

    assert!(steps
        .iter()
        .any(|s| s.description.contains("timer registered with Web APIs for 0ms")));
    assert_eq!(messages(&steps), vec!["x"]);
}

#[test]
fn test_two_timers_register_with_own_delays() {
    let source = "console.log('Start');\n\nsetTimeout(() => {\n    console.log('Timeout callback');\n}, 1000);\n\nsetTimeout(() => {\n    console.log('Timeout callback');\n}, 2000);\n\nconsole.log('End');\n";
    let steps = simulate(source);

    let registrations: Vec<&ExecutionStep> = steps
        .iter()
        .filter(|s| s.kind == StepKind::WebApi && s.description.contains("timer registered"))
        .collect();
    assert_eq!(registrations.len(), 2);
    assert!(registrations[0].description.contains("1000ms"));
    assert!(registrations[1].description.contains("2000ms"));
    // Both timers in flight after the second registration
    assert_eq!(registrations[1].snapshot.web_apis.len(), 2);
}

#[test]
fn test_never_panics_on_malformed_input() {
    // Worst case is a short or empty trace, never an error
    assert!(simulate("").is_empty());
    assert!(simulate("let x = 1;\nif (x) { weird }\n}}}}").is_empty());
    simulate("setTimeout(() => {\n  console.log('never closed')");
    simulate(".then(x => {");
    simulate("Promise.resolve('orphan');");
    simulate("function broken( {\nconsole.log('x')");
}

#[test]
fn test_simulation_is_deterministic() {
    let source = "console.log('Start');\n\nsetTimeout(() => {\n  console.log('Timeout');\n}, 0);\n\nPromise.resolve().then(() => {\n  console.log('Promise');\n});\n\nconsole.log('End');\n";

    let first = simulate(source);
    let second = simulate(source);
    // Counters reset per run, so even step ids match
    assert_eq!(first, second);
}

#[test]
fn test_step_ids_strictly_increase() {
    let source = "console.log('a');\nsetTimeout(() => {\n  console.log('b');\n}, 10);\n";
    let steps = simulate(source);

    for pair in steps.windows(2) {
        assert!(pair[0].id < pair[1].id);
    }
}

#[test]
fn test_snapshots_are_not_mutated_by_later_steps() {
    let source = "console.log('a');\nconsole.log('b');\n";
    let steps = simulate(source);

    // The first call step's snapshot still shows depth 1 even though the
    // stack was popped and reused afterwards
    assert_eq!(steps[0].snapshot.call_stack.len(), 1);
    assert_eq!(steps[2].snapshot.call_stack.len(), 1);
    assert_ne!(
        steps[0].snapshot.call_stack[0].id,
        steps[2].snapshot.call_stack[0].id
    );
}
