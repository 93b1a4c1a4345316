// crates/pattern-catalog-patterns/tests/scenarios.rs
// ============================================================================
// Module: Built-in Scenario Tests
// Description: Scripted walkthroughs of individual built-in entries.
// Purpose: Pin the observable behavior of the shipped examples.
// Dependencies: pattern-catalog-core, pattern-catalog-patterns, serde_json
// ============================================================================
//! ## Overview
//! Drives built-ins through [`ExampleRunner`] scripts and, for pools, through
//! the typed capability.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod support;

use pattern_catalog_core::ExampleRunner;
use pattern_catalog_core::PatternCategory;
use pattern_catalog_core::PatternError;
use pattern_catalog_core::Registry;
use pattern_catalog_core::RunError;
use pattern_catalog_core::Script;
use pattern_catalog_core::Verifier;
use pattern_catalog_core::capabilities::PooledObject;
use pattern_catalog_core::capabilities::ReleaseOutcome;
use pattern_catalog_patterns::BuiltinOptions;
use pattern_catalog_patterns::DEFAULT_POOL_MAX_SIZE;
use pattern_catalog_patterns::builtin_registry;
use serde_json::Value;
use serde_json::json;
use support::TestResult;
use support::ensure;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Registry holding every built-in with default options.
fn registry() -> TestResult<Registry> {
    Ok(builtin_registry(&BuiltinOptions::default())?)
}

/// Runs `script` and returns its outputs.
fn run(registry: &Registry, category: PatternCategory, name: &str, script: &Script) -> TestResult<Vec<Value>> {
    Ok(ExampleRunner::new(registry).run(category, name, script)?)
}

// ============================================================================
// SECTION: Behavioral
// ============================================================================

#[test]
fn stock_price_reaches_each_observer_once() -> TestResult {
    let registry = registry()?;
    let script = Script::new()
        .step("subscribe", vec![json!("investor-a")])
        .step("subscribe", vec![json!("investor-b")])
        .step("set_price", vec![json!("AAPL"), json!(150)])
        .step("observations", vec![]);
    let outputs = run(&registry, PatternCategory::Observer, "stock-market", &script)?;
    ensure(outputs.get(2) == Some(&json!(2)), "two observers notified")?;
    let expected = json!([
        { "observer": "investor-a", "topic": "AAPL", "value": 150 },
        { "observer": "investor-b", "topic": "AAPL", "value": 150 },
    ]);
    ensure(outputs.get(3) == Some(&expected), format!("unexpected observations {:?}", outputs.get(3)))
}

/// Each subscriber records the published price exactly once, in subscription order.
#[test]
fn notify_delivers_to_subscribers_in_order() -> TestResult {
    let registry = registry()?;
    let script = Script::new()
        .step("subscribe", vec![json!("obs1")])
        .step("subscribe", vec![json!("obs2")])
        .step("notify", vec![json!("AAPL"), json!(150)]);
    let outputs = run(&registry, PatternCategory::Observer, "stock-market", &script)?;
    let expected = json!([
        { "observer": "obs1", "topic": "AAPL", "value": 150 },
        { "observer": "obs2", "topic": "AAPL", "value": 150 },
    ]);
    ensure(outputs.len() == 3, "one output per step")?;
    ensure(outputs.get(2) == Some(&expected), format!("unexpected deliveries {:?}", outputs.get(2)))
}

#[test]
fn notify_reports_only_its_own_deliveries() -> TestResult {
    let registry = registry()?;
    let script = Script::new()
        .step("subscribe", vec![json!("display")])
        .step("notify", vec![json!("temperature"), json!(21)])
        .step("notify", vec![json!("temperature"), json!(23)])
        .step("observations", vec![]);
    let outputs = run(&registry, PatternCategory::Observer, "weather-station", &script)?;
    ensure(
        outputs.get(2) == Some(&json!([{ "observer": "display", "topic": "temperature", "value": 23 }])),
        format!("second notify should report one delivery: {:?}", outputs.get(2)),
    )?;
    ensure(outputs.get(3).and_then(Value::as_array).map(Vec::len) == Some(2), "log holds both deliveries")
}

#[test]
fn iterating_past_the_end_keeps_partial_outputs() -> TestResult {
    let registry = registry()?;
    let script = Script::new().step("next", vec![]).step("next", vec![]).step("next", vec![]).step("next", vec![]);
    let Err(failure) = ExampleRunner::new(&registry).run(PatternCategory::Iterator, "three-items", &script) else {
        return Err("fourth next must fail".into());
    };
    ensure(failure.outputs == vec![json!(1), json!(2), json!(3)], "first three values kept")?;
    ensure(
        failure.error
            == RunError::OperationFailed {
                step: 3,
                source: PatternError::ExhaustedIterator,
            },
        format!("unexpected error {}", failure.error),
    )
}

#[test]
fn command_undo_restores_the_light() -> TestResult {
    let registry = registry()?;
    let script = Script::new()
        .step("execute", vec![json!("on")])
        .step("state", vec![])
        .step("undo", vec![])
        .step("state", vec![]);
    let outputs = run(&registry, PatternCategory::Command, "light-switch", &script)?;
    ensure(outputs.get(1) == Some(&json!({ "on": true })), "light turned on")?;
    ensure(outputs.get(3) == Some(&json!({ "on": false })), "undo turned the light back off")
}

#[test]
fn traffic_light_cycles_back_to_red() -> TestResult {
    let registry = registry()?;
    let script = Script::new()
        .step("current", vec![])
        .step("change", vec![])
        .step("change", vec![])
        .step("change", vec![])
        .step("current", vec![]);
    let outputs = run(&registry, PatternCategory::State, "traffic-light", &script)?;
    ensure(outputs.first() == outputs.get(4), "three changes return to the starting state")
}

#[test]
fn chat_messages_skip_the_sender() -> TestResult {
    let registry = registry()?;
    let script = Script::new()
        .step("join", vec![json!("alice")])
        .step("join", vec![json!("bob")])
        .step("send", vec![json!("alice"), json!("hi")])
        .step("inbox", vec![json!("alice")])
        .step("inbox", vec![json!("bob")]);
    let outputs = run(&registry, PatternCategory::Mediator, "chat-room", &script)?;
    ensure(outputs.get(3) == Some(&json!([])), "sender receives nothing")?;
    let bob = json!([{ "recipient": "bob", "sender": "alice", "message": "hi" }]);
    ensure(outputs.get(4) == Some(&bob), "bob receives the message")
}

// ============================================================================
// SECTION: Structural
// ============================================================================

#[test]
fn decorated_coffee_adds_each_ingredient() -> TestResult {
    let registry = registry()?;
    let script = Script::new().step("decorated", vec![]);
    let outputs = run(&registry, PatternCategory::Decorator, "coffee", &script)?;
    let expected = json!({ "cost": 8, "description": "coffee + milk + sugar" });
    ensure(outputs == vec![expected], "coffee costs 5 + 2 + 1")
}

#[test]
fn proxy_builds_the_image_once() -> TestResult {
    let registry = registry()?;
    let script = Script::new()
        .step("created", vec![])
        .step("display", vec![])
        .step("display", vec![])
        .step("creations", vec![]);
    let outputs = run(&registry, PatternCategory::Proxy, "image-loading", &script)?;
    ensure(outputs.first() == Some(&json!(false)), "image not loaded up front")?;
    ensure(outputs.get(3) == Some(&json!(1)), "image loaded exactly once")
}

#[test]
fn module_hides_its_count() -> TestResult {
    let registry = registry()?;
    let script = Script::new().step("increment", vec![]).step("increment", vec![]).step("count", vec![]);
    let Err(failure) = ExampleRunner::new(&registry).run(PatternCategory::Module, "counter", &script) else {
        return Err("private field must not be reachable".into());
    };
    ensure(failure.outputs == vec![json!(1), json!(2)], "public members ran")?;
    ensure(matches!(failure.error, RunError::UnknownOperation { step: 2, .. }), "count is private")
}

#[test]
fn adapters_translate_both_apis() -> TestResult {
    let registry = registry()?;
    let script = Script::new().step("fetch", vec![json!("legacy-api")]).step("fetch", vec![json!("modern-api")]);
    let outputs = run(&registry, PatternCategory::Adapter, "data-fetching", &script)?;
    let expected = vec![
        json!({ "result": "Data from legacy API", "source": "legacy-api" }),
        json!({ "result": "Data from modern API", "source": "modern-api" }),
    ];
    ensure(outputs == expected, "both payloads adapted to the same shape")
}

// ============================================================================
// SECTION: Creational
// ============================================================================

#[test]
fn pool_discards_the_release_beyond_its_bound() -> TestResult {
    let registry = registry()?;
    let entry = registry.get(PatternCategory::ObjectPool, "database-connections")?;
    let mut instance = entry.factory().construct()?;
    let pool = instance.as_object_pool_mut().ok_or("built-in pool has the wrong variant")?;
    let objects: Vec<_> = (0..=DEFAULT_POOL_MAX_SIZE).map(|_| pool.acquire()).collect();
    let outcomes: Vec<ReleaseOutcome> = objects.into_iter().map(|object| pool.release(object)).collect();
    ensure(pool.available() == DEFAULT_POOL_MAX_SIZE, "idle objects capped at the max size")?;
    ensure(outcomes.last() == Some(&ReleaseOutcome::Discarded), "the extra release is discarded")?;
    let before = pool.created();
    for _ in 0..DEFAULT_POOL_MAX_SIZE {
        pool.acquire();
    }
    ensure(pool.created() == before, "warm pool serves every acquisition")
}

/// Releasing through the typed API twice must not queue the object twice.
#[test]
fn double_release_never_hands_out_one_object_twice() -> TestResult {
    let registry = registry()?;
    for name in ["database-connections", "image-pool"] {
        let entry = registry.get(PatternCategory::ObjectPool, name)?;
        let mut instance = entry.factory().construct()?;
        let pool = instance.as_object_pool_mut().ok_or("built-in pool has the wrong variant")?;
        let object = pool.acquire();
        ensure(pool.release(object) == ReleaseOutcome::Retained, format!("{name}: first release retained"))?;
        ensure(pool.release(object) == ReleaseOutcome::Rejected, format!("{name}: second release rejected"))?;
        ensure(pool.available() == 1, format!("{name}: one idle object"))?;
        let first = pool.acquire();
        let second = pool.acquire();
        ensure(first.id != second.id, format!("{name}: object {} handed out twice", first.id))?;
    }
    Ok(())
}

#[test]
fn releasing_an_unknown_object_is_rejected() -> TestResult {
    let registry = registry()?;
    let entry = registry.get(PatternCategory::ObjectPool, "database-connections")?;
    let mut instance = entry.factory().construct()?;
    let pool = instance.as_object_pool_mut().ok_or("built-in pool has the wrong variant")?;
    let foreign = PooledObject {
        id: 99,
    };
    ensure(pool.release(foreign) == ReleaseOutcome::Rejected, "foreign object rejected")?;
    ensure(pool.available() == 0, "nothing queued")
}

/// Contract checks run against the entry's live shared state and must clean up.
#[test]
fn verifying_a_singleton_leaves_its_state_untouched() -> TestResult {
    let registry = registry()?;
    let runner = ExampleRunner::new(&registry);
    runner.run(PatternCategory::Singleton, "logger", &Script::new().step("log", vec![json!("boot")]))?;
    let report = Verifier::new(&registry).verify(PatternCategory::Singleton, "logger")?;
    ensure(report.passed(), format!("logger failed: {:?}", report.results))?;
    let outputs = runner.run(PatternCategory::Singleton, "logger", &Script::new().step("logs", vec![]))?;
    ensure(outputs.first() == Some(&json!(["boot"])), format!("verification left records behind: {outputs:?}"))
}

#[test]
fn singleton_entries_share_state_across_runs() -> TestResult {
    let registry = registry()?;
    let runner = ExampleRunner::new(&registry);
    runner.run(PatternCategory::Singleton, "logger", &Script::new().step("log", vec![json!("first")]))?;
    let outputs = runner.run(PatternCategory::Singleton, "logger", &Script::new().step("logs", vec![]))?;
    let logs = outputs.first().and_then(Value::as_array).ok_or("logs must be an array")?;
    ensure(logs.contains(&json!("first")), "second run sees the first run's entry")
}
