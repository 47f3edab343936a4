// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Integration tests for the `SimpleCache` facade.

use std::{
    sync::Arc,
    time::{Duration, SystemTime},
};

use keystash::{Error, ErrorKind, NAMESPACE_TAG, SimpleCache, Ttl};
use keystash_backend::{
    Backend, SaveOptions,
    testing::{BackendOp, MockBackend},
};
use keystash_memory::MemoryBackend;
use ohno::ErrorExt;
use tick::{Clock, ClockControl};

type TestResult = Result<(), Error>;

fn memory_cache<V>(clock: &Clock) -> SimpleCache<V, MemoryBackend<V>>
where
    V: Clone + Send + Sync + 'static,
{
    SimpleCache::new(MemoryBackend::new(clock.clone()), clock.clone())
}

#[test]
fn set_then_get_round_trips() -> TestResult {
    let clock = Clock::new_frozen();
    let cache = memory_cache::<String>(&clock);

    assert!(cache.set("k", "v".to_string(), Ttl::None)?);
    assert_eq!(cache.get("k", "default".to_string())?, "v");
    Ok(())
}

#[test]
fn missing_key_returns_default() -> TestResult {
    let clock = Clock::new_frozen();
    let cache = memory_cache::<i32>(&clock);

    assert_eq!(cache.get("never-written", -1)?, -1);
    Ok(())
}

#[test]
fn empty_key_is_rejected_by_every_single_key_operation() {
    let backend = MockBackend::<i32>::new();
    let cache = SimpleCache::<i32, _>::new(backend.clone(), Clock::new_frozen());

    let errors = [
        cache.get("", 0).unwrap_err(),
        cache.set("", 1, Ttl::None).unwrap_err(),
        cache.delete("").unwrap_err(),
        cache.has("").unwrap_err(),
    ];

    for error in errors {
        assert_eq!(error.kind(), ErrorKind::InvalidArgument);
        assert!(
            error.to_string().contains("Invalid key! Key should be a non-empty string."),
            "got: {error}"
        );
    }
    assert!(backend.operations().is_empty());
}

#[test]
fn entry_expires_after_ttl() -> TestResult {
    let control = ClockControl::new();
    let clock = control.to_clock();
    let cache = memory_cache::<i32>(&clock);

    cache.set("k", 7, 10_u64)?;
    control.advance(Duration::from_secs(9));
    assert_eq!(cache.get("k", 0)?, 7);

    control.advance(Duration::from_secs(1));
    assert_eq!(cache.get("k", 0)?, 0);
    assert!(!cache.has("k")?);
    Ok(())
}

#[test]
fn reads_do_not_extend_expiration() -> TestResult {
    let control = ClockControl::new();
    let clock = control.to_clock();
    let cache = memory_cache::<i32>(&clock);

    cache.set("k", 7, Duration::from_secs(10))?;
    for _ in 0..3 {
        control.advance(Duration::from_secs(3));
        assert_eq!(cache.get("k", 0)?, 7);
    }

    control.advance(Duration::from_secs(1));
    assert_eq!(cache.get("k", 0)?, 0);
    Ok(())
}

#[test]
fn absolute_ttl_in_the_past_is_immediately_absent() -> TestResult {
    let clock = Clock::new_frozen_at(SystemTime::UNIX_EPOCH + Duration::from_secs(1_000));
    let cache = memory_cache::<i32>(&clock);

    assert!(cache.set("k", 1, SystemTime::UNIX_EPOCH)?);
    assert_eq!(cache.get("k", 0)?, 0);
    Ok(())
}

#[test]
fn clear_only_removes_namespaced_entries() -> TestResult {
    let clock = Clock::new_frozen();
    let backend = Arc::new(MemoryBackend::<i32>::new(clock.clone()));
    let cache = SimpleCache::<i32, _>::new(Arc::clone(&backend), clock);

    cache.set("mine", 1, Ttl::None)?;
    backend
        .save("theirs", 2, &SaveOptions::new().with_tag("other.component"))
        .unwrap();

    assert!(cache.clear());

    assert_eq!(cache.get("mine", 0)?, 0);
    assert_eq!(backend.load("theirs").unwrap(), Some(2));
    Ok(())
}

#[test]
fn get_multiple_fills_missing_keys_with_default() -> TestResult {
    let clock = Clock::new_frozen();
    let cache = memory_cache::<&'static str>(&clock);
    cache.set("k2", "stored", Ttl::None)?;

    let values = cache.get_multiple(["k1", "k2", "k3"], "D")?;

    assert_eq!(values.len(), 3);
    assert_eq!(values["k1"], "D");
    assert_eq!(values["k2"], "stored");
    assert_eq!(values["k3"], "D");
    Ok(())
}

#[test]
fn get_multiple_fails_on_backend_error() {
    let backend = MockBackend::<i32>::new();
    backend.fail_when(|op| matches!(op, BackendOp::BulkLoad(_)));
    let cache = SimpleCache::<i32, _>::new(backend, Clock::new_frozen());

    let error = cache.get_multiple(["a"], 0).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::CacheOperation);
    assert!(error.find_source::<keystash_backend::Error>().is_some());
}

#[test]
fn set_multiple_is_not_rolled_back() -> TestResult {
    let backend = MockBackend::<i32>::new();
    backend.fail_when(|op| matches!(op, BackendOp::Save { key, .. } if key == "b"));
    let cache = SimpleCache::<i32, _>::new(backend.clone(), Clock::new_frozen());

    assert!(!cache.set_multiple([("a", 1), ("b", 2), ("c", 3)], Duration::from_secs(60))?);

    assert_eq!(cache.get("a", 0)?, 1);
    assert!(!backend.contains_key("b"));
    assert!(!backend.contains_key("c"));
    Ok(())
}

#[test]
fn set_multiple_accepts_owned_keys() -> TestResult {
    let clock = Clock::new_frozen();
    let cache = memory_cache::<u32>(&clock);

    let pairs = (0..5_u32).map(|i| (format!("key-{i}"), i));
    assert!(cache.set_multiple(pairs, Ttl::None)?);

    let values = cache.get_multiple((0..5).map(|i| format!("key-{i}")), 99)?;
    assert_eq!(values.len(), 5);
    assert_eq!(values["key-3"], 3);
    Ok(())
}

#[test]
fn delete_multiple_removes_each_key() -> TestResult {
    let clock = Clock::new_frozen();
    let cache = memory_cache::<i32>(&clock);
    cache.set_multiple([("a", 1), ("b", 2), ("c", 3)], Ttl::None)?;

    assert!(cache.delete_multiple(["a", "c", "never-written"])?);

    assert!(!cache.has("a")?);
    assert!(cache.has("b")?);
    assert!(!cache.has("c")?);
    Ok(())
}

#[test]
fn unrepresentable_ttl_is_invalid() {
    let clock = Clock::new_frozen();
    let cache = memory_cache::<i32>(&clock);

    let error = cache.set("k", 1, Duration::MAX).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::CacheOperation);
    assert!(error.to_string().contains("Invalid TTL!"), "got: {error}");
    assert!(!error.is_backend());
}

#[test]
fn has_agrees_with_get() -> TestResult {
    let control = ClockControl::new();
    let clock = control.to_clock();
    let cache = memory_cache::<i32>(&clock);
    cache.set("short", 1, 5_u64)?;
    cache.set("long", 2, Ttl::None)?;

    for step in 0..3 {
        for key in ["short", "long", "absent"] {
            let present = cache.get(key, i32::MIN)? != i32::MIN;
            assert_eq!(cache.has(key)?, present, "key {key} at step {step}");
        }
        control.advance(Duration::from_secs(3));
    }
    Ok(())
}

#[test]
fn write_failures_are_reported_as_false() -> TestResult {
    let backend = MockBackend::<i32>::new();
    backend.fail_when(|op| !matches!(op, BackendOp::Load(_)));
    let cache = SimpleCache::<i32, _>::new(backend, Clock::new_frozen());

    assert!(!cache.set("k", 1, Ttl::None)?);
    assert!(!cache.delete("k")?);
    assert!(!cache.clear());
    Ok(())
}

#[test]
fn read_failures_propagate_with_backend_source() {
    let backend = MockBackend::<i32>::new();
    backend.fail_when(|op| matches!(op, BackendOp::Load(_)));
    let cache = SimpleCache::<i32, _>::new(backend, Clock::new_frozen());

    for error in [cache.get("k", 0).unwrap_err(), cache.has("k").unwrap_err()] {
        assert_eq!(error.kind(), ErrorKind::CacheOperation);
        assert!(error.is_backend());
    }
}

#[test]
fn writes_carry_namespace_tag_and_fixed_expiration() -> TestResult {
    let clock = Clock::new_frozen();
    let backend = MockBackend::<i32>::new();
    let cache = SimpleCache::<i32, _>::new(backend.clone(), clock.clone());

    cache.set("k", 1, Duration::from_secs(30))?;

    let options = backend.options_for("k").expect("entry should be saved");
    assert!(options.tags().contains(NAMESPACE_TAG));
    assert!(!options.is_sliding());
    assert_eq!(
        options.expiration().deadline(),
        Some(clock.system_time() + Duration::from_secs(30))
    );
    Ok(())
}
