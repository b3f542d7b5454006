//! Property-based tests for the reconciliation layer.
//!
//! Uses proptest to verify:
//! 1. Split day/time records round-trip: serialize(normalize(r)) emits the
//!    same `deadline_day`/`deadline_time` pair (seconds-padded).
//! 2. Every known constraint-record shape classifies to the embedded name.
//! 3. Normalization never panics on assorted junk records.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use proptest::prelude::*;
use serde_json::{Value, json};

use schedai_proto::normalize::{normalize_category_name, normalize_task};
use schedai_proto::serialize::serialize_task_create;
use schedai_proto::task::UserId;

// --- Strategies ---

/// Calendar dates that are valid in every month.
fn arb_day() -> impl Strategy<Value = String> {
    (2000u32..2100, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| format!("{y:04}-{m:02}-{d:02}"))
}

/// Times without a seconds component, as the backend's forms send them.
fn arb_time() -> impl Strategy<Value = String> {
    (0u32..24, 0u32..60).prop_map(|(h, m)| format!("{h:02}:{m:02}"))
}

/// Category display names.
fn arb_name() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 ]{0,18}[A-Za-z0-9]"
}

/// Junk values that must never panic the normalizer.
fn arb_junk() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(json!(null)),
        any::<i64>().prop_map(|n| json!(n)),
        any::<bool>().prop_map(|b| json!(b)),
        "[^\"]{0,32}".prop_map(|s| json!(s)),
        "[^\"]{0,32}".prop_map(|s| json!({ "value": s })),
        any::<i64>().prop_map(|n| json!({"value": n, "type": n})),
    ]
}

proptest! {
    #[test]
    fn split_deadline_round_trips(
        day in arb_day(),
        time in arb_time(),
        minutes in 1u32..600,
    ) {
        let record = json!({
            "id": 1,
            "name": "task",
            "deadline_day": day,
            "deadline_time": time,
            "duration_minutes": minutes,
        });

        let task = normalize_task(&record).unwrap();
        let expected = format!("{day}T{time}:00");
        prop_assert_eq!(task.deadline.as_deref(), Some(expected.as_str()));
        prop_assert_eq!(task.duration_minutes, Some(minutes));

        let out = serialize_task_create(UserId::new(1), &task.to_draft());
        prop_assert_eq!(out["deadline_day"].as_str(), Some(day.as_str()));
        let padded = format!("{time}:00");
        prop_assert_eq!(out["deadline_time"].as_str(), Some(padded.as_str()));
        prop_assert_eq!(out["duration_minutes"].as_u64(), Some(u64::from(minutes)));
    }

    #[test]
    fn every_known_shape_classifies_to_its_name(name in arb_name()) {
        let embedded = serde_json::to_string(&json!({"name": name})).unwrap();
        let shapes = [
            json!(name),
            json!({"name": name}),
            json!({"value": {"name": name}}),
            json!({"value": embedded}),
            json!({"value": name}),
            json!({"type": name}),
        ];
        for shape in shapes {
            let normalized = normalize_category_name(&shape);
            prop_assert_eq!(
                normalized.as_deref(),
                Some(name.as_str())
            );
        }
    }

    #[test]
    fn classification_is_total_over_junk(record in arb_junk()) {
        // Either a name or None — never a panic.
        let _ = normalize_category_name(&record);
    }

    #[test]
    fn unparsable_deadlines_pass_through_serialization(
        junk in "[a-z ]{1,24}",
    ) {
        let record = json!({"id": 1, "name": "task", "deadline": junk});
        let task = normalize_task(&record).unwrap();
        let out = serialize_task_create(UserId::new(1), &task.to_draft());
        prop_assert_eq!(out["deadline"].as_str(), Some(junk.as_str()));
        prop_assert!(out.get("deadline_day").is_none());
    }
}
