//! Inbound normalization: arbitrary backend records to the canonical model.
//!
//! The decoding rules are a chain of typed predicates tried in a fixed,
//! documented precedence order. Each rule either extracts a value or
//! declines, falling through to the next; the first match wins and rules
//! are never merged. Malformed fields degrade to "absent" — a single odd
//! record must never take down a whole list load.

use serde_json::Value;

use crate::task::{Task, TaskId};

/// Errors produced when a backend record cannot become a canonical task.
///
/// Deliberately narrow: only the fields the store invariant requires
/// (`id`, `name`) are load-bearing. Everything else is tolerated.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ShapeError {
    /// The record is not a JSON object.
    #[error("task record is not a JSON object")]
    NotAnObject,

    /// A required field is missing or has an unusable type.
    #[error("task record is missing required field `{0}`")]
    MissingField(&'static str),
}

/// Normalizes a backend task record into a canonical [`Task`].
///
/// Field resolution, in order of preference:
/// 1. Duration: `duration_minutes` if present and numeric, else `duration`,
///    else unset. Zero, negative, and fractional values count as absent.
/// 2. Deadline: `deadline_day` + `deadline_time` concatenated as
///    `<day>T<time>` (a time without seconds is padded to `HH:MM:00`);
///    else `deadline` verbatim; else `deadline_iso`; else unset.
/// 3. Category: `category` / `category2` pass through (empty → `None`).
///
/// The original record is retained in [`Task::raw`] for diagnostics.
///
/// # Errors
///
/// Returns [`ShapeError`] if the record is not an object or lacks a usable
/// `id` or non-empty `name`. No other field can fail normalization.
pub fn normalize_task(record: &Value) -> Result<Task, ShapeError> {
    let obj = record.as_object().ok_or(ShapeError::NotAnObject)?;

    let id = obj
        .get("id")
        .and_then(TaskId::from_value)
        .ok_or(ShapeError::MissingField("id"))?;
    let name = obj
        .get("name")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or(ShapeError::MissingField("name"))?
        .to_string();

    Ok(Task {
        id,
        name,
        category: non_empty_string(record, "category"),
        category2: non_empty_string(record, "category2"),
        duration_minutes: duration_minutes(record),
        deadline: deadline(record),
        raw: record.clone(),
    })
}

/// Duration preference: `duration_minutes`, then `duration`.
///
/// A key that is present but non-numeric (or not a positive integer that
/// fits `u32`) does not stop the search; the next key is still tried.
fn duration_minutes(record: &Value) -> Option<u32> {
    ["duration_minutes", "duration"].iter().find_map(|key| {
        record
            .get(*key)
            .and_then(Value::as_u64)
            .filter(|&n| n > 0)
            .and_then(|n| u32::try_from(n).ok())
    })
}

/// Deadline preference: split day/time fields, then `deadline`, then
/// `deadline_iso`. First matching rule wins; rules are not merged.
fn deadline(record: &Value) -> Option<String> {
    let day = non_empty_str(record, "deadline_day");
    let time = non_empty_str(record, "deadline_time");
    if let (Some(day), Some(time)) = (day, time) {
        return Some(format!("{day}T{}", pad_seconds(time)));
    }
    ["deadline", "deadline_iso"]
        .iter()
        .find_map(|key| non_empty_str(record, key))
        .map(ToString::to_string)
}

/// Pads a `HH:MM` time to `HH:MM:00`; anything else passes through.
fn pad_seconds(time: &str) -> String {
    if time.len() == 5 {
        format!("{time}:00")
    } else {
        time.to_string()
    }
}

fn non_empty_str<'a>(record: &'a Value, key: &str) -> Option<&'a str> {
    record
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

fn non_empty_string(record: &Value, key: &str) -> Option<String> {
    non_empty_str(record, key).map(ToString::to_string)
}

// ---------------------------------------------------------------------------
// Category-name classification
// ---------------------------------------------------------------------------

/// The classification chain for constraint records, in precedence order.
///
/// String and `name` forms come first because they are unambiguous labels;
/// `type` is the weakest signal (a coarse classification, not a label) and
/// is consulted only as a last resort.
const CLASSIFIERS: [fn(&Value) -> Option<String>; 5] = [
    as_bare_string,
    from_name_field,
    from_value_object,
    from_value_string,
    from_type_field,
];

/// Extracts a category display name from an arbitrary constraint record.
///
/// Precedence, stopping at the first match:
/// 1. the record is itself a string;
/// 2. a string-valued `name` field;
/// 3. a `value` object with a string `name`;
/// 4. a `value` string that parses as JSON carrying a `name`;
/// 5. a plain `value` string (also the fallback when rule 4's JSON is
///    malformed or lacks a `name` — never an error);
/// 6. a string-valued `type` field.
///
/// Returns `None` when nothing matches; callers must filter before
/// inserting into the category set.
#[must_use]
pub fn normalize_category_name(record: &Value) -> Option<String> {
    CLASSIFIERS.iter().find_map(|classify| classify(record))
}

fn as_bare_string(record: &Value) -> Option<String> {
    record.as_str().map(ToString::to_string)
}

fn from_name_field(record: &Value) -> Option<String> {
    record
        .get("name")
        .and_then(Value::as_str)
        .map(ToString::to_string)
}

fn from_value_object(record: &Value) -> Option<String> {
    record
        .get("value")
        .filter(|v| v.is_object())
        .and_then(|v| v.get("name"))
        .and_then(Value::as_str)
        .map(ToString::to_string)
}

/// Rules 4 and 5: a string `value` is first tried as embedded JSON with a
/// `name`; failing that (malformed JSON, or no `name` inside), the raw
/// string itself is the category.
fn from_value_string(record: &Value) -> Option<String> {
    let raw = record.get("value").and_then(Value::as_str)?;
    let parsed_name = serde_json::from_str::<Value>(raw)
        .ok()
        .and_then(|parsed| from_name_field(&parsed));
    Some(parsed_name.unwrap_or_else(|| raw.to_string()))
}

fn from_type_field(record: &Value) -> Option<String> {
    record
        .get("type")
        .and_then(Value::as_str)
        .map(ToString::to_string)
}

// ---------------------------------------------------------------------------
// Response-envelope unwrapping
// ---------------------------------------------------------------------------

/// Unwraps a task-list response body: a bare array or `{tasks: [...]}`.
///
/// Anything else yields an empty list.
#[must_use]
pub fn task_records(body: &Value) -> Vec<Value> {
    unwrap_list(body, &["tasks"])
}

/// Unwraps a task-creation response: a bare record (recognized by its
/// `id`) or a `{task: {...}}` wrapper.
#[must_use]
pub fn created_task_record(body: Value) -> Value {
    if body.get("id").is_some() {
        return body;
    }
    match body.get("task") {
        Some(task) => task.clone(),
        None => body,
    }
}

/// Unwraps a constraint-list response body: a bare array, or the first of
/// `{constraints}`, `{global_constraints}`, `{items}` that holds one.
#[must_use]
pub fn constraint_records(body: &Value) -> Vec<Value> {
    unwrap_list(body, &["constraints", "global_constraints", "items"])
}

/// Extracts the assistant's reply from a prompt response body.
#[must_use]
pub fn assistant_reply(body: &Value) -> Option<String> {
    body.get("reply")
        .and_then(Value::as_str)
        .map(ToString::to_string)
}

fn unwrap_list(body: &Value, keys: &[&str]) -> Vec<Value> {
    if let Some(list) = body.as_array() {
        return list.clone();
    }
    keys.iter()
        .find_map(|key| body.get(*key).and_then(Value::as_array))
        .cloned()
        .unwrap_or_default()
}
