//! Canonical model and wire-shape reconciliation for `SchedAI` clients.
//!
//! The backend's JSON records are not shape-stable: tasks arrive with either
//! `duration` or `duration_minutes`, and with either a combined `deadline`
//! string or split `deadline_day`/`deadline_time` fields; constraint records
//! arrive in half a dozen layouts. This crate absorbs that variability into
//! one canonical in-memory model ([`task::Task`]) and maps canonical
//! creation requests back to the field names the backend expects.

pub mod normalize;
pub mod serialize;
pub mod task;
