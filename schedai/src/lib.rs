//! `SchedAI` — reconciling client for the Schedule.ai task service.

pub mod assistant;
pub mod config;
pub mod session;
pub mod tasks;
pub mod transport;
