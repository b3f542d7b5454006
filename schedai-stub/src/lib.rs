//! `SchedAI` stub backend library.
//!
//! Exposes the stub REST server for use in tests and embedding. The stub
//! keeps everything in memory and deliberately answers in the wrapped and
//! irregular JSON shapes the real backend is known to produce, so clients
//! exercise their shape absorption against it.

pub mod config;
pub mod routes;
pub mod store;
