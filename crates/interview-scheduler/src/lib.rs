//! Interview scheduling engine: slot catalog, request validation, conflict
//! prevention, and booking lifecycle tracking behind a pluggable store.

pub mod config;
pub mod error;
pub mod scheduling;
pub mod telemetry;
