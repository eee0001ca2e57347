//! Process-wide setup: environment configuration and log output

pub mod config;
pub mod telemetry;
