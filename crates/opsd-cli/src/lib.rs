//! CLI components for the OPSD time-series pipeline.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
