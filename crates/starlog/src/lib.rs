//! starlog library
//!
//! This module exports the command-line front end of starlog (configuration,
//! report rendering and the run loop) for use in integration tests.

pub mod app;
pub mod config;
pub mod report;
