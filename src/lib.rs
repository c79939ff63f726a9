//! Reconciles START/END job log lines into per-process jobs and flags the
//! ones that ran past their duration thresholds.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod server;
pub mod ui;

pub use pipeline::produce_report;
