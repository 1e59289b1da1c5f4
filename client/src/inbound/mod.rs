//! Inbound adapters that drive the domain services.
//!
//! - **cli**: clap command tree and its dispatcher

pub mod cli;
