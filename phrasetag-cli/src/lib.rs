//! phrasetag CLI library
//!
//! This library provides the command-line host around the phrasetag
//! tagging core: corpus loading, input resolution, output formatting and
//! parallel tagging of many documents against one shared index.

pub mod commands;
pub mod config;
pub mod corpus;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;

pub use error::{CliError, CliResult};
