//! srxsent CLI library
//!
//! This library provides the command-line interface for the srxsent
//! sentence boundary detector.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;
pub mod tokenizer;

pub use error::CliError;
