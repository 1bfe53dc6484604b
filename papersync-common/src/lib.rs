//! # papersync common library
//!
//! Shared code for the papersync services:
//! - Error type
//! - TOML / environment configuration loading
//! - Tracing subscriber bootstrap

pub mod config;
pub mod error;
pub mod logging;

pub use error::{Error, Result};
