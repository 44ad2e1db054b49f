//! Infrastructure layer module
//!
//! Everything that touches the outside world:
//! - Configuration files (loading, discovery, hot reload)
//! - Logging

pub mod config;
pub mod logging;
