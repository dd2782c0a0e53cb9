//! Infrastructure layer providing external service integrations.
//!
//! This module contains configuration loading, log setup and the
//! platform-facing delivery of exported files.

pub mod config;
pub mod delivery;
pub mod logging;

pub use config::*;
pub use delivery::*;
pub use logging::*;
