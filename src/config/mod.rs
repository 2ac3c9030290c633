//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (endpoints, timeouts, paging defaults)
//! - API credentials loaded from the environment
//! - CLI option types and the library `Config`

mod constants;
mod credentials;
mod types;

// Re-export all constants
pub use constants::*;
pub use credentials::ApiCredentials;
pub use types::{Command, Config, LogFormat, LogLevel, Opt, VirtualHosts};
