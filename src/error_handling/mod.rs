//! Error handling.
//!
//! This module provides:
//! - Error type definitions for every layer (transport, pagination,
//!   comparison, storage, initialization, configuration)
//! - Categorization of `reqwest` failures into transport errors
//!
//! Failures of a single API fetch are never raised past the paginator; they
//! are rendered into the fetch outcome so the other side and any partial
//! data survive.

mod categorization;
mod types;

// Re-export public API
pub use categorization::categorize_reqwest_error;
pub use types::{
    CompareError, ConfigError, DatabaseError, FetchError, InitializationError, StoreError,
    TransportError,
};
