//! Error types for secrets resolution and access

mod builders;
mod conversions;
mod display;
mod types;

pub use types::{Error, Result};
