//! Core types, errors, and constants shared by the `vaultsecrets` crates.
//!
//! ## Key Components
//!
//! - **`errors`**: the [`Error`] enum and [`Result`] alias covering every way
//!   secrets resolution and access can fail.
//! - **`types`**: the resolved secrets mapping and its value type.
//! - **`constants`**: environment variable names, defaults, and the fixed
//!   strings of the injected-file format.

pub mod constants;
pub mod errors;
pub mod types;

pub use self::{
    constants::*,
    errors::{Error, Result},
    types::*,
};
