//! Utils Module - Helper Functions & Shared Utilities

pub mod constants;
pub mod endpoint;

pub use constants::*;
pub use endpoint::*;
