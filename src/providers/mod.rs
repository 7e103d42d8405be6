//! Providers Module - External Data Sources
//!
//! The GoPlus Security REST client and its envelope handling.

pub mod envelope;
pub mod goplus;

pub use envelope::*;
pub use goplus::*;
