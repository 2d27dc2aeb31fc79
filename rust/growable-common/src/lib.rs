//! Error and result definitions shared by all growable-* crates.

pub mod error;
pub mod result;

pub use result::Result;
