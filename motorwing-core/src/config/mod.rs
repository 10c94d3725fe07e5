//! Configuration types
//!
//! Board-agnostic configuration structures for the controller and the
//! motors wired to it.

pub mod hardware;
pub mod types;

pub use hardware::*;
pub use types::*;
