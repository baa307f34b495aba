//! Request handlers.
//!
//! Route wiring lives in [`crate::routes`]; these modules only hold the
//! async handler functions.

pub mod echo;
pub mod fallback;
