//! Core logic for the JSONQuery fixture server.
//!
//! Holds the fixed-shape [`document::ResponseDocument`] and the lenient
//! request body decoder. Nothing here touches HTTP so the same pieces can be
//! unit-tested directly and reused by the API crate.

pub mod body;
pub mod document;
