//! Networking modules for the same-origin REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` issues every HTTP call the UI makes, and `types` defines the wire
//! schema shared with the `server` crate.

pub mod api;
pub mod types;
