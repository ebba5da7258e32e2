//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns (storage, clock,
//! downloads) from page and component logic to improve reuse and
//! testability.

pub mod auth;
pub mod client_id;
pub mod download;
pub mod markdown;
pub mod storage;
pub mod time;
