//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by view (`auth`, `upload`, `chat`, `paper`, ...) so each
//! component depends on a small focused model. Every model is a plain
//! struct so it can be unit-tested natively without a browser.

pub mod auth;
pub mod chat;
pub mod documents;
pub mod paper;
pub mod projects;
pub mod upload;
