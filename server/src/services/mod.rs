//! Clients for the two remote services the server fronts.
//!
//! ARCHITECTURE
//! ============
//! Each service sits behind an `async_trait` so route handlers can be
//! exercised against in-process mocks; the HTTP implementations only
//! translate requests and parse responses.

pub mod auth;
pub mod backend;
