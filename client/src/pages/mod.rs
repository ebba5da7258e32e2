//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (auth guard, remote calls,
//! navigation) and delegates rendering details to `components`.

pub mod account;
pub mod dashboard;
pub mod login;
pub mod new_project;
pub mod project;
