//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render page chrome and the project workspace panels while
//! reading/writing shared state from Leptos context providers.

pub mod chat_panel;
pub mod documents_panel;
pub mod download_button;
pub mod navbar;
pub mod new_project_button;
pub mod project_card;
pub mod research_paper_panel;
pub mod upload_list;
