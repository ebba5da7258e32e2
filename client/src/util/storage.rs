//! Browser localStorage helpers for the generation handoff and the
//! recent-projects list.
//!
//! SYSTEM CONTEXT
//! ==============
//! The new-project page writes the last generation result here right before
//! navigating to the project page, which reads it back. Nothing else is
//! persisted in the browser; all other state is view-local.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::net::types::{GenerateResponse, Hypothesis};
use crate::state::projects::RecentProjects;

/// Hypothesis cards from the last generation.
pub const GENERATED_HYPOTHESES_KEY: &str = "generatedHypotheses";
/// LaTeX source from the last generation.
pub const PROCESSED_CONTENT_KEY: &str = "processedContent";
/// Paper id from the last generation.
pub const CURRENT_PAPER_ID_KEY: &str = "currentPaperId";
/// Dashboard project list.
pub const RECENT_PROJECTS_KEY: &str = "recentProjects";

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

/// Load a raw string from `localStorage` for `key`.
pub fn load_string(key: &str) -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        local_storage()?.get_item(key).ok().flatten()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = key;
        None
    }
}

/// Save a raw string to `localStorage` for `key`.
pub fn save_string(key: &str, value: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(storage) = local_storage() {
            if let Err(e) = storage.set_item(key, value) {
                log::warn!("localStorage write failed for {key}: {e:?}");
            }
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (key, value);
    }
}

/// Load a JSON value from `localStorage` for `key`.
pub fn load_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    let raw = load_string(key)?;
    serde_json::from_str(&raw).ok()
}

/// Save a JSON value to `localStorage` for `key`.
pub fn save_json<T: Serialize>(key: &str, value: &T) {
    if let Ok(raw) = serde_json::to_string(value) {
        save_string(key, &raw);
    }
}

/// Cache a generation result for the project page.
pub fn store_generation(result: &GenerateResponse) {
    save_json(GENERATED_HYPOTHESES_KEY, &result.hypotheses);
    save_string(PROCESSED_CONTENT_KEY, result.latex.as_deref().unwrap_or_default());
    save_string(CURRENT_PAPER_ID_KEY, &result.paper_id);
}

/// Cached hypotheses and LaTeX source from the last generation.
pub fn load_generation() -> (Option<Vec<Hypothesis>>, Option<String>) {
    (load_json(GENERATED_HYPOTHESES_KEY), load_string(PROCESSED_CONTENT_KEY))
}

pub fn load_recent_projects() -> RecentProjects {
    load_json(RECENT_PROJECTS_KEY).unwrap_or_default()
}

/// Move `id` to the front of the dashboard list and persist it.
pub fn record_recent_project(id: &str, title: Option<&str>, today: &str) -> RecentProjects {
    let mut recent = load_recent_projects();
    recent.touch(id, title, today);
    save_json(RECENT_PROJECTS_KEY, &recent);
    recent
}
