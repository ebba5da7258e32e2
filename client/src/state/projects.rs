//! Recently opened projects for the dashboard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Persisted to browser local storage under `recentProjects` by the pages
//! that open or create a project; the dashboard only reads it.

#[cfg(test)]
#[path = "projects_test.rs"]
mod projects_test;

use serde::{Deserialize, Serialize};

/// Maximum number of projects kept on the dashboard.
pub const MAX_RECENT_PROJECTS: usize = 12;

/// Gradient pairs for project folder icons.
pub const PALETTE: [(&str, &str); 6] = [
    ("#60a5fa", "#2563eb"),
    ("#f472b6", "#db2777"),
    ("#34d399", "#059669"),
    ("#fbbf24", "#d97706"),
    ("#a78bfa", "#7c3aed"),
    ("#f87171", "#dc2626"),
];

/// Dashboard card data for one project.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub id: String,
    pub title: String,
    pub last_opened: String,
}

impl ProjectSummary {
    /// Stable palette entry derived from the project id.
    #[must_use]
    pub fn gradient(&self) -> (&'static str, &'static str) {
        let sum = self
            .id
            .bytes()
            .fold(0_usize, |acc, b| acc.wrapping_mul(31).wrapping_add(usize::from(b)));
        PALETTE[sum % PALETTE.len()]
    }

    /// Unique SVG gradient element id for this card.
    #[must_use]
    pub fn gradient_id(&self) -> String {
        format!("project-gradient-{}", self.id)
    }
}

/// Default title for a project created from uploaded files.
#[must_use]
pub fn title_for_upload(file_names: &[String]) -> String {
    match file_names {
        [] => "Untitled Project".to_owned(),
        [only] => strip_extension(only).to_owned(),
        [first, rest @ ..] => format!("{} +{}", strip_extension(first), rest.len()),
    }
}

fn strip_extension(name: &str) -> &str {
    name.rsplit_once('.')
        .map_or(name, |(stem, _)| if stem.is_empty() { name } else { stem })
}

/// Most-recent-first project list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentProjects {
    pub items: Vec<ProjectSummary>,
}

impl RecentProjects {
    /// Record that a project was opened, moving it to the front.
    ///
    /// An existing entry keeps its title when `title` is `None`.
    pub fn touch(&mut self, id: &str, title: Option<&str>, today: &str) {
        let existing = self
            .items
            .iter()
            .position(|p| p.id == id)
            .map(|pos| self.items.remove(pos));
        let title = title
            .map(str::to_owned)
            .or_else(|| existing.map(|p| p.title))
            .unwrap_or_else(|| format!("Project {}", short_id(id)));
        self.items.insert(0, ProjectSummary { id: id.to_owned(), title, last_opened: today.to_owned() });
        self.items.truncate(MAX_RECENT_PROJECTS);
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ProjectSummary> {
        self.items.iter().find(|p| p.id == id)
    }
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}
