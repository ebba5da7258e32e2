//! Hypothesis selection and research paper state for the project workspace.
//!
//! DESIGN
//! ======
//! Card numbers are 1-based (`#1`..`#n`) because they double as the
//! backend's `selectionId`. A fetch is tagged with the selection it was
//! issued for so a slow response for an older card cannot overwrite the
//! paper of the card the user picked afterwards.

#[cfg(test)]
#[path = "paper_test.rs"]
mod paper_test;

use crate::net::types::Hypothesis;

/// Tabs of the research paper panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PaperTab {
    Selections,
    #[default]
    Research,
    Documents,
}

impl PaperTab {
    pub const ALL: [Self; 3] = [Self::Selections, Self::Research, Self::Documents];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Selections => "Selections",
            Self::Research => "Research",
            Self::Documents => "Documents",
        }
    }
}

/// What the Research tab currently shows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum PaperContent {
    #[default]
    Idle,
    Loading,
    Loaded(String),
    Failed(String),
}

/// Card shown when no generation result is cached.
const PLACEHOLDER_BODY: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Sed do eiusmod tempor \
                                incididunt ut labore et dolore magna aliqua.";

/// Six placeholder cards used before any generation has run.
#[must_use]
pub fn placeholder_hypotheses() -> Vec<Hypothesis> {
    (1..=6)
        .map(|n| Hypothesis { title: format!("Option {n}"), description: PLACEHOLDER_BODY.to_owned() })
        .collect()
}

/// Text shown for a successfully fetched paper.
#[must_use]
pub fn research_text(selection: u32, paper: &str) -> String {
    format!("In-depth analysis for Selection #{selection}:\n\n{paper}")
}

/// Text shown when the paper fetch fails.
#[must_use]
pub fn research_failure_text(selection: u32) -> String {
    format!("Failed to load research for Selection #{selection}.")
}

/// State of the research paper panel.
#[derive(Clone, Debug, Default)]
pub struct PaperState {
    pub tab: PaperTab,
    pub hypotheses: Vec<Hypothesis>,
    pub expanded: Option<u32>,
    pub selected: Option<u32>,
    pub content: PaperContent,
    /// LaTeX source cached from the last generation, if any.
    pub latex: Option<String>,
    requested_for: Option<u32>,
}

impl PaperState {
    /// Build the panel from the generation cache, falling back to placeholders.
    #[must_use]
    pub fn from_cache(hypotheses: Option<Vec<Hypothesis>>, latex: Option<String>) -> Self {
        let hypotheses = hypotheses
            .filter(|h| !h.is_empty())
            .unwrap_or_else(placeholder_hypotheses);
        Self { hypotheses, latex: latex.filter(|l| !l.trim().is_empty()), ..Self::default() }
    }

    /// Switch tabs. Coming back to Research fetches the paper again.
    pub fn set_tab(&mut self, tab: PaperTab) {
        if tab == PaperTab::Research && self.tab != PaperTab::Research {
            self.requested_for = None;
        }
        self.tab = tab;
    }

    /// Select card `card` (1-based). Out-of-range numbers are ignored.
    pub fn select(&mut self, card: u32) -> bool {
        if !self.has_card(card) {
            return false;
        }
        if self.selected != Some(card) {
            self.selected = Some(card);
            self.content = PaperContent::Idle;
            self.requested_for = None;
        }
        true
    }

    /// Expand card `card`, or collapse it if it is already expanded.
    pub fn toggle_expand(&mut self, card: u32) {
        if !self.has_card(card) {
            return;
        }
        self.expanded = if self.expanded == Some(card) { None } else { Some(card) };
    }

    /// Selection whose paper should be fetched now, if any.
    ///
    /// Only while the Research tab is active, and only once per selection
    /// and visit of the tab. A failed fetch is not retried.
    #[must_use]
    pub fn fetch_target(&self) -> Option<u32> {
        if self.tab != PaperTab::Research {
            return None;
        }
        let selected = self.selected?;
        (self.requested_for != Some(selected)).then_some(selected)
    }

    pub fn begin_fetch(&mut self, selection: u32) {
        self.requested_for = Some(selection);
        self.content = PaperContent::Loading;
    }

    /// Apply a fetch result. Stale results for an older selection are dropped.
    pub fn finish_fetch(&mut self, selection: u32, result: Result<String, String>) -> bool {
        if self.selected != Some(selection) {
            return false;
        }
        self.content = match result {
            Ok(paper) => PaperContent::Loaded(research_text(selection, &paper)),
            Err(_) => PaperContent::Failed(research_failure_text(selection)),
        };
        true
    }

    fn has_card(&self, card: u32) -> bool {
        card >= 1 && usize::try_from(card).is_ok_and(|c| c <= self.hypotheses.len())
    }
}
