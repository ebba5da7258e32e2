//! Upload queue for the new-project wizard.
//!
//! DESIGN
//! ======
//! Items live in a small arena keyed by a monotonically assigned
//! [`UploadId`]. Each item carries a tagged [`UploadStatus`]; every mutation
//! looks its item up by id, so concurrent completion callbacks can land in
//! any order and a removed item simply stops matching.
//!
//! Lifecycle: `Pending -> Uploading -> Completed | Failed`. Failure is
//! terminal; the user removes the item and selects the file again.

#[cfg(test)]
#[path = "upload_test.rs"]
mod upload_test;

use std::fmt;

use crate::net::types::{GenerateRequest, User};

/// Largest file accepted by any picker (10 MiB).
pub const MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;

/// Extension allow-list plus the messages shown when a file is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AcceptPolicy {
    pub extensions: &'static [&'static str],
    pub too_large: &'static str,
    pub unsupported: &'static str,
}

/// Data files that can seed a new project.
pub const DATA_FILES: AcceptPolicy = AcceptPolicy {
    extensions: &[".csv", ".xlsx", ".json"],
    too_large: "File too large (max 10MB)",
    unsupported: "Unsupported file type (CSV, XLSX, or JSON only)",
};

/// Supporting documents attached to an existing project.
pub const DOCUMENT_FILES: AcceptPolicy = AcceptPolicy {
    extensions: &[".pdf", ".doc", ".docx", ".txt"],
    too_large: "File size must be less than 10MB",
    unsupported: "Unsupported file type (PDF, DOC, DOCX, or TXT only)",
};

impl AcceptPolicy {
    /// Value for an `<input type="file" accept=...>` attribute.
    #[must_use]
    pub fn accept_attr(&self) -> String {
        self.extensions.join(",")
    }

    /// Validate a selected file by name and size.
    ///
    /// # Errors
    ///
    /// Returns the policy's user-facing message when the file is too large
    /// or has an extension outside the allow-list.
    pub fn check(&self, name: &str, size: u64) -> Result<(), &'static str> {
        if size > MAX_FILE_BYTES {
            return Err(self.too_large);
        }
        let lower = name.to_ascii_lowercase();
        if !self.extensions.iter().any(|ext| lower.ends_with(ext)) {
            return Err(self.unsupported);
        }
        Ok(())
    }
}

/// Identifier of one queued upload. Never reused within a queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UploadId(u64);

impl fmt::Display for UploadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "upload-{}", self.0)
    }
}

/// Per-item lifecycle state.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum UploadStatus {
    Pending,
    Uploading { progress: u8 },
    Completed { file_id: String },
    Failed { error: String },
}

impl UploadStatus {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Uploading { .. } => "uploading",
            Self::Completed { .. } => "completed",
            Self::Failed { .. } => "failed",
        }
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed { .. } | Self::Failed { .. })
    }

    /// Progress in percent for the item's progress bar.
    #[must_use]
    pub fn progress(&self) -> u8 {
        match self {
            Self::Pending | Self::Failed { .. } => 0,
            Self::Uploading { progress } => *progress,
            Self::Completed { .. } => 100,
        }
    }
}

/// One file selected for upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadItem {
    pub id: UploadId,
    pub name: String,
    pub size: u64,
    pub status: UploadStatus,
}

/// Why a generate request could not be built.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GenerateBlocked {
    #[error("Authentication required: please sign in to generate a paper.")]
    Unauthenticated,
    #[error("All files must finish uploading before generating.")]
    NotReady,
    #[error("Generation already requested.")]
    AlreadyRequested,
}

/// Message shown when the generate call itself fails.
pub const GENERATION_FAILED: &str = "Generation failed. Please try again.";

/// Client-side list of uploads with per-item status.
#[derive(Clone, Debug, Default)]
pub struct UploadQueue {
    items: Vec<UploadItem>,
    next_id: u64,
    /// Latest selection error (rejected file). Cleared by the next valid pick.
    pub error: Option<String>,
    generate_requested: bool,
}

impl UploadQueue {
    #[must_use]
    pub fn items(&self) -> &[UploadItem] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, id: UploadId) -> Option<&UploadItem> {
        self.items.iter().find(|item| item.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Validate and enqueue a selected file in `Pending`.
    ///
    /// # Errors
    ///
    /// Returns the rejection message (also stored in `error`) without
    /// adding anything when the file fails `policy`.
    pub fn add(&mut self, policy: &AcceptPolicy, name: &str, size: u64) -> Result<UploadId, String> {
        if let Err(msg) = policy.check(name, size) {
            self.error = Some(msg.to_owned());
            return Err(msg.to_owned());
        }
        self.error = None;
        self.next_id += 1;
        let id = UploadId(self.next_id);
        self.items.push(UploadItem { id, name: name.to_owned(), size, status: UploadStatus::Pending });
        Ok(id)
    }

    /// Drop an item in any state. Returns `false` if the id is unknown.
    ///
    /// Removing an in-flight item does not abort the request; its later
    /// completion simply finds nothing to update.
    pub fn remove(&mut self, id: UploadId) -> bool {
        let Some(pos) = self.items.iter().position(|item| item.id == id) else {
            return false;
        };
        self.items.remove(pos);
        true
    }

    /// Submit: move every `Pending` item to `Uploading` and return their ids.
    pub fn begin_all(&mut self) -> Vec<UploadId> {
        let mut started = Vec::new();
        for item in &mut self.items {
            if item.status == UploadStatus::Pending {
                item.status = UploadStatus::Uploading { progress: 0 };
                started.push(item.id);
            }
        }
        started
    }

    /// Update progress of an in-flight item, clamped to 0..=100.
    pub fn set_progress(&mut self, id: UploadId, progress: u8) -> bool {
        match self.find_mut(id) {
            Some(item) if matches!(item.status, UploadStatus::Uploading { .. }) => {
                item.status = UploadStatus::Uploading { progress: progress.min(100) };
                true
            }
            _ => false,
        }
    }

    /// `Uploading -> Completed`. Ignored for unknown or non-uploading items.
    pub fn complete(&mut self, id: UploadId, file_id: String) -> bool {
        match self.find_mut(id) {
            Some(item) if matches!(item.status, UploadStatus::Uploading { .. }) => {
                item.status = UploadStatus::Completed { file_id };
                true
            }
            _ => false,
        }
    }

    /// `Uploading -> Failed`. Ignored for unknown or non-uploading items.
    pub fn fail(&mut self, id: UploadId, error: String) -> bool {
        match self.find_mut(id) {
            Some(item) if matches!(item.status, UploadStatus::Uploading { .. }) => {
                item.status = UploadStatus::Failed { error };
                true
            }
            _ => false,
        }
    }

    /// Any item still waiting to be submitted.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.items.iter().any(|item| item.status == UploadStatus::Pending)
    }

    /// Any request still in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.items
            .iter()
            .any(|item| matches!(item.status, UploadStatus::Uploading { .. }))
    }

    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| matches!(item.status, UploadStatus::Failed { .. }))
            .count()
    }

    /// Submit is allowed when there is something pending, nothing in
    /// flight and nothing failed.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.has_pending() && !self.is_busy() && self.failed_count() == 0
    }

    /// Generate is allowed iff the queue is non-empty and every item completed.
    #[must_use]
    pub fn can_generate(&self) -> bool {
        !self.items.is_empty()
            && self
                .items
                .iter()
                .all(|item| matches!(item.status, UploadStatus::Completed { .. }))
    }

    #[must_use]
    pub fn generate_requested(&self) -> bool {
        self.generate_requested
    }

    /// File ids of completed items, in queue order.
    #[must_use]
    pub fn completed_file_ids(&self) -> Vec<String> {
        self.items
            .iter()
            .filter_map(|item| match &item.status {
                UploadStatus::Completed { file_id } => Some(file_id.clone()),
                _ => None,
            })
            .collect()
    }

    /// One summary line when any upload failed.
    #[must_use]
    pub fn aggregate_error(&self) -> Option<String> {
        match self.failed_count() {
            0 => None,
            1 => Some("1 upload failed. Remove it and add the file again.".to_owned()),
            n => Some(format!("{n} uploads failed. Remove them and add the files again.")),
        }
    }

    /// Build the single generate request for this queue.
    ///
    /// Authentication is checked first so an anonymous session never gets
    /// as far as a request. Both success and a signed-out attempt latch the
    /// queue until [`Self::reset_generation`].
    ///
    /// # Errors
    ///
    /// Returns [`GenerateBlocked`] when signed out, when uploads are not all
    /// completed, or when generation was already requested.
    pub fn prepare_generate(&mut self, user: Option<&User>) -> Result<GenerateRequest, GenerateBlocked> {
        let Some(user) = user else {
            // Latch like a failed attempt; only an explicit retry re-arms.
            self.generate_requested = true;
            return Err(GenerateBlocked::Unauthenticated);
        };
        if !self.can_generate() {
            return Err(GenerateBlocked::NotReady);
        }
        if self.generate_requested {
            return Err(GenerateBlocked::AlreadyRequested);
        }
        self.generate_requested = true;
        Ok(GenerateRequest {
            user_id: user.id.clone(),
            project_id: uuid::Uuid::new_v4().to_string(),
            file_ids: self.completed_file_ids(),
        })
    }

    /// Allow another generate attempt after a failed one.
    pub fn reset_generation(&mut self) {
        self.generate_requested = false;
    }

    fn find_mut(&mut self, id: UploadId) -> Option<&mut UploadItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }
}

/// Human-readable size such as `"2.0 MB"` or `"512 KB"`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_size(bytes: u64) -> String {
    const MB: f64 = 1024.0 * 1024.0;
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / MB)
    } else {
        format!("{} KB", bytes.div_ceil(1024))
    }
}
