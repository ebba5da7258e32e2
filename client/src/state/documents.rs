//! Document list state for the Documents tab.
//!
//! The list is view-local: uploads are simulated and download/delete act
//! on this state only, so an accepted upload cannot fail.

#[cfg(test)]
#[path = "documents_test.rs"]
mod documents_test;

use super::upload::DOCUMENT_FILES;

/// Whether a document is the generated paper or a user-supplied attachment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentKind {
    Research,
    Supplementary,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentItem {
    pub id: String,
    pub name: String,
    pub kind: DocumentKind,
    pub upload_date: String,
    pub size: String,
}

/// Body of the placeholder file produced by "Download".
pub const SIMULATED_DOWNLOAD_BODY: &str = "This is a simulated file download";

/// Size label in megabytes with one decimal, e.g. `"0.3 MB"`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_megabytes(bytes: u64) -> String {
    format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
}

#[derive(Clone, Debug, Default)]
pub struct DocumentsState {
    pub items: Vec<DocumentItem>,
    pub uploading: bool,
    pub error: Option<String>,
}

impl DocumentsState {
    /// Initial list: the project's research paper.
    #[must_use]
    pub fn seeded(today: &str) -> Self {
        Self {
            items: vec![DocumentItem {
                id: "1".to_owned(),
                name: "Research Paper.pdf".to_owned(),
                kind: DocumentKind::Research,
                upload_date: today.to_owned(),
                size: "2.4 MB".to_owned(),
            }],
            ..Self::default()
        }
    }

    /// Validate a picked file and mark an upload in progress.
    ///
    /// # Errors
    ///
    /// Returns (and stores) the rejection message; nothing is marked busy.
    pub fn begin_upload(&mut self, name: &str, size: u64) -> Result<(), String> {
        if self.uploading {
            return Err("An upload is already in progress".to_owned());
        }
        if let Err(msg) = DOCUMENT_FILES.check(name, size) {
            self.error = Some(msg.to_owned());
            return Err(msg.to_owned());
        }
        self.error = None;
        self.uploading = true;
        Ok(())
    }

    /// Add the uploaded file as a supplementary document.
    pub fn finish_upload(&mut self, name: &str, size: u64, today: &str) -> String {
        let id = uuid::Uuid::new_v4().simple().to_string()[..9].to_owned();
        self.items.push(DocumentItem {
            id: id.clone(),
            name: name.to_owned(),
            kind: DocumentKind::Supplementary,
            upload_date: today.to_owned(),
            size: format_megabytes(size),
        });
        self.uploading = false;
        id
    }

    /// Delete a supplementary document. Research documents cannot be deleted.
    pub fn remove(&mut self, id: &str) -> bool {
        let Some(pos) = self
            .items
            .iter()
            .position(|d| d.id == id && d.kind == DocumentKind::Supplementary)
        else {
            return false;
        };
        self.items.remove(pos);
        true
    }
}
