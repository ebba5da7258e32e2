use super::*;

const MB: u64 = 1024 * 1024;

#[test]
fn seeded_list_holds_the_research_paper() {
    let state = DocumentsState::seeded("1/2/2026");
    assert_eq!(state.items.len(), 1);
    let doc = &state.items[0];
    assert_eq!(doc.name, "Research Paper.pdf");
    assert_eq!(doc.kind, DocumentKind::Research);
    assert_eq!(doc.size, "2.4 MB");
    assert_eq!(doc.upload_date, "1/2/2026");
}

#[test]
fn oversized_document_is_rejected_without_busy_flag() {
    let mut state = DocumentsState::seeded("today");
    let err = state.begin_upload("big.pdf", 10 * MB + 1).unwrap_err();
    assert_eq!(err, "File size must be less than 10MB");
    assert_eq!(state.error.as_deref(), Some("File size must be less than 10MB"));
    assert!(!state.uploading);
    assert_eq!(state.items.len(), 1);
}

#[test]
fn upload_adds_supplementary_document() {
    let mut state = DocumentsState::seeded("today");
    state.begin_upload("notes.txt", 3 * MB).unwrap();
    assert!(state.uploading);
    let id = state.finish_upload("notes.txt", 3 * MB, "today");
    assert!(!state.uploading);
    let doc = state.items.iter().find(|d| d.id == id).unwrap();
    assert_eq!(doc.kind, DocumentKind::Supplementary);
    assert_eq!(doc.size, "3.0 MB");
}

#[test]
fn concurrent_upload_is_refused() {
    let mut state = DocumentsState::default();
    state.begin_upload("a.pdf", MB).unwrap();
    assert!(state.begin_upload("b.pdf", MB).is_err());
}

#[test]
fn unsupported_document_type_is_rejected() {
    let mut state = DocumentsState::default();
    let err = state.begin_upload("data.csv", MB).unwrap_err();
    assert_eq!(err, "Unsupported file type (PDF, DOC, DOCX, or TXT only)");
    assert!(state.items.is_empty());
}

#[test]
fn next_valid_pick_clears_error() {
    let mut state = DocumentsState::default();
    let _ = state.begin_upload("data.csv", MB);
    state.begin_upload("paper.PDF", MB).unwrap();
    assert!(state.error.is_none());
}

#[test]
fn only_supplementary_documents_can_be_deleted() {
    let mut state = DocumentsState::seeded("today");
    assert!(!state.remove("1"));
    state.begin_upload("extra.doc", MB).unwrap();
    let id = state.finish_upload("extra.doc", MB, "today");
    assert!(state.remove(&id));
    assert_eq!(state.items.len(), 1);
    assert!(!state.remove(&id));
}

#[test]
fn format_megabytes_keeps_one_decimal() {
    assert_eq!(format_megabytes(0), "0.0 MB");
    assert_eq!(format_megabytes(MB + MB / 2), "1.5 MB");
}
