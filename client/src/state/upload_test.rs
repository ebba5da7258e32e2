use super::*;

const MB: u64 = 1024 * 1024;

fn user() -> User {
    User { id: "user-1".to_owned(), email: None }
}

fn queue_with(names: &[&str]) -> (UploadQueue, Vec<UploadId>) {
    let mut queue = UploadQueue::default();
    let ids = names
        .iter()
        .map(|name| queue.add(&DATA_FILES, name, MB).unwrap())
        .collect();
    (queue, ids)
}

// =============================================================
// AcceptPolicy
// =============================================================

#[test]
fn data_policy_accepts_listed_extensions_case_insensitively() {
    assert_eq!(DATA_FILES.check("results.CSV", 10), Ok(()));
    assert_eq!(DATA_FILES.check("sheet.xlsx", 10), Ok(()));
    assert_eq!(DATA_FILES.check("data.json", 10), Ok(()));
    assert_eq!(DATA_FILES.check("notes.txt", 10), Err(DATA_FILES.unsupported));
}

#[test]
fn policy_allows_exactly_ten_megabytes() {
    assert_eq!(DATA_FILES.check("a.csv", MAX_FILE_BYTES), Ok(()));
    assert_eq!(DATA_FILES.check("a.csv", MAX_FILE_BYTES + 1), Err("File too large (max 10MB)"));
}

#[test]
fn document_policy_has_its_own_messages() {
    assert_eq!(DOCUMENT_FILES.check("paper.docx", 1), Ok(()));
    assert_eq!(DOCUMENT_FILES.check("big.pdf", 11 * MB), Err("File size must be less than 10MB"));
    assert_eq!(DOCUMENT_FILES.accept_attr(), ".pdf,.doc,.docx,.txt");
}

// =============================================================
// Adding and removing
// =============================================================

#[test]
fn valid_file_starts_pending() {
    let (queue, ids) = queue_with(&["a.csv"]);
    let item = queue.get(ids[0]).unwrap();
    assert_eq!(item.status, UploadStatus::Pending);
    assert_eq!(item.status.progress(), 0);
    assert!(queue.error.is_none());
}

#[test]
fn oversized_file_is_not_added_and_sets_single_error() {
    let mut queue = UploadQueue::default();
    let result = queue.add(&DATA_FILES, "huge.csv", 11 * MB);
    assert_eq!(result, Err("File too large (max 10MB)".to_owned()));
    assert!(queue.is_empty());
    assert_eq!(queue.error.as_deref(), Some("File too large (max 10MB)"));
}

#[test]
fn valid_pick_clears_previous_selection_error() {
    let mut queue = UploadQueue::default();
    let _ = queue.add(&DATA_FILES, "huge.csv", 11 * MB);
    queue.add(&DATA_FILES, "ok.csv", MB).unwrap();
    assert!(queue.error.is_none());
}

#[test]
fn ids_are_unique_even_after_removal() {
    let (mut queue, ids) = queue_with(&["a.csv", "b.csv"]);
    assert!(queue.remove(ids[1]));
    let next = queue.add(&DATA_FILES, "c.csv", MB).unwrap();
    assert!(!ids.contains(&next));
}

#[test]
fn remove_takes_exactly_one_entry_and_leaves_others_untouched() {
    let (mut queue, ids) = queue_with(&["a.csv", "b.csv", "c.csv"]);
    queue.begin_all();
    queue.complete(ids[0], "f-a".to_owned());
    let before_a = queue.get(ids[0]).cloned();
    let before_c = queue.get(ids[2]).cloned();

    assert!(queue.remove(ids[1]));
    assert_eq!(queue.len(), 2);
    assert!(queue.get(ids[1]).is_none());
    assert_eq!(queue.get(ids[0]).cloned(), before_a);
    assert_eq!(queue.get(ids[2]).cloned(), before_c);
}

#[test]
fn remove_unknown_id_is_a_no_op() {
    let (mut queue, ids) = queue_with(&["a.csv"]);
    assert!(queue.remove(ids[0]));
    assert!(!queue.remove(ids[0]));
    assert!(queue.is_empty());
}

#[test]
fn completion_after_removal_is_ignored() {
    let (mut queue, ids) = queue_with(&["a.csv", "b.csv"]);
    queue.begin_all();
    queue.remove(ids[0]);
    assert!(!queue.complete(ids[0], "late".to_owned()));
    assert!(!queue.fail(ids[0], "late".to_owned()));
    assert_eq!(queue.len(), 1);
}

// =============================================================
// Transitions
// =============================================================

#[test]
fn begin_all_only_starts_pending_items() {
    let (mut queue, ids) = queue_with(&["a.csv", "b.csv"]);
    assert_eq!(queue.begin_all(), ids);
    assert!(queue.begin_all().is_empty());
    assert!(queue.is_busy());
}

#[test]
fn single_csv_upload_completes_at_full_progress() {
    let mut queue = UploadQueue::default();
    let id = queue.add(&DATA_FILES, "trial.csv", 2 * MB).unwrap();
    queue.begin_all();
    assert!(queue.complete(id, "file-1".to_owned()));

    assert_eq!(queue.len(), 1);
    let item = queue.get(id).unwrap();
    assert_eq!(item.status.label(), "completed");
    assert_eq!(item.status.progress(), 100);
}

#[test]
fn every_submitted_item_reaches_exactly_one_terminal_state() {
    let (mut queue, ids) = queue_with(&["a.csv", "b.json", "c.xlsx", "d.csv"]);
    queue.begin_all();
    for (i, id) in ids.iter().enumerate() {
        if i % 2 == 0 {
            assert!(queue.complete(*id, format!("f-{i}")));
        } else {
            assert!(queue.fail(*id, "boom".to_owned()));
        }
        // A second resolution must not flip the outcome.
        assert!(!queue.complete(*id, "again".to_owned()));
        assert!(!queue.fail(*id, "again".to_owned()));
    }
    assert!(queue.items().iter().all(|item| item.status.is_terminal()));
    assert_eq!(queue.failed_count(), 2);
}

#[test]
fn pending_items_cannot_complete_without_submit() {
    let (mut queue, ids) = queue_with(&["a.csv"]);
    assert!(!queue.complete(ids[0], "f".to_owned()));
    assert_eq!(queue.get(ids[0]).unwrap().status, UploadStatus::Pending);
}

#[test]
fn set_progress_clamps_and_requires_uploading() {
    let (mut queue, ids) = queue_with(&["a.csv"]);
    assert!(!queue.set_progress(ids[0], 40));
    queue.begin_all();
    assert!(queue.set_progress(ids[0], 250));
    assert_eq!(queue.get(ids[0]).unwrap().status.progress(), 100);
}

// =============================================================
// Generate gating
// =============================================================

#[test]
fn empty_queue_cannot_generate() {
    assert!(!UploadQueue::default().can_generate());
}

#[test]
fn generate_requires_every_item_completed() {
    let (mut queue, ids) = queue_with(&["a.csv", "b.csv"]);
    assert!(!queue.can_generate());
    queue.begin_all();
    queue.complete(ids[0], "f-a".to_owned());
    assert!(!queue.can_generate());
    queue.complete(ids[1], "f-b".to_owned());
    assert!(queue.can_generate());
}

#[test]
fn any_failure_blocks_generate_and_reports_aggregate() {
    let (mut queue, ids) = queue_with(&["a.csv", "b.csv"]);
    queue.begin_all();
    queue.complete(ids[0], "f-a".to_owned());
    queue.fail(ids[1], "network".to_owned());
    assert!(!queue.can_generate());
    assert!(!queue.can_submit());
    assert_eq!(queue.aggregate_error().as_deref(), Some("1 upload failed. Remove it and add the file again."));

    queue.remove(ids[1]);
    assert!(queue.can_generate());
    assert!(queue.aggregate_error().is_none());
}

#[test]
fn unauthenticated_generate_builds_no_request() {
    let (mut queue, ids) = queue_with(&["a.csv"]);
    queue.begin_all();
    queue.complete(ids[0], "f-a".to_owned());

    let err = queue.prepare_generate(None).unwrap_err();
    assert_eq!(err, GenerateBlocked::Unauthenticated);
    assert!(err.to_string().contains("Authentication"));
}

#[test]
fn signed_out_attempt_latches_until_retry() {
    let (mut queue, ids) = queue_with(&["a.csv"]);
    queue.begin_all();
    queue.complete(ids[0], "f-a".to_owned());

    assert_eq!(queue.prepare_generate(None), Err(GenerateBlocked::Unauthenticated));
    assert!(queue.generate_requested());
    assert!(queue.can_generate() && queue.generate_requested());
    assert_eq!(queue.prepare_generate(None), Err(GenerateBlocked::AlreadyRequested));

    queue.reset_generation();
    assert!(queue.prepare_generate(Some(&user())).is_ok());
}

#[test]
fn generate_request_bundles_user_project_and_files_once() {
    let (mut queue, ids) = queue_with(&["a.csv", "b.csv"]);
    queue.begin_all();
    queue.complete(ids[0], "f-a".to_owned());
    queue.complete(ids[1], "f-b".to_owned());

    let req = queue.prepare_generate(Some(&user())).unwrap();
    assert_eq!(req.user_id, "user-1");
    assert!(uuid::Uuid::parse_str(&req.project_id).is_ok());
    assert_eq!(req.file_ids, vec!["f-a".to_owned(), "f-b".to_owned()]);

    assert_eq!(queue.prepare_generate(Some(&user())), Err(GenerateBlocked::AlreadyRequested));
    queue.reset_generation();
    assert!(queue.prepare_generate(Some(&user())).is_ok());
}

#[test]
fn generate_before_completion_is_not_ready() {
    let (mut queue, _) = queue_with(&["a.csv"]);
    assert_eq!(queue.prepare_generate(Some(&user())), Err(GenerateBlocked::NotReady));
}

// =============================================================
// format_size
// =============================================================

#[test]
fn format_size_uses_megabytes_with_one_decimal() {
    assert_eq!(format_size(2 * MB), "2.0 MB");
    assert_eq!(format_size(2_516_582), "2.4 MB");
    assert_eq!(format_size(1500), "2 KB");
}
