use super::*;

#[test]
fn base36_encodes_digits_and_letters() {
    assert_eq!(base36(0), "0");
    assert_eq!(base36(35), "z");
    assert_eq!(base36(36), "10");
}

#[test]
fn client_id_has_prefix_timestamp_and_padded_suffix() {
    assert_eq!(format_client_id(36, 1), "CLT-10-000001");
}

#[test]
fn client_id_is_upper_case_and_suffix_is_six_chars() {
    let id = format_client_id(1_700_000_000_000, u64::MAX);
    assert_eq!(id, id.to_uppercase());
    let parts: Vec<&str> = id.split('-').collect();
    assert_eq!(parts.len(), 3);
    assert_eq!(parts[0], "CLT");
    assert_eq!(parts[2].len(), 6);
    assert!(parts[1].chars().all(|c| c.is_ascii_alphanumeric()));
}

#[test]
fn new_client_ids_differ() {
    assert_ne!(new_client_id(), new_client_id());
}
