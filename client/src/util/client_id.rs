//! Client identifiers attached to new accounts as sign-up metadata.
//!
//! Format: `CLT-<base36 milliseconds>-<6 base36 characters>`, upper-cased.

#[cfg(test)]
#[path = "client_id_test.rs"]
mod client_id_test;

const SUFFIX_LEN: usize = 6;
const SUFFIX_SPACE: u64 = 36_u64.pow(6);

fn base36(mut value: u64) -> String {
    let mut digits = Vec::new();
    loop {
        let digit = u32::try_from(value % 36).ok().and_then(|d| char::from_digit(d, 36));
        digits.push(digit.unwrap_or('0'));
        value /= 36;
        if value == 0 {
            break;
        }
    }
    digits.iter().rev().collect()
}

/// Format a client id from a millisecond timestamp and random bits.
#[must_use]
pub fn format_client_id(timestamp_ms: u64, entropy: u64) -> String {
    let suffix = format!("{:0>width$}", base36(entropy % SUFFIX_SPACE), width = SUFFIX_LEN);
    format!("CLT-{}-{}", base36(timestamp_ms), suffix).to_uppercase()
}

/// Generate a fresh client id for the current time.
#[must_use]
pub fn new_client_id() -> String {
    let entropy = uuid::Uuid::new_v4().as_u64_pair().0;
    format_client_id(super::time::now_ms_u64(), entropy)
}
