//! Subject key normalization and masking
//!
//! Subject keys are US-style 10-digit phone numbers. Human-formatted input
//! (`+1 (555) 123-4567`) is normalized to the canonical digit string used
//! as the store key.

use once_cell::sync::Lazy;
use regex::Regex;

/// Canonical subject key: exactly 10 digits
static SUBJECT_KEY_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{10}$").unwrap());

/// Normalizes a raw phone number into a canonical subject key.
///
/// Strips every non-digit character, drops a leading `1` country code on an
/// 11-digit number, and requires exactly 10 digits to remain.
///
/// # Returns
///
/// `Some(key)` with the canonical 10-digit key, or `None` if the input
/// cannot be normalized.
pub fn normalize_subject_key(raw: &str) -> Option<String> {
    let mut digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.len() == 11 && digits.starts_with('1') {
        digits.remove(0);
    }

    if SUBJECT_KEY_REGEX.is_match(&digits) {
        Some(digits)
    } else {
        None
    }
}

/// Masks a subject key for logging, keeping only the last four characters.
///
/// Counts characters rather than bytes: the masked value may be a raw,
/// unvalidated subject (the `InvalidKey` paths), and a byte slice could
/// split a multibyte character.
pub fn mask_subject_key(key: &str) -> String {
    let chars = key.chars().count();
    if chars <= 4 {
        "****".to_string()
    } else {
        let suffix: String = key.chars().skip(chars - 4).collect();
        format!("***{}", suffix)
    }
}
