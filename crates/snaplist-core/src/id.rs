use chrono::Utc;
use rand::{distr::Alphanumeric, Rng};

const ID_PREFIX: &str = "listing";
const SUFFIX_LEN: usize = 8;

/// Current wall-clock time in epoch milliseconds.
#[must_use]
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Generates a fresh listing id: `listing_<epoch-ms>_<8 alphanumerics>`.
///
/// The random suffix keeps ids distinct when many are generated within the
/// same millisecond.
#[must_use]
pub fn generate_listing_id() -> String {
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(SUFFIX_LEN)
        .map(char::from)
        .collect();
    format!("{ID_PREFIX}_{}_{suffix}", now_millis())
}
