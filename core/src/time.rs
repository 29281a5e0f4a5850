//! Time related utils.

use chrono::Utc;

/// The time used across the workspace, UTC with second precision being the
/// finest anything here cares about.
pub type DateTime = chrono::DateTime<Utc>;

/// Return the current time.
pub fn now() -> DateTime {
    Utc::now()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_is_unix_epoch_based() {
        assert!(now().timestamp() > 1_500_000_000);
    }
}
