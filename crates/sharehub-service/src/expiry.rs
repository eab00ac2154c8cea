//! Expiry evaluation for shares and other time-bounded records.

use chrono::{DateTime, Utc};

/// Decides whether an expiration instant has passed.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpiryEvaluator;

impl ExpiryEvaluator {
    /// Returns whether `expires_at` has passed as of now.
    ///
    /// An unset instant never expires.
    pub fn is_expired(expires_at: Option<DateTime<Utc>>) -> bool {
        Self::is_expired_at(expires_at, Utc::now())
    }

    /// Returns whether `expires_at` has passed as of `now`.
    ///
    /// Strictly after: a record whose instant equals `now` is still live.
    pub fn is_expired_at(expires_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
        match expires_at {
            Some(at) => now > at,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn test_unset_never_expires() {
        assert!(!ExpiryEvaluator::is_expired(None));
        assert!(!ExpiryEvaluator::is_expired_at(None, DateTime::<Utc>::MAX_UTC));
    }

    #[test]
    fn test_one_second_either_side() {
        assert!(ExpiryEvaluator::is_expired(Some(Utc::now() - Duration::seconds(1))));
        assert!(!ExpiryEvaluator::is_expired(Some(Utc::now() + Duration::seconds(1))));
    }

    #[test]
    fn test_boundary_is_not_expired() {
        let now = Utc::now();
        assert!(!ExpiryEvaluator::is_expired_at(Some(now), now));
        assert!(ExpiryEvaluator::is_expired_at(
            Some(now),
            now + Duration::nanoseconds(1)
        ));
    }
}
