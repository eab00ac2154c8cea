//! Download cap enforcement.
//!
//! The check and the later increment are separate steps. Concurrent
//! downloads of one share may each pass the check and overshoot the cap
//! slightly; callers wanting a hard cap need a conditional increment in the
//! store.

use sharehub_core::error::{AppError, ErrorKind};
use sharehub_entity::share::UNLIMITED_DOWNLOADS;

/// Authorizes one more download against a cap.
#[derive(Debug, Clone, Copy, Default)]
pub struct DownloadCounter;

impl DownloadCounter {
    /// Fails with `DownloadLimitExceeded` when `current + 1 > max`, unless
    /// `max` is [`UNLIMITED_DOWNLOADS`].
    pub fn authorize(current: i64, max: i64) -> Result<(), AppError> {
        if max == UNLIMITED_DOWNLOADS {
            return Ok(());
        }
        if current.saturating_add(1) > max {
            return Err(AppError::new(
                ErrorKind::DownloadLimitExceeded,
                format!("Download limit reached: {current} of {max} downloads used"),
            ));
        }
        Ok(())
    }
}
