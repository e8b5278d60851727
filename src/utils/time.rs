//! Wall-clock helpers for header timestamps.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{ProtocolError, Result};

/// Current time in milliseconds since the Unix epoch.
///
/// # Errors
/// Returns `ProtocolError::Clock` if the system time is earlier than UNIX_EPOCH
pub fn now_millis() -> Result<u64> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_millis() as u64)
        .map_err(|_| ProtocolError::Clock)
}

/// Age of an epoch-millisecond timestamp relative to now, saturating at zero
/// for timestamps in the future.
pub fn age_millis(timestamp: u64) -> Result<u64> {
    Ok(now_millis()?.saturating_sub(timestamp))
}
