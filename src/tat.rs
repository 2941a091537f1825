//! Turnaround-time (TAT) compliance policy.

/// Default turnaround target: 4 hours.
pub const DEFAULT_TARGET_SECONDS: u32 = 4 * 3600;

/// TAT compliance threshold. The target is business policy, so it is a
/// field rather than a hard-coded literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TatPolicy {
    pub target_seconds: u32,
}

impl Default for TatPolicy {
    fn default() -> Self {
        Self {
            target_seconds: DEFAULT_TARGET_SECONDS,
        }
    }
}

impl TatPolicy {
    pub fn new(target_seconds: u32) -> Self {
        Self { target_seconds }
    }

    /// Whether a duration string in `H+:MM:SS` form is within the target.
    ///
    /// The hours component is not clamped to 24. Parts beyond the third are
    /// ignored. Empty, short, or non-numeric input is treated as
    /// non-compliant — a degraded value, never an error.
    pub fn is_within_target(&self, tat: &str) -> bool {
        let trimmed = tat.trim();
        if trimmed.is_empty() {
            return false;
        }

        let mut parts = trimmed.split(':');
        let (Some(hours), Some(minutes), Some(seconds)) =
            (parts.next(), parts.next(), parts.next())
        else {
            return false;
        };
        let (Ok(hours), Ok(minutes), Ok(seconds)) = (
            hours.trim().parse::<u64>(),
            minutes.trim().parse::<u64>(),
            seconds.trim().parse::<u64>(),
        ) else {
            return false;
        };

        let total = hours * 3600 + minutes * 60 + seconds;
        total <= u64::from(self.target_seconds)
    }
}
