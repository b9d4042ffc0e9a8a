/// Placeholder logged instead of worker-supplied text.
pub const REDACTED_VALUE: &str = "[REDACTED]";

/// Returns `value` when worker text may be logged, otherwise a redacted token.
pub fn redact(value: &str, log_data: bool) -> &str {
    if log_data { value } else { REDACTED_VALUE }
}
