//! Request normalization helpers
//!
//! The gateway's policy is to clamp numeric options into range rather than
//! reject them; only missing or oversized text fails validation.

/// Trim and bound a required text field
///
/// # Errors
///
/// Returns a human-readable message when the trimmed value is empty or
/// longer than `max_chars`.
pub fn required_text(raw: &str, max_chars: usize, field: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(format!("{field} must not be empty"));
    }

    let chars = trimmed.chars().count();
    if chars > max_chars {
        return Err(format!("{field} exceeds the maximum length of {max_chars} characters ({chars})"));
    }

    Ok(trimmed.to_owned())
}

/// Clamp an optional numeric option into `[min, max]`
///
/// In-range values pass through unchanged (clamping is idempotent);
/// out-of-range values snap to the nearest bound; absent or non-finite
/// values become `default`.
pub fn clamp_option(value: Option<f64>, min: f64, max: f64, default: f64) -> f64 {
    match value {
        Some(v) if v.is_finite() => v.clamp(min, max),
        _ => default,
    }
}
