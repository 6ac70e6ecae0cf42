use chrono::NaiveDateTime;

/// Format due dates are entered in
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Error type for text collected from prompts
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("invalid due date {0:?} (expected YYYY-MM-DD HH:MM)")]
    InvalidDueDate(String),
    #[error("invalid estimated time {0:?} (expected a non-negative number of hours)")]
    InvalidEstimate(String),
}

/// Parse a due date. Blank input means no due date.
pub fn parse_due_date(text: &str) -> Result<Option<NaiveDateTime>, InputError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    NaiveDateTime::parse_from_str(text, DUE_DATE_FORMAT)
        .map(Some)
        .map_err(|_| InputError::InvalidDueDate(text.to_string()))
}

/// Parse an estimate in hours. Blank input means not estimated.
pub fn parse_estimate(text: &str) -> Result<Option<f64>, InputError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    match text.parse::<f64>() {
        // -0 is accepted as zero
        Ok(hours) if hours.is_finite() && hours >= 0.0 => Ok(Some(hours.abs())),
        _ => Err(InputError::InvalidEstimate(text.to_string())),
    }
}
