use hdh_model::{StatusLabel, is_missing};

/// Derive the completion status from the completion milestone.
///
/// Any recorded value counts as completion; blank and placeholder values mean
/// the project is still running.
pub fn classify_status(milestone: &str) -> StatusLabel {
    if is_missing(milestone) {
        StatusLabel::InProgress
    } else {
        StatusLabel::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_and_placeholder_are_in_progress() {
        assert_eq!(classify_status(""), StatusLabel::InProgress);
        assert_eq!(classify_status("  "), StatusLabel::InProgress);
        assert_eq!(classify_status("nan"), StatusLabel::InProgress);
    }

    #[test]
    fn any_value_is_completed() {
        assert_eq!(classify_status("2023-05-01"), StatusLabel::Completed);
        assert_eq!(classify_status("fin"), StatusLabel::Completed);
    }
}
