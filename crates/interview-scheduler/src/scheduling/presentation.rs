use chrono::NaiveDate;

use super::domain::Interview;

/// Long-form date such as `Friday, October 16, 2026`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// One-line booking summary shared by UI and notification adapters.
pub fn summarize(interview: &Interview) -> String {
    format!(
        "Interview scheduled for {} at {}",
        format_date(interview.date),
        interview.time
    )
}

/// Sentence used when a booking is called off.
pub fn cancellation_summary(interview: &Interview) -> String {
    format!(
        "Interview on {} at {} has been cancelled",
        format_date(interview.date),
        interview.time
    )
}
