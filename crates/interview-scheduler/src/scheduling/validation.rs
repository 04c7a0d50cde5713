use chrono::NaiveDate;

use super::domain::{ApplicantId, InterviewType, ScheduleRequest};
use super::slots::SlotTime;

/// Request rejections. Each is detectable from the request alone and is
/// fixed by resubmitting corrected input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("applicant id is required")]
    MissingApplicant,
    #[error("interview date is required")]
    MissingDate,
    #[error("invalid date format, use YYYY-MM-DD")]
    InvalidDateFormat,
    #[error("interview time is required")]
    MissingTime,
    #[error("invalid time format, use HH:MM")]
    InvalidTimeFormat,
    #[error("interview date cannot be in the past")]
    PastDate,
    #[error("{time} is not one of the offered interview slots")]
    OffGridTime { time: SlotTime },
}

impl ValidationError {
    pub const fn kind(&self) -> &'static str {
        match self {
            ValidationError::MissingApplicant => "missing_applicant",
            ValidationError::MissingDate => "missing_date",
            ValidationError::InvalidDateFormat => "invalid_date_format",
            ValidationError::MissingTime => "missing_time",
            ValidationError::InvalidTimeFormat => "invalid_time_format",
            ValidationError::PastDate => "past_date",
            ValidationError::OffGridTime { .. } => "off_grid_time",
        }
    }
}

/// A request that passed every structural and temporal check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    pub applicant_id: ApplicantId,
    pub date: NaiveDate,
    pub time: SlotTime,
    pub interview_type: InterviewType,
    pub notes: Option<String>,
    pub location: Option<String>,
}

/// Parses a strict `YYYY-MM-DD` calendar date.
pub fn parse_iso_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::MissingDate);
    }

    let bytes = raw.as_bytes();
    let shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(idx, b)| match idx {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shaped {
        return Err(ValidationError::InvalidDateFormat);
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| ValidationError::InvalidDateFormat)
}

/// Parses an `H:MM` / `HH:MM` 24-hour time.
pub fn parse_slot_time(raw: &str) -> Result<SlotTime, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::MissingTime);
    }
    raw.parse().map_err(|_| ValidationError::InvalidTimeFormat)
}

/// Runs the request checks in order, failing on the first problem:
/// applicant, date, time, then "not before `today`". The slot grid is not
/// consulted here.
pub fn validate_request(
    request: &ScheduleRequest,
    today: NaiveDate,
) -> Result<ValidatedRequest, ValidationError> {
    let applicant = ApplicantId::new(&request.applicant_id);
    if applicant.0.is_empty() {
        return Err(ValidationError::MissingApplicant);
    }

    let date = parse_iso_date(&request.date)?;
    let time = parse_slot_time(&request.time)?;

    if date < today {
        return Err(ValidationError::PastDate);
    }

    Ok(ValidatedRequest {
        applicant_id: applicant,
        date,
        time,
        interview_type: request.interview_type.unwrap_or_default(),
        notes: request.notes.clone(),
        location: request.location.clone(),
    })
}
