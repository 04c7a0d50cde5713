use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::domain::Interview;
use super::repository::{InterviewRepository, RepositoryError};
use super::slots::SlotTime;

/// Times on `date` held by a scheduled interview.
pub fn occupied_times(interviews: &[Interview], date: NaiveDate) -> BTreeSet<SlotTime> {
    interviews
        .iter()
        .filter(|interview| interview.holds(date, interview.time))
        .map(|interview| interview.time)
        .collect()
}

/// Answers whether a `(date, time)` pair is already held.
///
/// Linear over the scheduled interviews for the date; single-employer
/// calendars stay small enough that no index is kept.
pub struct ConflictChecker<'a, R: ?Sized> {
    repository: &'a R,
}

impl<'a, R> ConflictChecker<'a, R>
where
    R: InterviewRepository + ?Sized,
{
    pub fn new(repository: &'a R) -> Self {
        Self { repository }
    }

    pub fn has_conflict(&self, date: NaiveDate, time: SlotTime) -> Result<bool, RepositoryError> {
        let scheduled = self.repository.scheduled_on(date)?;
        Ok(scheduled.iter().any(|interview| interview.holds(date, time)))
    }
}
