use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};

use super::domain::{ApplicantId, BookingKey, Interview, InterviewStatus};
use super::repository::{InterviewRepository, RepositoryError};

/// Authoritative in-process interview collection, kept in insertion order.
///
/// Records are never removed; cancellation is a status change so the
/// booking history stays intact.
#[derive(Debug, Default, Clone)]
pub struct InMemoryInterviewStore {
    records: Arc<Mutex<Vec<Interview>>>,
}

impl InMemoryInterviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Records hold no cross-field invariant a panicking writer could have
    // half-applied, so a poisoned lock is still safe to read through.
    fn records(&self) -> MutexGuard<'_, Vec<Interview>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn len(&self) -> usize {
        self.records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }

    /// Every record ever inserted, including cancelled and completed ones.
    pub fn history(&self) -> Vec<Interview> {
        self.records().clone()
    }
}

/// Index of the record a key addresses.
pub(crate) fn resolve_index(records: &[Interview], key: &BookingKey) -> Option<usize> {
    let mut matching = records
        .iter()
        .enumerate()
        .rev()
        .filter(|(_, interview)| interview.matches(key));

    match key {
        BookingKey::Interview(_) => matching.next().map(|(idx, _)| idx),
        BookingKey::Applicant(_) => {
            let mut latest = None;
            for (idx, interview) in matching {
                if interview.status == InterviewStatus::Scheduled {
                    return Some(idx);
                }
                latest.get_or_insert(idx);
            }
            latest
        }
    }
}

impl InterviewRepository for InMemoryInterviewStore {
    fn insert(&self, interview: Interview) -> Result<Interview, RepositoryError> {
        self.records().push(interview.clone());
        Ok(interview)
    }

    fn insert_if_free(&self, interview: Interview) -> Result<Option<Interview>, RepositoryError> {
        let mut records = self.records();
        if records
            .iter()
            .any(|existing| existing.holds(interview.date, interview.time))
        {
            return Ok(None);
        }
        records.push(interview.clone());
        Ok(Some(interview))
    }

    fn find_by_applicant(
        &self,
        applicant: &ApplicantId,
    ) -> Result<Vec<Interview>, RepositoryError> {
        Ok(self
            .records()
            .iter()
            .filter(|interview| interview.belongs_to(applicant))
            .cloned()
            .collect())
    }

    fn find_scheduled(&self) -> Result<Vec<Interview>, RepositoryError> {
        Ok(self
            .records()
            .iter()
            .filter(|interview| interview.status == InterviewStatus::Scheduled)
            .cloned()
            .collect())
    }

    fn resolve(&self, key: &BookingKey) -> Result<Option<Interview>, RepositoryError> {
        let records = self.records();
        Ok(resolve_index(&records, key).and_then(|idx| records.get(idx).cloned()))
    }

    fn update_status(
        &self,
        key: &BookingKey,
        status: InterviewStatus,
        at: DateTime<Utc>,
    ) -> Result<Option<Interview>, RepositoryError> {
        let mut records = self.records();
        let Some(record) = resolve_index(&records, key).and_then(|idx| records.get_mut(idx))
        else {
            return Ok(None);
        };

        record.transition(status, at)?;
        Ok(Some(record.clone()))
    }
}
