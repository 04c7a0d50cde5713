//! Interview booking: the slot grid, request validation, conflict checks,
//! the interview store, and the service that ties them together.

pub mod conflicts;
pub mod domain;
pub mod presentation;
pub mod repository;
pub mod router;
pub mod service;
pub mod slots;
pub mod store;
pub mod validation;

#[cfg(test)]
mod tests;

pub use conflicts::ConflictChecker;
pub use domain::{
    ApplicantId, BookingKey, Interview, InterviewId, InterviewStatus, InterviewType,
    ScheduleRequest, TransitionError,
};
pub use presentation::{cancellation_summary, format_date, summarize};
pub use repository::{
    InterviewNotice, InterviewNotifier, InterviewRepository, NoticeKind, NotifierError,
    RepositoryError, SilentNotifier,
};
pub use router::{interview_router, ScheduledResponse, SlotsResponse};
pub use service::{InterviewSchedulingService, SchedulingError};
pub use slots::{SlotCatalog, SlotTime, SlotTimeParseError};
pub use store::InMemoryInterviewStore;
pub use validation::{validate_request, ValidatedRequest, ValidationError};
