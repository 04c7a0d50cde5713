use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{ApplicantId, BookingKey, Interview, ScheduleRequest};
use super::repository::{InterviewNotifier, InterviewRepository, RepositoryError};
use super::service::{InterviewSchedulingService, SchedulingError};
use super::slots::SlotTime;
use super::validation::parse_iso_date;

type SharedService<R, N> = Arc<InterviewSchedulingService<R, N>>;

/// Router builder exposing booking, availability, and lifecycle endpoints.
pub fn interview_router<R, N>(service: SharedService<R, N>) -> Router
where
    R: InterviewRepository + 'static,
    N: InterviewNotifier + 'static,
{
    Router::new()
        .route(
            "/api/v1/interviews",
            post(schedule_handler::<R, N>).get(scheduled_handler::<R, N>),
        )
        .route("/api/v1/interview-slots", get(slots_handler::<R, N>))
        .route(
            "/api/v1/interviews/:interview_id/cancel",
            post(cancel_interview_handler::<R, N>),
        )
        .route(
            "/api/v1/interviews/:interview_id/complete",
            post(complete_handler::<R, N>),
        )
        .route(
            "/api/v1/applicants/:applicant_id/interviews",
            get(applicant_handler::<R, N>),
        )
        .route(
            "/api/v1/applicants/:applicant_id/interviews/cancel",
            post(cancel_applicant_handler::<R, N>),
        )
        .with_state(service)
}

#[derive(Debug, Serialize)]
pub struct ScheduledResponse {
    pub interview: Interview,
    pub summary: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SlotsQuery {
    #[serde(default)]
    pub(crate) date: String,
}

#[derive(Debug, Serialize)]
pub struct SlotsResponse {
    pub date: String,
    pub slots: Vec<SlotTime>,
}

/// Validation errors are the caller's to fix (400); slot and transition
/// conflicts are 409.
fn error_response(error: &SchedulingError) -> Response {
    let status = match error {
        SchedulingError::Validation(_) => StatusCode::BAD_REQUEST,
        SchedulingError::SlotTaken { .. }
        | SchedulingError::Repository(RepositoryError::Transition(_)) => StatusCode::CONFLICT,
        SchedulingError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({
        "error": error.to_string(),
        "kind": error.kind(),
    });
    (status, Json(payload)).into_response()
}

/// Bodies that are not a JSON scheduling request at all.
fn rejection_response(rejection: JsonRejection) -> Response {
    let payload = json!({
        "error": rejection.body_text(),
        "kind": "invalid_payload",
    });
    (rejection.status(), Json(payload)).into_response()
}

pub(crate) async fn schedule_handler<R, N>(
    State(service): State<SharedService<R, N>>,
    payload: Result<Json<ScheduleRequest>, JsonRejection>,
) -> Response
where
    R: InterviewRepository + 'static,
    N: InterviewNotifier + 'static,
{
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(rejection),
    };

    match service.schedule(request) {
        Ok(interview) => {
            let summary = service.summarize(&interview);
            let body = ScheduledResponse { interview, summary };
            (StatusCode::CREATED, Json(body)).into_response()
        }
        Err(error) => error_response(&error),
    }
}

pub(crate) async fn scheduled_handler<R, N>(
    State(service): State<SharedService<R, N>>,
) -> Response
where
    R: InterviewRepository + 'static,
    N: InterviewNotifier + 'static,
{
    match service.find_scheduled() {
        Ok(interviews) => (StatusCode::OK, Json(interviews)).into_response(),
        Err(error) => error_response(&error),
    }
}

pub(crate) async fn slots_handler<R, N>(
    State(service): State<SharedService<R, N>>,
    Query(query): Query<SlotsQuery>,
) -> Response
where
    R: InterviewRepository + 'static,
    N: InterviewNotifier + 'static,
{
    let date = match parse_iso_date(&query.date) {
        Ok(date) => date,
        Err(error) => return error_response(&SchedulingError::from(error)),
    };

    match service.available_slots(date) {
        Ok(slots) => {
            let body = SlotsResponse {
                date: date.to_string(),
                slots,
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(error) => error_response(&error),
    }
}

pub(crate) async fn applicant_handler<R, N>(
    State(service): State<SharedService<R, N>>,
    Path(applicant_id): Path<String>,
) -> Response
where
    R: InterviewRepository + 'static,
    N: InterviewNotifier + 'static,
{
    match service.find_by_applicant(&ApplicantId::new(&applicant_id)) {
        Ok(interviews) => (StatusCode::OK, Json(interviews)).into_response(),
        Err(error) => error_response(&error),
    }
}

fn cancel_response<R, N>(service: &InterviewSchedulingService<R, N>, key: BookingKey) -> Response
where
    R: InterviewRepository + 'static,
    N: InterviewNotifier + 'static,
{
    match service.cancel(&key) {
        Ok(cancelled) => (StatusCode::OK, Json(json!({ "cancelled": cancelled }))).into_response(),
        Err(error) => error_response(&error),
    }
}

pub(crate) async fn cancel_interview_handler<R, N>(
    State(service): State<SharedService<R, N>>,
    Path(interview_id): Path<String>,
) -> Response
where
    R: InterviewRepository + 'static,
    N: InterviewNotifier + 'static,
{
    cancel_response(&service, BookingKey::interview(interview_id))
}

pub(crate) async fn cancel_applicant_handler<R, N>(
    State(service): State<SharedService<R, N>>,
    Path(applicant_id): Path<String>,
) -> Response
where
    R: InterviewRepository + 'static,
    N: InterviewNotifier + 'static,
{
    cancel_response(&service, BookingKey::applicant(applicant_id))
}

pub(crate) async fn complete_handler<R, N>(
    State(service): State<SharedService<R, N>>,
    Path(interview_id): Path<String>,
) -> Response
where
    R: InterviewRepository + 'static,
    N: InterviewNotifier + 'static,
{
    let key = BookingKey::interview(interview_id.clone());
    match service.complete(&key) {
        Ok(Some(interview)) => (StatusCode::OK, Json(interview)).into_response(),
        Ok(None) => {
            let payload = json!({
                "error": "interview not found",
                "interview_id": interview_id,
            });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        Err(error) => error_response(&error),
    }
}
