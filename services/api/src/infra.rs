use chrono::NaiveDate;
use interview_scheduler::scheduling::validation::{parse_iso_date, parse_slot_time};
use interview_scheduler::scheduling::{
    InterviewNotice, InterviewNotifier, NoticeKind, NotifierError, SlotTime,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Stands in for e-mail/push delivery by writing each notice to the log.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct TracingNotifier;

impl InterviewNotifier for TracingNotifier {
    fn notify(&self, notice: InterviewNotice) -> Result<(), NotifierError> {
        let template = match notice.kind {
            NoticeKind::Scheduled => "interview_confirmation",
            NoticeKind::Cancelled => "interview_cancellation",
        };
        info!(
            template,
            interview = %notice.interview_id,
            applicant = %notice.applicant_id,
            summary = %notice.summary,
            "interview notice dispatched"
        );
        Ok(())
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    parse_iso_date(raw).map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_slot(raw: &str) -> Result<SlotTime, String> {
    parse_slot_time(raw).map_err(|err| format!("failed to parse '{raw}' as HH:MM ({err})"))
}
