use serde::{Deserialize, Serialize};
use student_progress_domain::{SweepFailure, SweepFailureKind, SweepReport, ID};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepFailureDTO {
    pub student_id: ID,
    pub kind: SweepFailureKind,
    pub error: String,
}

impl SweepFailureDTO {
    pub fn new(failure: SweepFailure) -> Self {
        Self {
            student_id: failure.student_id,
            kind: failure.kind,
            error: failure.error,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepReportDTO {
    pub started_at: i64,
    pub selected: usize,
    pub notified: usize,
    pub failures: Vec<SweepFailureDTO>,
}

impl SweepReportDTO {
    pub fn new(report: SweepReport) -> Self {
        Self {
            started_at: report.started_at,
            selected: report.selected,
            notified: report.notified,
            failures: report
                .failures
                .into_iter()
                .map(SweepFailureDTO::new)
                .collect(),
        }
    }
}
