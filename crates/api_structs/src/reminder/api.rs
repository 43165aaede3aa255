use serde::{Deserialize, Serialize};
use student_progress_domain::SweepReport;

use crate::dtos::SweepReportDTO;

pub mod run_reminder_sweep {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub report: SweepReportDTO,
    }

    impl APIResponse {
        pub fn new(report: SweepReport) -> Self {
            Self {
                report: SweepReportDTO::new(report),
            }
        }
    }
}
