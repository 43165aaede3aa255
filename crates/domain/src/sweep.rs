use crate::shared::entity::ID;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// What went wrong for a single `Student` during a sweep
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SweepFailureKind {
    /// The reminder was not delivered
    Delivery,
    /// The reminder was delivered but the bookkeeping update was not persisted
    Bookkeeping,
}

impl Display for SweepFailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Delivery => write!(f, "delivery"),
            Self::Bookkeeping => write!(f, "bookkeeping"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SweepFailure {
    pub student_id: ID,
    pub kind: SweepFailureKind,
    pub error: String,
}

/// The outcome of processing one selected `Student`
#[derive(Debug, Clone, PartialEq)]
pub enum StudentSweepOutcome {
    Notified { student_id: ID },
    DeliveryFailed { student_id: ID, error: String },
    BookkeepingFailed { student_id: ID, error: String },
}

impl StudentSweepOutcome {
    /// Whether the reminder email left the system
    pub fn was_delivered(&self) -> bool {
        !matches!(self, Self::DeliveryFailed { .. })
    }

    pub fn failure(&self) -> Option<SweepFailure> {
        match self {
            Self::Notified { .. } => None,
            Self::DeliveryFailed { student_id, error } => Some(SweepFailure {
                student_id: student_id.clone(),
                kind: SweepFailureKind::Delivery,
                error: error.clone(),
            }),
            Self::BookkeepingFailed { student_id, error } => Some(SweepFailure {
                student_id: student_id.clone(),
                kind: SweepFailureKind::Bookkeeping,
                error: error.clone(),
            }),
        }
    }
}

/// Aggregate result of one reminder sweep
#[derive(Debug, Clone, PartialEq)]
pub struct SweepReport {
    /// The `now` of the sweep in millis. Every successful reminder in the sweep
    /// is stamped with this timestamp.
    pub started_at: i64,
    pub selected: usize,
    /// Number of students the reminder was delivered to. Includes students whose
    /// bookkeeping update failed afterwards.
    pub notified: usize,
    pub failures: Vec<SweepFailure>,
}

impl SweepReport {
    pub fn from_outcomes(started_at: i64, outcomes: &[StudentSweepOutcome]) -> Self {
        Self {
            started_at,
            selected: outcomes.len(),
            notified: outcomes.iter().filter(|o| o.was_delivered()).count(),
            failures: outcomes.iter().filter_map(|o| o.failure()).collect(),
        }
    }

    pub fn failures_of_kind(&self, kind: SweepFailureKind) -> Vec<&SweepFailure> {
        self.failures.iter().filter(|f| f.kind == kind).collect()
    }
}
