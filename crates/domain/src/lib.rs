mod shared;
mod student;
mod sweep;

pub use shared::entity::{Entity, InvalidIDError, ID};
pub use student::{days_to_millis, Student, INACTIVITY_THRESHOLD_DAYS};
pub use sweep::{StudentSweepOutcome, SweepFailure, SweepFailureKind, SweepReport};
