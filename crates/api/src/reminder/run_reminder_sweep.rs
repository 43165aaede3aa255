use crate::error::ApiError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use student_progress_api_structs::run_reminder_sweep::*;
use student_progress_domain::{days_to_millis, Student, StudentSweepOutcome, SweepReport};
use student_progress_infra::ProgressContext;
use tracing::{error, info};

/// Manual trigger of a reminder sweep
pub async fn run_reminder_sweep_controller(
    ctx: web::Data<ProgressContext>,
) -> Result<HttpResponse, ApiError> {
    let usecase = RunReminderSweepUseCase {};

    execute(usecase, &ctx)
        .await
        .map(|report| HttpResponse::Ok().json(APIResponse::new(report)))
        .map_err(ApiError::from)
}

/// Sends an inactivity reminder to every `Student` that allows reminders and has
/// not submitted anything within the inactivity threshold.
///
/// There is no guard against notifying the same `Student` twice on the same day:
/// running the sweep again before the student's activity changes selects them
/// again and sends another reminder.
#[derive(Debug)]
pub struct RunReminderSweepUseCase {}

#[derive(Debug)]
pub enum UseCaseError {
    /// The eligible students could not be selected, so nobody was reminded
    SelectionFailed(String),
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::SelectionFailed(_) => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for RunReminderSweepUseCase {
    type Response = SweepReport;
    type Error = UseCaseError;

    const NAME: &'static str = "RunReminderSweep";

    async fn execute(&mut self, ctx: &ProgressContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let threshold_millis = days_to_millis(ctx.config.inactivity_threshold_days);

        let students = ctx
            .repos
            .students
            .find_eligible_for_reminder(now, threshold_millis)
            .await
            .map_err(|e| UseCaseError::SelectionFailed(e.to_string()))?;

        let mut outcomes = Vec::with_capacity(students.len());
        for student in students {
            outcomes.push(remind_student(student, now, ctx).await);
        }

        let report = SweepReport::from_outcomes(now, &outcomes);
        info!(
            "Processed {} inactive students: {} notified, {} failures",
            report.selected,
            report.notified,
            report.failures.len()
        );
        Ok(report)
    }
}

async fn remind_student(
    student: Student,
    now: i64,
    ctx: &ProgressContext,
) -> StudentSweepOutcome {
    if let Err(e) = ctx.notifier.send(&student.email, &student.name).await {
        error!(
            "Failed to send reminder to student {} <{}>: {}",
            student.id, student.email, e
        );
        return StudentSweepOutcome::DeliveryFailed {
            student_id: student.id,
            error: e.to_string(),
        };
    }

    match ctx
        .repos
        .students
        .update_reminder_fields(&student.id, now)
        .await
    {
        Ok(Some(recorded)) => {
            info!(
                "Reminder sent to student {} <{}>, {} reminders in total",
                student.id, student.email, recorded.reminders_sent
            );
            StudentSweepOutcome::Notified {
                student_id: student.id,
            }
        }
        Ok(None) => {
            error!(
                "Reminder sent to student {} but the student no longer exists",
                student.id
            );
            StudentSweepOutcome::BookkeepingFailed {
                student_id: student.id,
                error: "Student was not found when recording the reminder".into(),
            }
        }
        Err(e) => {
            error!(
                "Reminder sent to student {} but it could not be recorded: {:?}",
                student.id, e
            );
            StudentSweepOutcome::BookkeepingFailed {
                student_id: student.id,
                error: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use student_progress_domain::{SweepFailureKind, ID, INACTIVITY_THRESHOLD_DAYS};
    use student_progress_infra::{
        Config, INotifier, IStudentRepo, InMemoryNotifier, InMemoryStudentRepo, NotifierError,
        StaticTimeSys,
    };
    use std::sync::Arc;

    // Tue Nov 14 2023 22:13:20 GMT+0000
    const NOW: i64 = 1_700_000_000_000;
    const SECOND: i64 = 1000;

    fn test_config() -> Config {
        Config {
            port: 0,
            inactivity_threshold_days: INACTIVITY_THRESHOLD_DAYS,
            reminder_sweep_hour_utc: 2,
            email_api: None,
        }
    }

    struct TestContext {
        ctx: ProgressContext,
        notifier: Arc<InMemoryNotifier>,
    }

    fn setup() -> TestContext {
        let notifier = Arc::new(InMemoryNotifier::new());
        let mut ctx = ProgressContext::create_inmemory(test_config(), notifier.clone());
        ctx.sys = Arc::new(StaticTimeSys(NOW));
        TestContext { ctx, notifier }
    }

    fn student(name: &str, last_submission_date: Option<i64>, allow_reminder: bool) -> Student {
        let mut student = Student::new(
            name.into(),
            format!("{}@example.com", name.to_lowercase()),
            format!("{}_cf", name.to_lowercase()),
        );
        student.last_submission_date = last_submission_date;
        student.allow_reminder = allow_reminder;
        student
    }

    async fn insert(ctx: &ProgressContext, students: &[&Student]) {
        for student in students {
            ctx.repos.students.insert(student).await.unwrap();
        }
    }

    fn threshold() -> i64 {
        days_to_millis(INACTIVITY_THRESHOLD_DAYS)
    }

    #[actix_web::main]
    #[test]
    async fn sweep_reminds_inactive_students_and_isolates_failures() {
        let TestContext { ctx, notifier } = setup();

        let a = student("A", None, true);
        let b = student("B", Some(NOW - days_to_millis(10)), true);
        let c = student("C", Some(NOW - days_to_millis(3)), true);
        let d = student("D", None, false);
        insert(&ctx, &[&a, &b, &c, &d]).await;
        notifier.fail_deliveries_to(&b.email);

        let report = execute(RunReminderSweepUseCase {}, &ctx).await.unwrap();
        assert_eq!(report.started_at, NOW);
        assert_eq!(report.selected, 2);
        assert_eq!(report.notified, 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].student_id, b.id);
        assert_eq!(report.failures[0].kind, SweepFailureKind::Delivery);

        let a_after = ctx.repos.students.find(&a.id).await.unwrap();
        assert_eq!(a_after.reminders_sent, 1);
        assert_eq!(a_after.last_reminder_sent_at, Some(NOW));

        let b_after = ctx.repos.students.find(&b.id).await.unwrap();
        assert_eq!(b_after, b);
        assert_eq!(ctx.repos.students.find(&c.id).await.unwrap(), c);
        assert_eq!(ctx.repos.students.find(&d.id).await.unwrap(), d);

        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].email, a.email);
        assert_eq!(sent[0].name, a.name);
    }

    #[actix_web::main]
    #[test]
    async fn inactivity_boundary_is_exclusive() {
        let TestContext { ctx, notifier } = setup();

        let past = student("Past", Some(NOW - threshold() - SECOND), true);
        let within = student("Within", Some(NOW - threshold() + SECOND), true);
        let exact = student("Exact", Some(NOW - threshold()), true);
        insert(&ctx, &[&past, &within, &exact]).await;

        let report = execute(RunReminderSweepUseCase {}, &ctx).await.unwrap();
        assert_eq!(report.selected, 1);
        assert_eq!(report.notified, 1);
        assert_eq!(notifier.sent()[0].email, past.email);
    }

    #[actix_web::main]
    #[test]
    async fn opted_out_students_are_never_selected() {
        let TestContext { ctx, notifier } = setup();

        let never = student("Never", None, false);
        let old = student("Old", Some(0), false);
        insert(&ctx, &[&never, &old]).await;

        let report = execute(RunReminderSweepUseCase {}, &ctx).await.unwrap();
        assert_eq!(report.selected, 0);
        assert!(notifier.sent().is_empty());
    }

    #[actix_web::main]
    #[test]
    async fn failure_does_not_stop_the_remaining_students() {
        let TestContext { ctx, notifier } = setup();

        let mut students = (0..5)
            .map(|i| student(&format!("S{}", i), None, true))
            .collect::<Vec<_>>();
        students.sort_by(|s1, s2| s1.id.cmp(&s2.id));
        insert(&ctx, &students.iter().collect::<Vec<_>>()).await;
        // The first processed student fails
        notifier.fail_deliveries_to(&students[0].email);

        let report = execute(RunReminderSweepUseCase {}, &ctx).await.unwrap();
        assert_eq!(report.selected, 5);
        assert_eq!(report.notified, 4);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].student_id, students[0].id);
        assert_eq!(
            notifier
                .sent()
                .into_iter()
                .map(|s| s.email)
                .collect::<Vec<_>>(),
            students[1..]
                .iter()
                .map(|s| s.email.clone())
                .collect::<Vec<_>>()
        );
    }

    #[actix_web::main]
    #[test]
    async fn running_twice_reminds_again() {
        let TestContext { ctx, notifier } = setup();

        let a = student("A", None, true);
        insert(&ctx, &[&a]).await;

        execute(RunReminderSweepUseCase {}, &ctx).await.unwrap();
        let report = execute(RunReminderSweepUseCase {}, &ctx).await.unwrap();
        assert_eq!(report.selected, 1);
        assert_eq!(report.notified, 1);

        let a_after = ctx.repos.students.find(&a.id).await.unwrap();
        assert_eq!(a_after.reminders_sent, 2);
        assert_eq!(notifier.sent().len(), 2);
    }

    #[actix_web::main]
    #[test]
    async fn previous_reminders_are_incremented_by_one() {
        let TestContext { ctx, .. } = setup();

        let mut a = student("A", None, true);
        a.reminders_sent = 4;
        a.last_reminder_sent_at = Some(NOW - days_to_millis(1));
        insert(&ctx, &[&a]).await;

        execute(RunReminderSweepUseCase {}, &ctx).await.unwrap();
        let a_after = ctx.repos.students.find(&a.id).await.unwrap();
        assert_eq!(a_after.reminders_sent, 5);
        assert_eq!(a_after.last_reminder_sent_at, Some(NOW));
    }

    /// Yields to the runtime before every delivery so that concurrent sweeps
    /// interleave
    struct YieldingNotifier {
        inner: InMemoryNotifier,
    }

    #[async_trait::async_trait]
    impl INotifier for YieldingNotifier {
        async fn send(&self, email: &str, name: &str) -> Result<(), NotifierError> {
            actix_web::rt::task::yield_now().await;
            self.inner.send(email, name).await
        }
    }

    #[actix_web::main]
    #[test]
    async fn overlapping_sweeps_count_every_delivered_reminder() {
        let notifier = Arc::new(YieldingNotifier {
            inner: InMemoryNotifier::new(),
        });
        let mut ctx = ProgressContext::create_inmemory(test_config(), notifier.clone());
        ctx.sys = Arc::new(StaticTimeSys(NOW));

        let a = student("A", None, true);
        insert(&ctx, &[&a]).await;

        let scheduled = actix_web::rt::spawn({
            let ctx = ctx.clone();
            async move { execute(RunReminderSweepUseCase {}, &ctx).await }
        });
        let manual = actix_web::rt::spawn({
            let ctx = ctx.clone();
            async move { execute(RunReminderSweepUseCase {}, &ctx).await }
        });
        let scheduled = scheduled.await.unwrap().unwrap();
        let manual = manual.await.unwrap().unwrap();

        assert_eq!(scheduled.notified + manual.notified, 2);
        assert_eq!(notifier.inner.sent().len(), 2);
        let a_after = ctx.repos.students.find(&a.id).await.unwrap();
        assert_eq!(a_after.reminders_sent, 2);
        assert_eq!(a_after.last_reminder_sent_at, Some(NOW));
    }

    /// Selection works but every bookkeeping write fails
    struct BrokenWritesRepo {
        inner: InMemoryStudentRepo,
    }

    #[async_trait::async_trait]
    impl IStudentRepo for BrokenWritesRepo {
        async fn insert(&self, student: &Student) -> anyhow::Result<()> {
            self.inner.insert(student).await
        }
        async fn save(&self, student: &Student) -> anyhow::Result<()> {
            self.inner.save(student).await
        }
        async fn delete(&self, student_id: &ID) -> Option<Student> {
            self.inner.delete(student_id).await
        }
        async fn find(&self, student_id: &ID) -> Option<Student> {
            self.inner.find(student_id).await
        }
        async fn find_all(&self) -> anyhow::Result<Vec<Student>> {
            self.inner.find_all().await
        }
        async fn find_eligible_for_reminder(
            &self,
            now: i64,
            threshold_millis: i64,
        ) -> anyhow::Result<Vec<Student>> {
            self.inner
                .find_eligible_for_reminder(now, threshold_millis)
                .await
        }
        async fn update_reminder_fields(
            &self,
            _student_id: &ID,
            _last_reminder_sent_at: i64,
        ) -> anyhow::Result<Option<Student>> {
            Err(anyhow::anyhow!("connection reset"))
        }
    }

    /// Selection always fails
    struct BrokenSelectionRepo {}

    #[async_trait::async_trait]
    impl IStudentRepo for BrokenSelectionRepo {
        async fn insert(&self, _student: &Student) -> anyhow::Result<()> {
            Ok(())
        }
        async fn save(&self, _student: &Student) -> anyhow::Result<()> {
            Ok(())
        }
        async fn delete(&self, _student_id: &ID) -> Option<Student> {
            None
        }
        async fn find(&self, _student_id: &ID) -> Option<Student> {
            None
        }
        async fn find_all(&self) -> anyhow::Result<Vec<Student>> {
            Ok(vec![])
        }
        async fn find_eligible_for_reminder(
            &self,
            _now: i64,
            _threshold_millis: i64,
        ) -> anyhow::Result<Vec<Student>> {
            Err(anyhow::anyhow!("database is down"))
        }
        async fn update_reminder_fields(
            &self,
            _student_id: &ID,
            _last_reminder_sent_at: i64,
        ) -> anyhow::Result<Option<Student>> {
            Ok(None)
        }
    }

    #[actix_web::main]
    #[test]
    async fn unrecorded_reminders_are_reported_as_bookkeeping_failures() {
        let TestContext { mut ctx, notifier } = setup();
        ctx.repos.students = Arc::new(BrokenWritesRepo {
            inner: InMemoryStudentRepo::new(),
        });

        let a = student("A", None, true);
        let b = student("B", None, true);
        insert(&ctx, &[&a, &b]).await;
        notifier.fail_deliveries_to(&b.email);

        let report = execute(RunReminderSweepUseCase {}, &ctx).await.unwrap();
        assert_eq!(report.selected, 2);
        assert_eq!(report.notified, 1);
        assert_eq!(report.failures.len(), 2);

        let bookkeeping = report.failures_of_kind(SweepFailureKind::Bookkeeping);
        assert_eq!(bookkeeping.len(), 1);
        assert_eq!(bookkeeping[0].student_id, a.id);
        assert_eq!(bookkeeping[0].error, "connection reset");

        let delivery = report.failures_of_kind(SweepFailureKind::Delivery);
        assert_eq!(delivery.len(), 1);
        assert_eq!(delivery[0].student_id, b.id);

        assert_eq!(ctx.repos.students.find(&a.id).await.unwrap().reminders_sent, 0);
    }

    #[actix_web::main]
    #[test]
    async fn selection_failure_aborts_the_sweep() {
        let TestContext { mut ctx, notifier } = setup();
        ctx.repos.students = Arc::new(BrokenSelectionRepo {});

        let res = execute(RunReminderSweepUseCase {}, &ctx).await;
        assert!(matches!(res, Err(UseCaseError::SelectionFailed(_))));
        assert!(notifier.sent().is_empty());
    }
}
