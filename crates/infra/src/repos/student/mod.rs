mod inmemory;
mod postgres;

pub use inmemory::InMemoryStudentRepo;
pub use postgres::PostgresStudentRepo;
use student_progress_domain::{Student, ID};

#[async_trait::async_trait]
pub trait IStudentRepo: Send + Sync {
    async fn insert(&self, student: &Student) -> anyhow::Result<()>;
    /// Writes the profile fields of an existing `Student`. `reminders_sent` and
    /// `last_reminder_sent_at` are owned by the reminder sweep and are left as
    /// they are in storage.
    async fn save(&self, student: &Student) -> anyhow::Result<()>;
    async fn delete(&self, student_id: &ID) -> Option<Student>;
    async fn find(&self, student_id: &ID) -> Option<Student>;
    async fn find_all(&self) -> anyhow::Result<Vec<Student>>;
    /// Students that accept reminders and have not submitted anything in the
    /// `threshold_millis` before `now`, ordered by id
    async fn find_eligible_for_reminder(
        &self,
        now: i64,
        threshold_millis: i64,
    ) -> anyhow::Result<Vec<Student>>;
    /// Records a delivered reminder by incrementing the stored `reminders_sent`
    /// in place and stamping `last_reminder_sent_at`. Only writes the reminder
    /// bookkeeping fields. Returns `None` if the `Student` does not exist.
    async fn update_reminder_fields(
        &self,
        student_id: &ID,
        last_reminder_sent_at: i64,
    ) -> anyhow::Result<Option<Student>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use student_progress_domain::{days_to_millis, INACTIVITY_THRESHOLD_DAYS};

    const NOW: i64 = 1_700_000_000_000;

    fn student(name: &str) -> Student {
        Student::new(
            name.into(),
            format!("{}@example.com", name),
            format!("{}_cf", name),
        )
    }

    fn threshold() -> i64 {
        days_to_millis(INACTIVITY_THRESHOLD_DAYS)
    }

    fn cutoff() -> i64 {
        Student::inactivity_cutoff(NOW, threshold())
    }

    #[tokio::test]
    async fn crud_on_inmemory_repo() {
        let repo = InMemoryStudentRepo::new();
        let mut s = student("ada");
        repo.insert(&s).await.expect("To insert student");
        assert_eq!(repo.find(&s.id).await, Some(s.clone()));

        s.current_rating = 1450;
        repo.save(&s).await.expect("To save student");
        assert_eq!(repo.find(&s.id).await.unwrap().current_rating, 1450);
        assert_eq!(repo.find_all().await.unwrap().len(), 1);

        assert_eq!(repo.delete(&s.id).await, Some(s.clone()));
        assert!(repo.find(&s.id).await.is_none());
        assert!(repo.delete(&s.id).await.is_none());
    }

    #[tokio::test]
    async fn selects_only_inactive_students_that_allow_reminders() {
        let repo = InMemoryStudentRepo::new();

        let never_submitted = student("a");
        let mut long_inactive = student("b");
        long_inactive.last_submission_date = Some(NOW - days_to_millis(10));
        let mut recently_active = student("c");
        recently_active.last_submission_date = Some(NOW - days_to_millis(3));
        let mut opted_out = student("d");
        opted_out.allow_reminder = false;
        let mut just_past_boundary = student("e");
        just_past_boundary.last_submission_date = Some(cutoff() - 1000);
        let mut just_before_boundary = student("f");
        just_before_boundary.last_submission_date = Some(cutoff() + 1000);
        let mut on_boundary = student("g");
        on_boundary.last_submission_date = Some(cutoff());

        for s in [
            &never_submitted,
            &long_inactive,
            &recently_active,
            &opted_out,
            &just_past_boundary,
            &just_before_boundary,
            &on_boundary,
        ] {
            repo.insert(s).await.unwrap();
        }

        let eligible = repo
            .find_eligible_for_reminder(NOW, threshold())
            .await
            .unwrap();
        let mut expected = vec![
            never_submitted.id.clone(),
            long_inactive.id.clone(),
            just_past_boundary.id.clone(),
        ];
        expected.sort();
        assert_eq!(
            eligible.into_iter().map(|s| s.id).collect::<Vec<_>>(),
            expected
        );
    }

    #[tokio::test]
    async fn reminder_fields_update_touches_only_bookkeeping() {
        let repo = InMemoryStudentRepo::new();
        let mut s = student("ada");
        s.reminders_sent = 2;
        repo.insert(&s).await.unwrap();

        let updated = repo
            .update_reminder_fields(&s.id, NOW)
            .await
            .unwrap()
            .expect("Student to exist");
        assert_eq!(updated.reminders_sent, 3);
        assert_eq!(updated.last_reminder_sent_at, Some(NOW));
        assert_eq!(updated.email, s.email);
        assert_eq!(updated.handle, s.handle);
        assert_eq!(repo.find(&s.id).await, Some(updated));

        let missing = repo.update_reminder_fields(&ID::new(), NOW).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn reminder_fields_updates_from_stale_copies_all_count() {
        let repo = InMemoryStudentRepo::new();
        let s = student("ada");
        repo.insert(&s).await.unwrap();

        // Two sweeps that selected the same snapshot both record their reminder
        repo.update_reminder_fields(&s.id, NOW).await.unwrap();
        repo.update_reminder_fields(&s.id, NOW + 1).await.unwrap();

        let stored = repo.find(&s.id).await.unwrap();
        assert_eq!(stored.reminders_sent, 2);
        assert_eq!(stored.last_reminder_sent_at, Some(NOW + 1));
    }

    #[tokio::test]
    async fn saving_a_stale_profile_keeps_reminder_bookkeeping() {
        let repo = InMemoryStudentRepo::new();
        let s = student("ada");
        repo.insert(&s).await.unwrap();

        let mut stale = repo.find(&s.id).await.unwrap();
        repo.update_reminder_fields(&s.id, NOW).await.unwrap();

        stale.current_rating = 1450;
        stale.reminders_sent = 0;
        stale.last_reminder_sent_at = None;
        repo.save(&stale).await.unwrap();

        let stored = repo.find(&s.id).await.unwrap();
        assert_eq!(stored.current_rating, 1450);
        assert_eq!(stored.reminders_sent, 1);
        assert_eq!(stored.last_reminder_sent_at, Some(NOW));
    }
}
