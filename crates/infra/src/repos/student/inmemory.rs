use super::IStudentRepo;
use crate::repos::shared::inmemory_repo::*;
use student_progress_domain::{Student, ID};

pub struct InMemoryStudentRepo {
    students: std::sync::Mutex<Vec<Student>>,
}

impl InMemoryStudentRepo {
    pub fn new() -> Self {
        Self {
            students: std::sync::Mutex::new(vec![]),
        }
    }
}

impl Default for InMemoryStudentRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IStudentRepo for InMemoryStudentRepo {
    async fn insert(&self, student: &Student) -> anyhow::Result<()> {
        insert(student, &self.students);
        Ok(())
    }

    async fn save(&self, student: &Student) -> anyhow::Result<()> {
        update_one(&student.id, &self.students, |stored| {
            stored.name = student.name.clone();
            stored.email = student.email.clone();
            stored.phone = student.phone.clone();
            stored.handle = student.handle.clone();
            stored.current_rating = student.current_rating;
            stored.max_rating = student.max_rating;
            stored.last_submission_date = student.last_submission_date;
            stored.allow_reminder = student.allow_reminder;
        });
        Ok(())
    }

    async fn delete(&self, student_id: &ID) -> Option<Student> {
        delete(student_id, &self.students)
    }

    async fn find(&self, student_id: &ID) -> Option<Student> {
        find(student_id, &self.students)
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Student>> {
        let mut students = find_by(&self.students, |_| true);
        students.sort_by(|s1, s2| s1.id.cmp(&s2.id));
        Ok(students)
    }

    async fn find_eligible_for_reminder(
        &self,
        now: i64,
        threshold_millis: i64,
    ) -> anyhow::Result<Vec<Student>> {
        let mut students = find_by(&self.students, |s| {
            s.is_eligible_for_reminder(now, threshold_millis)
        });
        students.sort_by(|s1, s2| s1.id.cmp(&s2.id));
        Ok(students)
    }

    async fn update_reminder_fields(
        &self,
        student_id: &ID,
        last_reminder_sent_at: i64,
    ) -> anyhow::Result<Option<Student>> {
        Ok(update_one(student_id, &self.students, |s| {
            s.record_reminder_sent(last_reminder_sent_at)
        }))
    }
}
