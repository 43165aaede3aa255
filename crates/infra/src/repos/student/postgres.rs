use super::IStudentRepo;
use student_progress_domain::{Student, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresStudentRepo {
    pool: PgPool,
}

impl PostgresStudentRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct StudentRaw {
    student_uid: Uuid,
    name: String,
    email: String,
    phone: Option<String>,
    handle: String,
    current_rating: i64,
    max_rating: i64,
    last_submission_date: Option<i64>,
    reminders_sent: i64,
    allow_reminder: bool,
    last_reminder_sent_at: Option<i64>,
}

impl From<StudentRaw> for Student {
    fn from(raw: StudentRaw) -> Self {
        Self {
            id: raw.student_uid.into(),
            name: raw.name,
            email: raw.email,
            phone: raw.phone,
            handle: raw.handle,
            current_rating: raw.current_rating,
            max_rating: raw.max_rating,
            last_submission_date: raw.last_submission_date,
            reminders_sent: raw.reminders_sent,
            allow_reminder: raw.allow_reminder,
            last_reminder_sent_at: raw.last_reminder_sent_at,
        }
    }
}

#[async_trait::async_trait]
impl IStudentRepo for PostgresStudentRepo {
    async fn insert(&self, student: &Student) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO students
            (student_uid, name, email, phone, handle, current_rating, max_rating,
            last_submission_date, reminders_sent, allow_reminder, last_reminder_sent_at)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(student.id.inner_ref())
        .bind(&student.name)
        .bind(&student.email)
        .bind(&student.phone)
        .bind(&student.handle)
        .bind(student.current_rating)
        .bind(student.max_rating)
        .bind(student.last_submission_date)
        .bind(student.reminders_sent)
        .bind(student.allow_reminder)
        .bind(student.last_reminder_sent_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save(&self, student: &Student) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE students
            SET name = $2,
            email = $3,
            phone = $4,
            handle = $5,
            current_rating = $6,
            max_rating = $7,
            last_submission_date = $8,
            allow_reminder = $9
            WHERE student_uid = $1
            "#,
        )
        .bind(student.id.inner_ref())
        .bind(&student.name)
        .bind(&student.email)
        .bind(&student.phone)
        .bind(&student.handle)
        .bind(student.current_rating)
        .bind(student.max_rating)
        .bind(student.last_submission_date)
        .bind(student.allow_reminder)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, student_id: &ID) -> Option<Student> {
        sqlx::query_as::<_, StudentRaw>(
            r#"
            DELETE FROM students AS s
            WHERE s.student_uid = $1
            RETURNING *
            "#,
        )
        .bind(student_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|student| student.into())
    }

    async fn find(&self, student_id: &ID) -> Option<Student> {
        sqlx::query_as::<_, StudentRaw>(
            r#"
            SELECT * FROM students AS s
            WHERE s.student_uid = $1
            "#,
        )
        .bind(student_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|student| student.into())
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Student>> {
        let students = sqlx::query_as::<_, StudentRaw>(
            r#"
            SELECT * FROM students AS s
            ORDER BY s.student_uid
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(students.into_iter().map(|s| s.into()).collect())
    }

    async fn find_eligible_for_reminder(
        &self,
        now: i64,
        threshold_millis: i64,
    ) -> anyhow::Result<Vec<Student>> {
        let inactive_before = Student::inactivity_cutoff(now, threshold_millis);
        let students = sqlx::query_as::<_, StudentRaw>(
            r#"
            SELECT * FROM students AS s
            WHERE s.allow_reminder AND
            (s.last_submission_date IS NULL OR s.last_submission_date < $1)
            ORDER BY s.student_uid
            "#,
        )
        .bind(inactive_before)
        .fetch_all(&self.pool)
        .await?;

        Ok(students.into_iter().map(|s| s.into()).collect())
    }

    async fn update_reminder_fields(
        &self,
        student_id: &ID,
        last_reminder_sent_at: i64,
    ) -> anyhow::Result<Option<Student>> {
        let student = sqlx::query_as::<_, StudentRaw>(
            r#"
            UPDATE students
            SET reminders_sent = reminders_sent + 1,
            last_reminder_sent_at = $2
            WHERE student_uid = $1
            RETURNING *
            "#,
        )
        .bind(student_id.inner_ref())
        .bind(last_reminder_sent_at)
        .fetch_optional(&self.pool)
        .await?;

        Ok(student.map(|s| s.into()))
    }
}
