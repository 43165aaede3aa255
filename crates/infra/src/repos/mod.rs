mod shared;
mod student;

use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use student::{IStudentRepo, InMemoryStudentRepo, PostgresStudentRepo};
use tracing::info;

#[derive(Clone)]
pub struct Repos {
    pub students: Arc<dyn IStudentRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");

        info!("DB RUNNING MIGRATIONS ...");
        sqlx::migrate!().run(&pool).await?;
        info!("DB RUNNING MIGRATIONS ... [done]");

        Ok(Self {
            students: Arc::new(PostgresStudentRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            students: Arc::new(InMemoryStudentRepo::new()),
        }
    }
}
