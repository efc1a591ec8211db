// src/contact/sink.rs

use async_trait::async_trait;
use sqlx::SqlitePool;

use super::{ContactError, ContactSubmission};

/// Destination for accepted contact messages.
#[async_trait]
pub trait ContactSink: Send + Sync {
    async fn deliver(
        &self,
        username: &str,
        submission: &ContactSubmission,
    ) -> Result<(), ContactError>;
}

/// Stores messages in the `contact_messages` table.
pub struct SqliteContactSink {
    db: SqlitePool,
}

impl SqliteContactSink {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn count(&self) -> Result<i64, ContactError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM contact_messages")
            .fetch_one(&self.db)
            .await?;
        Ok(count.0)
    }
}

#[async_trait]
impl ContactSink for SqliteContactSink {
    async fn deliver(
        &self,
        username: &str,
        submission: &ContactSubmission,
    ) -> Result<(), ContactError> {
        sqlx::query(
            r#"
            INSERT INTO contact_messages (username, name, email, phone, message, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(username)
        .bind(&submission.name)
        .bind(&submission.email)
        .bind(&submission.phone)
        .bind(&submission.message)
        .bind(chrono::Utc::now().timestamp())
        .execute(&self.db)
        .await?;

        Ok(())
    }
}
