// src/contact/mod.rs
// Contact form submissions, accepted only from authenticated sessions

mod sink;

pub use sink::{ContactSink, SqliteContactSink};

use serde::Deserialize;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::auth::{AuthGate, Authorization};
use crate::session::Session;

#[derive(Error, Debug)]
pub enum ContactError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Form body posted to `/contact`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ContactSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub message: String,
}

impl ContactSubmission {
    /// Names of required fields that are blank. Phone is optional.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("email", &self.email),
            ("message", &self.message),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            message: self.message.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactOutcome {
    Accepted {
        session: Session,
    },
    Invalid {
        session: Session,
        submission: ContactSubmission,
        missing: Vec<&'static str>,
    },
    RedirectToLogin,
}

/// Routes submissions through the auth gate to the configured sink.
pub struct ContactDesk {
    gate: Arc<AuthGate>,
    sink: Arc<dyn ContactSink>,
}

impl ContactDesk {
    pub fn new(gate: Arc<AuthGate>, sink: Arc<dyn ContactSink>) -> Self {
        Self { gate, sink }
    }

    /// Deliver a submission on behalf of the session behind `token`.
    ///
    /// `read_fields` is only called once the caller is authorized, so an
    /// anonymous request body is never decoded. `None` means the body could
    /// not be read as a form and counts as every required field missing.
    pub async fn submit<F, Fut>(
        &self,
        token: Option<&str>,
        read_fields: F,
    ) -> Result<ContactOutcome, ContactError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Option<ContactSubmission>>,
    {
        let session = match self.gate.authorize(token).await {
            Authorization::Allowed(session) => session,
            Authorization::RedirectToLogin => return Ok(ContactOutcome::RedirectToLogin),
        };

        let submission = read_fields().await.unwrap_or_default();
        let missing = submission.missing_fields();
        if !missing.is_empty() {
            return Ok(ContactOutcome::Invalid {
                session,
                submission,
                missing,
            });
        }

        self.sink
            .deliver(&session.username, &submission.trimmed())
            .await?;
        info!(username = %session.username, "Contact message accepted");

        Ok(ContactOutcome::Accepted { session })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::UserStore;
    use crate::db::{create_memory_pool, run_migrations};
    use crate::session::InMemorySessionStore;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn fields(
        submission: ContactSubmission,
    ) -> impl FnOnce() -> std::future::Ready<Option<ContactSubmission>> {
        move || std::future::ready(Some(submission))
    }

    fn filled() -> ContactSubmission {
        ContactSubmission {
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            phone: "+1234567890".to_string(),
            message: "This is a test message for the contact form.".to_string(),
        }
    }

    async fn desk() -> (ContactDesk, Arc<AuthGate>, Arc<SqliteContactSink>) {
        let pool = create_memory_pool().await.unwrap();
        run_migrations(&pool).await.unwrap();
        let users = UserStore::new(pool.clone(), 4);
        users.create_user("testuser", "testpass123").await.unwrap();

        let sessions = Arc::new(InMemorySessionStore::new(chrono::Duration::hours(1)));
        let gate = Arc::new(AuthGate::new(users, sessions));
        let sink = Arc::new(SqliteContactSink::new(pool));
        (ContactDesk::new(gate.clone(), sink.clone()), gate, sink)
    }

    #[test]
    fn test_missing_fields() {
        assert!(filled().missing_fields().is_empty());

        let blank = ContactSubmission {
            name: "   ".to_string(),
            phone: String::new(),
            ..filled()
        };
        assert_eq!(blank.missing_fields(), vec!["name"]);
        assert_eq!(
            ContactSubmission::default().missing_fields(),
            vec!["name", "email", "message"]
        );
    }

    #[tokio::test]
    async fn test_anonymous_submission_redirects_without_storing() {
        let (desk, _, sink) = desk().await;

        let outcome = desk.submit(None, fields(filled())).await.unwrap();
        assert_eq!(outcome, ContactOutcome::RedirectToLogin);

        let outcome = desk
            .submit(Some("forged-token"), fields(filled()))
            .await
            .unwrap();
        assert_eq!(outcome, ContactOutcome::RedirectToLogin);
        assert_eq!(sink.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_anonymous_body_is_never_read() {
        let (desk, _, sink) = desk().await;
        let read = AtomicBool::new(false);

        let outcome = desk
            .submit(None, || async {
                read.store(true, Ordering::SeqCst);
                Some(filled())
            })
            .await
            .unwrap();

        assert_eq!(outcome, ContactOutcome::RedirectToLogin);
        assert!(!read.load(Ordering::SeqCst));
        assert_eq!(sink.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unreadable_body_is_invalid() {
        let (desk, gate, sink) = desk().await;
        let session = gate.authenticate("testuser", "testpass123").await.unwrap();

        let outcome = desk
            .submit(Some(&session.token), || std::future::ready(None))
            .await
            .unwrap();

        match outcome {
            ContactOutcome::Invalid {
                submission,
                missing,
                ..
            } => {
                assert_eq!(submission, ContactSubmission::default());
                assert_eq!(missing, vec!["name", "email", "message"]);
            }
            other => panic!("expected Invalid, got {:?}", other),
        }
        assert_eq!(sink.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_authenticated_submission_is_stored() {
        let (desk, gate, sink) = desk().await;
        let session = gate.authenticate("testuser", "testpass123").await.unwrap();

        let outcome = desk
            .submit(Some(&session.token), fields(filled()))
            .await
            .unwrap();
        assert!(matches!(outcome, ContactOutcome::Accepted { .. }));
        assert_eq!(sink.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_incomplete_submission_is_not_stored() {
        let (desk, gate, sink) = desk().await;
        let session = gate.authenticate("testuser", "testpass123").await.unwrap();

        let partial = ContactSubmission {
            message: String::new(),
            ..filled()
        };
        let outcome = desk
            .submit(Some(&session.token), fields(partial))
            .await
            .unwrap();

        match outcome {
            ContactOutcome::Invalid { missing, .. } => assert_eq!(missing, vec!["message"]),
            other => panic!("expected Invalid, got {:?}", other),
        }
        assert_eq!(sink.count().await.unwrap(), 0);
    }
}
