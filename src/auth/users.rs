// src/auth/users.rs

use sqlx::SqlitePool;

use super::AuthError;
use super::password::spawn_hash_password;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub created_at: i64,
}

/// User records in the `users` table.
#[derive(Clone)]
pub struct UserStore {
    db: SqlitePool,
    bcrypt_cost: u32,
}

impl UserStore {
    pub fn new(db: SqlitePool, bcrypt_cost: u32) -> Self {
        Self { db, bcrypt_cost }
    }

    pub fn bcrypt_cost(&self) -> u32 {
        self.bcrypt_cost
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, AuthError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash, created_at FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.db)
        .await?;

        Ok(user)
    }

    /// Store a new user, hashing the plaintext password before it touches the database.
    pub async fn create_user(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::EmptyCredentials);
        }

        if self.username_exists(username).await? {
            return Err(AuthError::UsernameTaken(username.to_string()));
        }

        let password_hash = spawn_hash_password(password, self.bcrypt_cost).await?;
        let now = chrono::Utc::now().timestamp();

        let result = sqlx::query(
            "INSERT INTO users (username, password_hash, created_at) VALUES (?, ?, ?)",
        )
        .bind(username)
        .bind(&password_hash)
        .bind(now)
        .execute(&self.db)
        .await?;

        Ok(User {
            id: result.last_insert_rowid(),
            username: username.to_string(),
            password_hash,
            created_at: now,
        })
    }

    async fn username_exists(&self, username: &str) -> Result<bool, AuthError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE username = ?")
            .bind(username)
            .fetch_one(&self.db)
            .await?;

        Ok(count.0 > 0)
    }
}
