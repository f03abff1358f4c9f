//! User repository: account storage plus the credential and identity seams
//! the HTTP layer authenticates through.

use crate::{DbError, Result as DbErrorResult};

use lms_auth::password::{hash_password, verify_against_dummy, verify_password};
use lms_auth::{AuthError, Claims, CredentialVerifier, IdentityResolver};
use lms_core::{ErrorLocation, NewUser, User};

use std::panic::Location;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use sqlx::SqlitePool;

const SELECT_BY_ID: &str = r#"
    SELECT id, username, email, first_name, last_name, password_hash, is_active, date_joined
    FROM users
    WHERE id = ?
"#;

const SELECT_BY_USERNAME: &str = r#"
    SELECT id, username, email, first_name, last_name, password_hash, is_active, date_joined
    FROM users
    WHERE username = ?
"#;

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
    first_name: String,
    last_name: String,
    password_hash: String,
    is_active: bool,
    date_joined: i64,
}

impl TryFrom<UserRow> for User {
    type Error = DbError;

    #[track_caller]
    fn try_from(r: UserRow) -> Result<Self, Self::Error> {
        let date_joined: DateTime<Utc> =
            DateTime::from_timestamp(r.date_joined, 0).ok_or_else(|| DbError::Corrupt {
                table: "users",
                message: format!("invalid date_joined timestamp {}", r.date_joined),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(User {
            id: r.id,
            username: r.username,
            email: r.email,
            first_name: r.first_name,
            last_name: r.last_name,
            password_hash: r.password_hash,
            is_active: r.is_active,
            date_joined,
        })
    }
}

#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Validate, hash the password and insert. Returns the stored record.
    pub async fn create(&self, new_user: &NewUser) -> DbErrorResult<User> {
        new_user.validate()?;

        let password_hash = hash_blocking(new_user.password.clone()).await?;
        let date_joined = Utc::now().timestamp();

        let result = sqlx::query(
            r#"
                INSERT INTO users (
                    username, email, first_name, last_name,
                    password_hash, is_active, date_joined
                ) VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&new_user.first_name)
        .bind(&new_user.last_name)
        .bind(&password_hash)
        .bind(new_user.is_active)
        .bind(date_joined)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db) = &e
                && db.is_unique_violation()
            {
                return DbError::UsernameTaken {
                    username: new_user.username.clone(),
                    location: ErrorLocation::from(Location::caller()),
                };
            }
            DbError::from(e)
        })?;

        let id = result.last_insert_rowid();
        debug!("Created user {} ({})", new_user.username, id);

        self.find_by_id(id).await?.ok_or_else(|| DbError::Corrupt {
            table: "users",
            message: format!("user {} missing right after insert", id),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    pub async fn find_by_id(&self, id: i64) -> DbErrorResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(SELECT_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(User::try_from).transpose()
    }

    /// Exact (case-sensitive) username match
    pub async fn find_by_username(&self, username: &str) -> DbErrorResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(SELECT_BY_USERNAME)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        row.map(User::try_from).transpose()
    }

    /// Returns false when no such user exists
    pub async fn set_active(&self, id: i64, is_active: bool) -> DbErrorResult<bool> {
        let result = sqlx::query("UPDATE users SET is_active = ? WHERE id = ?")
            .bind(is_active)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Returns false when no such user exists
    pub async fn set_password(&self, id: i64, password: &str) -> DbErrorResult<bool> {
        let password_hash = hash_blocking(password.to_string()).await?;

        let result = sqlx::query("UPDATE users SET password_hash = ? WHERE id = ?")
            .bind(&password_hash)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl CredentialVerifier for UserRepository {
    async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> lms_auth::Result<User> {
        let user = self.find_by_username(username).await.map_err(store_error)?;
        let password = password.to_string();

        let Some(user) = user else {
            let _ = tokio::task::spawn_blocking(move || verify_against_dummy(&password))
                .await;
            debug!("Login rejected: unknown username");
            return Err(AuthError::InvalidCredentials {
                location: ErrorLocation::from(Location::caller()),
            });
        };

        let hash = user.password_hash.clone();
        let matches =
            tokio::task::spawn_blocking(move || verify_password(&password, &hash))
                .await
                .map_err(|e| AuthError::PasswordHash {
                    message: format!("verification task failed: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                })??;

        if !matches {
            debug!("Login rejected for user {}: wrong password", user.id);
            return Err(AuthError::InvalidCredentials {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if !user.is_active {
            debug!("Login rejected for user {}: account inactive", user.id);
            return Err(AuthError::InvalidCredentials {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(user)
    }
}

#[async_trait]
impl IdentityResolver for UserRepository {
    async fn resolve_identity(&self, claims: &Claims) -> lms_auth::Result<User> {
        let user = self
            .find_by_id(claims.user_id)
            .await
            .map_err(store_error)?
            .ok_or_else(|| AuthError::UserNotFound {
                user_id: claims.user_id,
                location: ErrorLocation::from(Location::caller()),
            })?;

        if !user.is_active {
            return Err(AuthError::InactiveAccount {
                user_id: user.id,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(user)
    }
}

#[track_caller]
fn store_error(e: DbError) -> AuthError {
    AuthError::Store {
        message: e.to_string(),
        location: ErrorLocation::from(Location::caller()),
    }
}

async fn hash_blocking(password: String) -> DbErrorResult<String> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| DbError::PasswordHash {
            message: format!("hashing task failed: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?
        .map_err(|e| DbError::PasswordHash {
            message: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
}
