use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::auth_dto::RegisterPayload;
use crate::error::{Error, Result};
use crate::models::session::Session;
use crate::models::user::{CurrentUser, Role, User};
use crate::utils::{crypto, token};

#[derive(Clone)]
pub struct AuthService {
    pool: PgPool,
    session_ttl_hours: i64,
}

impl AuthService {
    pub fn new(pool: PgPool, session_ttl_hours: i64) -> Self {
        Self {
            pool,
            session_ttl_hours,
        }
    }

    /// Creates the user and its profile in one transaction; a failure on
    /// either leaves no partial write behind.
    pub async fn register(&self, payload: RegisterPayload) -> Result<(User, Role)> {
        let role = Role::parse(&payload.role)
            .ok_or_else(|| Error::BadRequest(format!("unknown role: {}", payload.role)))?;
        let password_hash = crypto::hash_password(&payload.password)?;

        let mut tx = self.pool.begin().await?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, password_hash, created_at
            "#,
        )
        .bind(&payload.username)
        .bind(&payload.email)
        .bind(&password_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_registration_conflict)?;

        sqlx::query("INSERT INTO profiles (user_id, role) VALUES ($1, $2)")
            .bind(user.id)
            .bind(role)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok((user, role))
    }

    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        let Some(user) = user else {
            return Err(Error::InvalidCredentials);
        };
        if !crypto::verify_password(password, &user.password_hash)? {
            return Err(Error::InvalidCredentials);
        }
        Ok(user)
    }

    pub async fn find_role(&self, user_id: Uuid) -> Result<Option<Role>> {
        let role = sqlx::query_scalar::<_, Role>("SELECT role FROM profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(role)
    }

    pub async fn open_session(&self, user_id: Uuid) -> Result<Session> {
        let token = token::generate_session_token();
        let expires_at = Utc::now() + Duration::hours(self.session_ttl_hours);

        let session = sqlx::query_as::<_, Session>(
            r#"
            INSERT INTO sessions (token, user_id, expires_at)
            VALUES ($1, $2, $3)
            RETURNING id, token, user_id, created_at, expires_at
            "#,
        )
        .bind(&token)
        .bind(user_id)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(session)
    }

    /// Resolves a bearer token to the identity behind it. Expired or
    /// unknown tokens yield None; the profile join is LEFT so an account
    /// without one still authenticates and fails later at `require_role`.
    pub async fn resolve_session(&self, token: &str) -> Result<Option<CurrentUser>> {
        let user = sqlx::query_as::<_, CurrentUser>(
            r#"
            SELECT u.id, u.username, u.email, p.role
            FROM sessions s
            JOIN users u ON u.id = s.user_id
            LEFT JOIN profiles p ON p.user_id = u.id
            WHERE s.token = $1 AND s.expires_at > NOW()
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    /// Idempotent; revoking an unknown token is not an error.
    pub async fn revoke_session(&self, token: &str) -> Result<()> {
        sqlx::query("DELETE FROM sessions WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

fn map_registration_conflict(err: sqlx::Error) -> Error {
    if let sqlx::Error::Database(ref db) = err {
        match db.constraint() {
            Some("users_username_key") => {
                return Error::Conflict("username already taken".to_string())
            }
            Some("users_email_key") => {
                return Error::Conflict("email already registered".to_string())
            }
            _ => {}
        }
    }
    err.into()
}
