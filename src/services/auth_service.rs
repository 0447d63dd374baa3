use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use jsonwebtoken::{encode, EncodingKey, Header};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::middleware::auth::Claims;
use crate::models::hr_user::HrUser;

const SESSION_TTL_SECS: usize = 60 * 60 * 24;

#[derive(Clone)]
pub struct AuthService {
    pool: PgPool,
}

impl AuthService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn signup(&self, email: &str, password: &str, company_name: &str) -> Result<HrUser> {
        let existing = sqlx::query_scalar::<_, Uuid>("SELECT id FROM hr_users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        if existing.is_some() {
            return Err(Error::BadRequest(
                "An account with this email already exists".into(),
            ));
        }

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| Error::Internal(format!("Failed to hash password: {}", e)))?
            .to_string();

        let user = sqlx::query_as::<_, HrUser>(
            "INSERT INTO hr_users (email, password_hash, company_name) \
             VALUES ($1, $2, $3) \
             RETURNING id, email, password_hash, company_name, created_at",
        )
        .bind(email)
        .bind(password_hash)
        .bind(company_name)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn signin(&self, email: &str, password: &str) -> Result<HrUser> {
        let user = sqlx::query_as::<_, HrUser>(
            "SELECT id, email, password_hash, company_name, created_at \
             FROM hr_users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::Unauthorized("Invalid email or password".into()))?;

        let parsed = PasswordHash::new(&user.password_hash)
            .map_err(|_| Error::Internal("Corrupt password hash".into()))?;
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .map_err(|_| Error::Unauthorized("Invalid email or password".into()))?;
        Ok(user)
    }

    pub async fn get_user(&self, id: Uuid) -> Result<HrUser> {
        let user = sqlx::query_as::<_, HrUser>(
            "SELECT id, email, password_hash, company_name, created_at \
             FROM hr_users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("User not found".into()))?;
        Ok(user)
    }

    pub fn issue_token(&self, user: &HrUser) -> Result<String> {
        let config = crate::config::get_config();
        let claims = Claims {
            sub: user.id.to_string(),
            exp: chrono::Utc::now().timestamp() as usize + SESSION_TTL_SECS,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .map_err(|e| Error::Internal(format!("Failed to sign token: {}", e)))?;
        Ok(token)
    }
}
