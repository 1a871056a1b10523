//! Registration, authentication and session token service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use validator::Validate;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::{
        user::{LoginForm, RegisterForm, SessionClaims, User},
        validation_message, Identity,
    },
    repository::Repository,
};

const INVALID_CREDENTIALS: &str = "Invalid email or password.";

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
    config: AuthConfig,
}

impl UsersService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Create an account and open a session for it.
    /// Returns the new user and its session token.
    pub async fn register(&self, form: &RegisterForm) -> AppResult<(User, String)> {
        let form = form.trimmed();
        form.validate()
            .map_err(|e| AppError::Validation(validation_message(&e)))?;

        let email = form.email.as_str();
        if self.repository.users.email_exists(email).await? {
            return Err(AppError::Conflict("Email is already registered!".to_string()));
        }

        let password_hash = self.hash_password(&form.password)?;
        // The unique index still guards against a concurrent registration
        let user = self
            .repository
            .users
            .create(&form.username, email, &password_hash)
            .await?;

        tracing::info!(user_id = user.id, "Registered new user");

        let token = self.create_token_for_user(&user)?;
        Ok((user, token))
    }

    /// Authenticate by email and password and return a session token
    pub async fn authenticate(&self, form: &LoginForm) -> AppResult<(User, String)> {
        let form = form.trimmed();
        form.validate()
            .map_err(|e| AppError::Validation(validation_message(&e)))?;

        let user = match self.repository.users.get_by_email(&form.email).await? {
            Some(user) => user,
            None => {
                tracing::warn!("Login attempt for unknown email");
                return Err(AppError::Authentication(INVALID_CREDENTIALS.to_string()));
            }
        };

        if !self.verify_password(&user, &form.password)? {
            tracing::warn!(user_id = user.id, "Login attempt with incorrect password");
            return Err(AppError::Authentication(INVALID_CREDENTIALS.to_string()));
        }

        let token = self.create_token_for_user(&user)?;
        Ok((user, token))
    }

    /// Resolve a session token into the caller's identity
    pub fn identity_from_token(&self, token: &str) -> AppResult<Identity> {
        SessionClaims::from_token(token, &self.config.secret_key)
            .map(|claims| claims.identity())
            .map_err(|e| AppError::Authentication(e.to_string()))
    }

    /// Create JWT token for a user
    fn create_token_for_user(&self, user: &User) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let exp = now + (self.config.session_hours as i64 * 3600);

        let claims = SessionClaims {
            sub: user.email.clone(),
            user_id: user.id,
            name: user.name.clone(),
            exp,
            iat: now,
        };

        claims
            .create_token(&self.config.secret_key)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    /// Verify user password
    fn verify_password(&self, user: &User, password: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(&user.password_hash)
            .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash a password using Argon2
    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }
}
