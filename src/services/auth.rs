//! Admin authentication against the configured credential

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::AdminClaims,
};

#[derive(Clone)]
pub struct AuthService {
    config: AuthConfig,
}

impl AuthService {
    pub fn new(config: AuthConfig) -> Self {
        if config.admin_password_hash.is_empty() {
            tracing::warn!("auth.admin_password_hash is empty, admin login is disabled");
        }
        Self { config }
    }

    /// Check the admin credential and issue a bearer token.
    /// Returns the token and its claims.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<(String, AdminClaims)> {
        if self.config.admin_password_hash.is_empty() {
            return Err(AppError::Authentication("Admin login is not configured".to_string()));
        }

        let parsed = PasswordHash::new(&self.config.admin_password_hash)
            .map_err(|e| AppError::Internal(format!("Invalid admin password hash: {}", e)))?;

        let password_ok = Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok();

        if username != self.config.admin_username || !password_ok {
            tracing::warn!(username, "Rejected admin login");
            return Err(AppError::Authentication("Invalid username or password".to_string()));
        }

        let now = Utc::now().timestamp();
        let claims = AdminClaims {
            sub: self.config.admin_username.clone(),
            iat: now,
            exp: now + (self.config.jwt_expiration_hours as i64 * 3600),
        };

        let token = claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))?;

        tracing::info!(username, "Admin logged in");
        Ok((token, claims))
    }

    /// Validate a bearer token issued by [`AuthService::login`]
    pub fn verify_token(&self, token: &str) -> AppResult<AdminClaims> {
        let claims = AdminClaims::from_token(token, &self.config.jwt_secret)
            .map_err(|e| AppError::Authentication(e.to_string()))?;
        if claims.sub != self.config.admin_username {
            return Err(AppError::Authentication("Unknown subject".to_string()));
        }
        Ok(claims)
    }
}

/// Hash a password into the PHC string expected by `auth.admin_password_hash`
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}
