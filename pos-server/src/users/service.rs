//! Staff registration and login

use std::sync::Arc;

use shared::response::LoginResponse;
use shared::util::now_millis;
use shared::{Role, UserDetail};

use super::password::{hash_password, verify_password};
use crate::auth::JwtService;
use crate::db::repository::{RepoError, UserRepository};
use crate::security_log;
use crate::utils::{AppError, AppResult};

#[derive(Clone, Debug)]
pub struct UserService {
    repo: UserRepository,
    jwt_service: Arc<JwtService>,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl UserService {
    pub fn new(repo: UserRepository, jwt_service: Arc<JwtService>) -> Self {
        Self { repo, jwt_service }
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> AppResult<UserDetail> {
        let email = normalize_email(email);
        if self.repo.find_by_email(&email).await?.is_some() {
            return Err(AppError::DuplicateEmail);
        }

        let password_hash = hash_password(password)?;
        let user = self
            .repo
            .create(name.trim(), &email, &password_hash, role, now_millis())
            .await
            .map_err(|e| match e {
                RepoError::Duplicate(_) => AppError::DuplicateEmail,
                other => other.into(),
            })?;

        tracing::info!(user_id = %user.id, role = %user.role, "Staff user registered");
        Ok(user.into())
    }

    /// Same error for an unknown email and a wrong password
    pub async fn login(&self, email: &str, password: &str) -> AppResult<LoginResponse> {
        let email = normalize_email(email);
        let Some(user) = self.repo.find_by_email(&email).await? else {
            security_log!("WARN", "login_failed", reason = "unknown_email");
            return Err(AppError::InvalidCredentials);
        };

        if !verify_password(password, &user.password_hash) {
            security_log!(
                "WARN",
                "login_failed",
                reason = "bad_password",
                user_id = user.id.to_string()
            );
            return Err(AppError::InvalidCredentials);
        }

        let access_token = self
            .jwt_service
            .generate_token(&user.id.to_string(), &user.name, user.role)
            .map_err(|e| AppError::internal(e.to_string()))?;

        security_log!("INFO", "login_success", user_id = user.id.to_string());
        Ok(LoginResponse {
            access_token,
            expires_in: self.jwt_service.lifetime_seconds(),
            user: user.into(),
        })
    }
}
