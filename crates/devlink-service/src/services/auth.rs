//! Authentication service
//!
//! Handles user registration, login, token refresh, and logout.

use devlink_cache::RefreshTokenData;
use devlink_common::auth::{hash_password, validate_password_strength, verify_password};
use devlink_core::entities::User;
use tracing::{info, instrument, warn};

use crate::dto::requests::{LoginRequest, LogoutRequest, RefreshTokenRequest, RegisterRequest};
use crate::dto::responses::{AuthResponse, CurrentUserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user
    #[instrument(skip(self, request), fields(username = %request.username, email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AuthResponse> {
        // Validate password strength before proceeding
        validate_password_strength(&request.password).map_err(ServiceError::from)?;

        // Check uniqueness of email and username
        if self.ctx.user_repo().email_exists(&request.email).await? {
            return Err(ServiceError::conflict("Email already registered"));
        }
        if self.ctx.user_repo().username_exists(&request.username).await? {
            return Err(ServiceError::conflict("Username already taken"));
        }

        // Hash password
        let password_hash =
            hash_password(&request.password).map_err(|e| ServiceError::internal(e.to_string()))?;

        // Create user
        let user_id = self.ctx.generate_id();
        let user = User::new(user_id, request.username, request.email);

        self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(user_id = %user_id, "User registered successfully");

        self.issue_tokens(&user).await
    }

    /// Login with email and password
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        // Find user by email
        let user = self
            .ctx
            .user_repo()
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| {
                warn!(email = %request.email, "Login failed: user not found");
                ServiceError::App(devlink_common::AppError::InvalidCredentials)
            })?;

        // Get password hash
        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Login failed: no password hash");
                ServiceError::App(devlink_common::AppError::InvalidCredentials)
            })?;

        // Verify password
        let is_valid = verify_password(&request.password, &password_hash)
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        if !is_valid {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(ServiceError::App(devlink_common::AppError::InvalidCredentials));
        }

        info!(user_id = %user.id, "User logged in");

        self.issue_tokens(&user).await
    }

    /// Exchange a valid refresh token for a new token pair
    #[instrument(skip(self, request))]
    pub async fn refresh(&self, request: RefreshTokenRequest) -> ServiceResult<AuthResponse> {
        // The token must both verify as a JWT and still exist in Redis
        let claims = self
            .ctx
            .jwt_service()
            .validate_refresh_token(&request.refresh_token)?;
        let user_id = claims.user_id()?;

        let stored = self
            .ctx
            .refresh_token_store()
            .validate(&request.refresh_token)
            .await
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        if stored.is_none() {
            warn!(user_id = %user_id, "Refresh failed: token revoked or expired");
            return Err(ServiceError::App(devlink_common::AppError::InvalidToken));
        }

        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::App(devlink_common::AppError::InvalidToken))?;

        // Rotate: revoke the old token before issuing the new pair
        self.ctx
            .refresh_token_store()
            .revoke(&request.refresh_token)
            .await
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        self.issue_tokens(&user).await
    }

    /// Logout: revoke the presented refresh token, or every session
    #[instrument(skip(self, request))]
    pub async fn logout(
        &self,
        user_id: devlink_core::Snowflake,
        request: LogoutRequest,
    ) -> ServiceResult<()> {
        if request.all_sessions {
            self.ctx
                .refresh_token_store()
                .revoke_all_for_user(user_id)
                .await
                .map_err(|e| ServiceError::internal(e.to_string()))?;
        } else if let Some(refresh_token) = request.refresh_token {
            self.ctx
                .refresh_token_store()
                .revoke(&refresh_token)
                .await
                .map_err(|e| ServiceError::internal(e.to_string()))?;
        }

        info!(user_id = %user_id, "User logged out");

        Ok(())
    }

    /// Generate a token pair and persist the refresh token session
    async fn issue_tokens(&self, user: &User) -> ServiceResult<AuthResponse> {
        let session_id = self.ctx.generate_id().to_string();
        let token_pair = self
            .ctx
            .jwt_service()
            .generate_token_pair_with_session(user.id, Some(session_id.clone()))
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        let refresh_data = RefreshTokenData::new(user.id, session_id);
        self.ctx
            .refresh_token_store()
            .store(&token_pair.refresh_token, &refresh_data)
            .await
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        Ok(AuthResponse::new(
            token_pair.access_token,
            token_pair.refresh_token,
            token_pair.expires_in,
            CurrentUserResponse::from(user),
        ))
    }
}

#[cfg(test)]
mod tests {
    // Auth flows are covered end-to-end by the integration tests, which need
    // live PostgreSQL and Redis instances.
}
