use crate::error::AppError;
use crate::models::Profile;
use residency_platform_shared::UserRole;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

/// Resolves an authenticated caller to a profile and enforces role
/// membership. Every boundary operation goes through this one guard rather
/// than re-implementing role checks per endpoint.
#[derive(Clone)]
pub struct AccessGuard {
    pool: PgPool,
}

impl AccessGuard {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load the caller's profile. A valid token whose profile row has not
    /// been provisioned yet is Forbidden, not a server error.
    pub async fn resolve_profile(&self, user_id: Uuid) -> Result<Profile, AppError> {
        Profile::find_by_id(&self.pool, user_id)
            .await?
            .ok_or_else(|| AppError::Authorization("User profile not found".to_string()))
    }

    /// Pure set-membership role check after profile resolution.
    pub async fn require_role(
        &self,
        user_id: Uuid,
        allowed: &[UserRole],
    ) -> Result<Profile, AppError> {
        let profile = self.resolve_profile(user_id).await?;

        if !allowed.contains(&profile.role) {
            debug!(%user_id, role = %profile.role, "role check failed");
            return Err(AppError::Authorization(
                "Insufficient permissions for this operation".to_string(),
            ));
        }

        Ok(profile)
    }

    /// Staff/proprietor gate shared by all back-office operations.
    pub async fn require_back_office(&self, user_id: Uuid) -> Result<Profile, AppError> {
        self.require_role(user_id, &[UserRole::Staff, UserRole::Proprietor])
            .await
    }
}
