use crate::error::AppError;
use chrono::{DateTime, Utc};
use residency_platform_shared::AuditAction;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use tracing::warn;
use uuid::Uuid;

/// An immutable record of a state-changing action. Append-only; the core
/// never updates or deletes rows in `admin_audit_log`.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct AuditLog {
    pub id: Uuid,
    pub actor_id: Option<Uuid>,
    pub action: String,
    pub target_id: Option<Uuid>,
    pub details: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl AuditLog {
    /// Append an audit entry. `actor_id` is `None` for system/webhook actors.
    pub async fn create(
        pool: &PgPool,
        actor_id: Option<Uuid>,
        action: AuditAction,
        target_id: Option<Uuid>,
        details: serde_json::Value,
    ) -> Result<Self, AppError> {
        let entry = sqlx::query_as::<_, AuditLog>(
            "INSERT INTO admin_audit_log (actor_id, action, target_id, details) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, actor_id, action, target_id, details, created_at",
        )
        .bind(actor_id)
        .bind(action.as_str())
        .bind(target_id)
        .bind(details)
        .fetch_one(pool)
        .await?;

        Ok(entry)
    }

    /// Best-effort append: the business transition has already committed, so
    /// a failed audit write is logged and swallowed rather than rolled back.
    pub async fn record(
        pool: &PgPool,
        actor_id: Option<Uuid>,
        action: AuditAction,
        target_id: Option<Uuid>,
        details: serde_json::Value,
    ) {
        if let Err(e) = Self::create(pool, actor_id, action, target_id, details).await {
            warn!(
                action = action.as_str(),
                error = %e,
                "failed to write audit log entry"
            );
        }
    }
}
