use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct OAuthSession {
    pub id: Uuid,
    pub client_id: String,
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
    pub logged_out_at: Option<DateTime<Utc>>,
}

impl OAuthSession {
    pub fn is_live(&self) -> bool {
        self.revoked_at.is_none() && self.logged_out_at.is_none()
    }
}
