use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Shortlink {
    pub id: String,
    pub job_listing_id: Uuid,
    pub created_at: Option<DateTime<Utc>>,
}
