use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Raw submission from the public apply form. Immutable once inserted; the
/// `(email, job_id)` pair is the join key back from analyzed resumes.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Applicant {
    pub id: Uuid,
    pub job_id: String,
    pub name: String,
    pub email: String,
    pub cv_url: String,
    pub created_at: Option<DateTime<Utc>>,
}
