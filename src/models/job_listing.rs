use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const STATUS_ACTIVE: &str = "Active";
pub const STATUS_CLOSED: &str = "Closed";

/// A job posting owned by one HR user. Rows are inserted by the external
/// create-job automation; this service only toggles `status`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobListing {
    pub id: Uuid,
    pub job_id: String,
    pub job_profile: String,
    pub company_name: String,
    pub job_description: String,
    pub education_required: Option<String>,
    pub location_type: Option<String>,
    pub expected_salary: Option<String>,
    pub ranking_criteria: Option<String>,
    pub status: String,
    pub hr_user_id: Uuid,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl JobListing {
    pub fn is_closed(&self) -> bool {
        self.status == STATUS_CLOSED
    }
}
