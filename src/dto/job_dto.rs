use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::job_listing::JobListing;

/// Draft forwarded to the external create-job automation. The automation
/// writes the listing row and answers with its identifiers.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateJobPayload {
    #[validate(length(min = 1))]
    pub job_prompt: String,
    #[validate(length(min = 1))]
    pub education_required: String,
    #[validate(length(min = 1))]
    pub location_type: String,
    pub expected_salary: Option<String>,
    pub ranking_criteria: Option<String>,
    pub interview_questions: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateJobResponse {
    pub id: Uuid,
    pub job_id: String,
    /// None when the shortlink insert failed after the listing was created;
    /// the id-based apply link still works.
    pub short_id: Option<String>,
    pub apply_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct EnhanceDescriptionPayload {
    #[validate(length(min = 1))]
    pub job_description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EnhanceDescriptionResponse {
    pub enhanced_jd: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JobResponse {
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
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<JobListing> for JobResponse {
    fn from(job: JobListing) -> Self {
        Self {
            id: job.id,
            job_id: job.job_id,
            job_profile: job.job_profile,
            company_name: job.company_name,
            job_description: job.job_description,
            education_required: job.education_required,
            location_type: job.location_type,
            expected_salary: job.expected_salary,
            ranking_criteria: job.ranking_criteria,
            status: job.status,
            created_at: job.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JobListResponse {
    pub items: Vec<JobResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateJobStatusPayload {
    #[validate(length(min = 1))]
    pub status: String,
}
