use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_candidates: usize,
    pub active_jobs: usize,
    pub shortlisted: usize,
    /// Everything not yet shortlisted, including rejected and interviewed.
    pub pending: usize,
    pub jobs: Vec<JobApplicantCount>,
    pub recent_activity: Vec<ActivityEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobApplicantCount {
    pub job_id: String,
    pub job_profile: String,
    pub status: String,
    pub applicants: usize,
}

/// One line of the recent-activity feed: the latest analyzed resumes,
/// newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub candidate_id: Uuid,
    pub candidate_name: Option<String>,
    pub job_id: String,
    pub status: String,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}
