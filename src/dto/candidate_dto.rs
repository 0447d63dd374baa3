use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::analyzed_resume::{AnalyzedResume, CandidateStatus};

#[derive(Debug, Clone, Deserialize)]
pub struct CandidateListQuery {
    pub job_id: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateResponse {
    pub id: Uuid,
    pub job_id: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub email: Option<String>,
    pub educational_details: Option<String>,
    pub job_history: Option<String>,
    pub skills: Option<String>,
    pub summarize: Option<String>,
    pub consideration: Option<String>,
    pub rating: f64,
    pub match_percent: f64,
    pub status: CandidateStatus,
    pub cv_url: Option<String>,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl CandidateResponse {
    /// `cv_url` is the resume row's own link when present, otherwise the
    /// fallback recovered from the matching applicant row.
    pub fn from_resume(resume: AnalyzedResume, cv_fallback: Option<String>) -> Self {
        let rating = resume.rating();
        let match_percent = resume.match_percent();
        let status = resume.workflow_status();
        let cv_url = resume
            .cv_url
            .clone()
            .filter(|url| !url.trim().is_empty())
            .or(cv_fallback);
        Self {
            id: resume.id,
            job_id: resume.job_id,
            name: resume.name,
            phone: resume.phone,
            city: resume.city,
            email: resume.email,
            educational_details: resume.educational_details,
            job_history: resume.job_history,
            skills: resume.skills,
            summarize: resume.summarize,
            consideration: resume.consideration,
            rating,
            match_percent,
            status,
            cv_url,
            created_at: resume.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateListResponse {
    pub items: Vec<CandidateResponse>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ShortlistPayload {
    #[validate(length(min = 1))]
    pub job_id: String,
    #[validate(length(min = 1))]
    pub candidate_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationOutcome {
    Sent,
    Failed,
}

/// Shortlisting is two-phase: the status mutation commits first, then the
/// notification webhook fires. A failed notification never rolls the
/// mutation back, so the outcome is reported explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortlistResponse {
    pub shortlisted: usize,
    pub auto_rejected: usize,
    pub notification: NotificationOutcome,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ComparePayload {
    #[validate(length(min = 1))]
    pub job_id: String,
    pub candidate_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareResponse {
    pub rankings: Vec<ComparisonRanking>,
}

/// One entry of the external comparison service's ranked result. Order is
/// trusted as given; no local re-sorting or tie-breaking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonRanking {
    pub rank: u32,
    pub candidate_name: Option<String>,
    pub overall_score: f64,
    pub match_summary: Option<String>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    pub recommendation: Option<String>,
}
