use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Row written by the external resume-analyzer automation. `status` is the
/// only column this service mutates.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AnalyzedResume {
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
    pub vote: Option<String>,
    pub consideration: Option<String>,
    pub status: Option<String>,
    pub cv_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Workflow state of a candidate. A missing or empty `status` column always
/// reads as `New`; the analyzer does not set it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateStatus {
    New,
    Shortlisted,
    Rejected,
    Interviewed,
}

impl CandidateStatus {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") | Some("new") => CandidateStatus::New,
            Some("shortlisted") => CandidateStatus::Shortlisted,
            Some("rejected") => CandidateStatus::Rejected,
            Some("interviewed") => CandidateStatus::Interviewed,
            // Unknown states from the automation are surfaced as-is in the raw
            // column but classified as New so they stay actionable.
            Some(_) => CandidateStatus::New,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CandidateStatus::New => "new",
            CandidateStatus::Shortlisted => "shortlisted",
            CandidateStatus::Rejected => "rejected",
            CandidateStatus::Interviewed => "interviewed",
        }
    }
}

impl AnalyzedResume {
    pub fn workflow_status(&self) -> CandidateStatus {
        CandidateStatus::parse(self.status.as_deref())
    }

    /// Whether the candidate is still in the default unscored state, i.e.
    /// eligible for the auto-reject sweep after a shortlist action.
    pub fn is_unscored(&self) -> bool {
        self.workflow_status() == CandidateStatus::New
    }

    /// Numeric 0-10 rating. The `vote` column is numeric-as-text; legacy rows
    /// from an earlier automation revision carry categorical yes/maybe/no
    /// values, mapped through a fixed table. Anything unparseable is 0.
    pub fn rating(&self) -> f64 {
        match self.vote.as_deref().map(str::trim) {
            None | Some("") => 0.0,
            Some("yes") => 10.0,
            Some("maybe") => 5.0,
            Some("no") => 0.0,
            Some(raw) => raw.parse::<f64>().unwrap_or(0.0).clamp(0.0, 10.0),
        }
    }

    /// Role-match percentage shown alongside the rating:
    /// `10 * clamp(rating, 0, 10)`.
    pub fn match_percent(&self) -> f64 {
        self.rating() * 10.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resume(vote: Option<&str>, status: Option<&str>) -> AnalyzedResume {
        AnalyzedResume {
            id: Uuid::new_v4(),
            job_id: "JOB-1".into(),
            name: Some("Alice".into()),
            phone: None,
            city: None,
            email: Some("alice@example.com".into()),
            educational_details: None,
            job_history: None,
            skills: None,
            summarize: None,
            vote: vote.map(Into::into),
            consideration: None,
            status: status.map(Into::into),
            cv_url: None,
            created_at: None,
        }
    }

    #[test]
    fn missing_or_empty_status_reads_as_new() {
        assert_eq!(resume(None, None).workflow_status(), CandidateStatus::New);
        assert_eq!(
            resume(None, Some("")).workflow_status(),
            CandidateStatus::New
        );
        assert_eq!(
            resume(None, Some("new")).workflow_status(),
            CandidateStatus::New
        );
        assert!(resume(None, Some("  ")).is_unscored());
    }

    #[test]
    fn explicit_states_parse_exactly() {
        assert_eq!(
            resume(None, Some("shortlisted")).workflow_status(),
            CandidateStatus::Shortlisted
        );
        assert_eq!(
            resume(None, Some("rejected")).workflow_status(),
            CandidateStatus::Rejected
        );
        assert_eq!(
            resume(None, Some("interviewed")).workflow_status(),
            CandidateStatus::Interviewed
        );
        assert!(!resume(None, Some("interviewed")).is_unscored());
    }

    #[test]
    fn match_percent_is_ten_times_clamped_rating() {
        assert_eq!(resume(Some("7"), None).match_percent(), 70.0);
        assert_eq!(resume(Some("7.5"), None).match_percent(), 75.0);
        assert_eq!(resume(Some("15"), None).match_percent(), 100.0);
        assert_eq!(resume(Some("-3"), None).match_percent(), 0.0);
        assert_eq!(resume(Some("not-a-number"), None).match_percent(), 0.0);
        assert_eq!(resume(None, None).match_percent(), 0.0);
    }

    #[test]
    fn legacy_categorical_votes_map_to_fixed_ratings() {
        assert_eq!(resume(Some("yes"), None).rating(), 10.0);
        assert_eq!(resume(Some("maybe"), None).rating(), 5.0);
        assert_eq!(resume(Some("no"), None).rating(), 0.0);
    }
}
