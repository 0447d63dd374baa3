use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use bytes::Bytes;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use tracing::{error, info};
use uuid::Uuid;

use crate::dto::candidate_dto::ComparisonRanking;
use crate::error::{Error, Result};
use crate::models::analyzed_resume::AnalyzedResume;
use crate::models::job_listing::JobListing;

/// Identifiers the create-job automation answers with after writing the
/// listing row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedListing {
    pub id: Uuid,
    pub job_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobDraft {
    pub job_prompt: String,
    pub hr_user_id: Uuid,
    pub company_name: String,
    pub education_required: String,
    pub location_type: String,
    pub expected_salary: Option<String>,
    pub ranking_criteria: Option<String>,
    pub interview_questions: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EnhancedDescription {
    enhanced_jd: String,
}

/// The enhance endpoint answers either a bare object or a one-element
/// array around the same object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EnhanceReply {
    Single(EnhancedDescription),
    Batch(Vec<EnhancedDescription>),
}

/// Known shapes of the comparison service's reply: a bare ranking array, a
/// wrapped `message.content` array, or `message.content` as a JSON-encoded
/// string needing a second parse. Anything else is an explicit format
/// error, never a partial result.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ComparisonReply {
    Rankings(Vec<ComparisonRanking>),
    Wrapped { message: ComparisonMessage },
}

#[derive(Debug, Deserialize)]
struct ComparisonMessage {
    content: ComparisonContent,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ComparisonContent {
    Rankings(Vec<ComparisonRanking>),
    Encoded(String),
}

pub fn normalize_comparison_reply(raw: JsonValue) -> Result<Vec<ComparisonRanking>> {
    let reply: ComparisonReply = serde_json::from_value(raw)
        .map_err(|_| Error::UnexpectedFormat("candidate comparison service"))?;
    match reply {
        ComparisonReply::Rankings(rankings) => Ok(rankings),
        ComparisonReply::Wrapped { message } => match message.content {
            ComparisonContent::Rankings(rankings) => Ok(rankings),
            ComparisonContent::Encoded(text) => serde_json::from_str(&text)
                .map_err(|_| Error::UnexpectedFormat("candidate comparison service")),
        },
    }
}

/// Client for the externally hosted automation webhooks. Every call is a
/// single synchronous request/response pair: no retries, no idempotency
/// keys, no delivery confirmation.
#[derive(Clone)]
pub struct AutomationService {
    client: Client,
    create_job_url: String,
    enhance_jd_url: String,
    resume_analyzer_url: String,
    shortlist_url: String,
    compare_url: String,
}

impl AutomationService {
    pub fn new(client: Client) -> Self {
        let config = crate::config::get_config();
        Self {
            client,
            create_job_url: config.create_job_webhook_url.clone(),
            enhance_jd_url: config.enhance_jd_webhook_url.clone(),
            resume_analyzer_url: config.resume_analyzer_webhook_url.clone(),
            shortlist_url: config.shortlist_webhook_url.clone(),
            compare_url: config.compare_webhook_url.clone(),
        }
    }

    /// Post the full job draft; the automation writes the listing and
    /// returns its identifiers.
    pub async fn create_job(&self, draft: &JobDraft) -> Result<CreatedListing> {
        info!(
            "Submitting job draft to create-job automation for user {}",
            draft.hr_user_id
        );
        let response = self
            .client
            .post(&self.create_job_url)
            .json(draft)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Create-job automation failed with status {}: {}", status, body);
            return Err(Error::Internal(format!(
                "Create-job automation returned {}",
                status
            )));
        }

        let created = response
            .json::<CreatedListing>()
            .await
            .map_err(|_| Error::UnexpectedFormat("create-job automation"))?;
        Ok(created)
    }

    /// Rewrite a draft description. A failure leaves the caller's draft
    /// untouched; this only ever returns the enhanced text.
    pub async fn enhance_description(
        &self,
        job_description: &str,
        company_name: &str,
        hr_user_id: Uuid,
    ) -> Result<String> {
        let payload = json!({
            "job_description": job_description,
            "company_name": company_name,
            "hr_user_id": hr_user_id,
        });
        let response = self
            .client
            .post(&self.enhance_jd_url)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Internal(format!(
                "Enhance automation returned {}",
                response.status()
            )));
        }

        let reply = response
            .json::<EnhanceReply>()
            .await
            .map_err(|_| Error::UnexpectedFormat("description enhancement service"))?;
        let enhanced = match reply {
            EnhanceReply::Single(e) => e.enhanced_jd,
            EnhanceReply::Batch(mut batch) => {
                if batch.is_empty() {
                    return Err(Error::UnexpectedFormat("description enhancement service"));
                }
                batch.swap_remove(0).enhanced_jd
            }
        };
        Ok(enhanced)
    }

    /// Forward a committed application to the resume analyzer. Best-effort:
    /// the caller reports but does not undo anything on failure.
    pub async fn forward_application(
        &self,
        job: &JobListing,
        name: &str,
        email: &str,
        cv_url: &str,
        cv_filename: &str,
        cv_data: &Bytes,
    ) -> Result<()> {
        let payload = json!({
            "name": name,
            "email": email,
            "cv_url": cv_url,
            "job_id": job.job_id,
            "company_name": job.company_name,
            "job_profile": job.job_profile,
            "cv_filename": cv_filename,
            "cv_file_base64": BASE64.encode(cv_data),
        });

        info!("Forwarding application for {} to resume analyzer", job.job_id);
        let response = self
            .client
            .post(&self.resume_analyzer_url)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("Resume analyzer rejected application: {} {}", status, body);
            return Err(Error::Internal(format!(
                "Resume analyzer returned {}",
                status
            )));
        }
        Ok(())
    }

    /// One notification per shortlist action, carrying the selected
    /// candidates' emails plus the job context the email text embeds.
    pub async fn notify_shortlisted(
        &self,
        emails: &[String],
        job_profile: &str,
        company_name: &str,
    ) -> Result<()> {
        let payload = json!({
            "emails": emails,
            "job_profile": job_profile,
            "company_name": company_name,
        });

        let response = self
            .client
            .post(&self.shortlist_url)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("Shortlist notification failed: {} {}", status, body);
            return Err(Error::Internal(format!(
                "Shortlist notification returned {}",
                status
            )));
        }
        info!("Shortlist notification sent for {} recipients", emails.len());
        Ok(())
    }

    /// Submit the selected profiles and owning job to the comparison
    /// service, then normalize whichever known reply shape comes back.
    pub async fn compare_candidates(
        &self,
        job: &JobListing,
        candidates: &[AnalyzedResume],
    ) -> Result<Vec<ComparisonRanking>> {
        let profiles: Vec<JsonValue> = candidates
            .iter()
            .map(|c| {
                json!({
                    "id": c.id,
                    "name": c.name,
                    "email": c.email,
                    "educational_details": c.educational_details,
                    "job_history": c.job_history,
                    "skills": c.skills,
                    "summarize": c.summarize,
                    "vote": c.vote,
                })
            })
            .collect();

        let payload = json!({
            "job_profile": job.job_profile,
            "job_description": job.job_description,
            "candidates": profiles,
        });

        info!(
            "Requesting comparison of {} candidates for {}",
            candidates.len(),
            job.job_id
        );
        let response = self
            .client
            .post(&self.compare_url)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Internal(format!(
                "Comparison service returned {}",
                response.status()
            )));
        }

        let raw = response.json::<JsonValue>().await?;
        normalize_comparison_reply(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranking_json() -> JsonValue {
        json!([
            {
                "rank": 1,
                "candidate_name": "Alice",
                "overall_score": 9.1,
                "match_summary": "Strong fit",
                "strengths": ["Rust", "SQL"],
                "weaknesses": [],
                "recommendation": "hire"
            },
            {
                "rank": 2,
                "candidate_name": "Bob",
                "overall_score": 7.4,
                "match_summary": "Decent fit",
                "strengths": [],
                "weaknesses": ["No cloud experience"],
                "recommendation": "consider"
            }
        ])
    }

    #[test]
    fn bare_array_normalizes() {
        let rankings = normalize_comparison_reply(ranking_json()).unwrap();
        assert_eq!(rankings.len(), 2);
        assert_eq!(rankings[0].rank, 1);
        assert_eq!(rankings[0].candidate_name.as_deref(), Some("Alice"));
    }

    #[test]
    fn wrapped_array_normalizes() {
        let raw = json!({ "message": { "content": ranking_json() } });
        let rankings = normalize_comparison_reply(raw).unwrap();
        assert_eq!(rankings.len(), 2);
        assert_eq!(rankings[1].overall_score, 7.4);
    }

    #[test]
    fn string_encoded_content_is_parsed_twice() {
        let encoded = serde_json::to_string(&ranking_json()).unwrap();
        let raw = json!({ "message": { "content": encoded } });
        let rankings = normalize_comparison_reply(raw).unwrap();
        assert_eq!(rankings.len(), 2);
        assert_eq!(rankings[1].weaknesses, vec!["No cloud experience"]);
    }

    #[test]
    fn all_known_shapes_agree() {
        let bare = normalize_comparison_reply(ranking_json()).unwrap();
        let wrapped =
            normalize_comparison_reply(json!({ "message": { "content": ranking_json() } }))
                .unwrap();
        let encoded = normalize_comparison_reply(
            json!({ "message": { "content": serde_json::to_string(&ranking_json()).unwrap() } }),
        )
        .unwrap();
        let ranks = |r: &[ComparisonRanking]| r.iter().map(|e| e.rank).collect::<Vec<_>>();
        assert_eq!(ranks(&bare), ranks(&wrapped));
        assert_eq!(ranks(&bare), ranks(&encoded));
    }

    #[test]
    fn unknown_shapes_are_an_explicit_format_error() {
        for raw in [
            json!({"rankings": "nope"}),
            json!({ "message": { "content": "not json at all" } }),
            json!(42),
        ] {
            match normalize_comparison_reply(raw) {
                Err(Error::UnexpectedFormat(_)) => {}
                other => panic!("expected format error, got {:?}", other.map(|r| r.len())),
            }
        }
    }
}
