pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::services::{
    applicant_service::ApplicantService, auth_service::AuthService,
    automation_service::AutomationService, candidate_service::CandidateService,
    job_service::JobService, shortlink_service::ShortlinkService,
    storage_service::StorageService,
};
use reqwest::Client;
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub auth_service: AuthService,
    pub job_service: JobService,
    pub candidate_service: CandidateService,
    pub applicant_service: ApplicantService,
    pub shortlink_service: ShortlinkService,
    pub storage_service: StorageService,
    pub automation_service: AutomationService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let config = crate::config::get_config();
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .unwrap();

        let auth_service = AuthService::new(pool.clone());
        let job_service = JobService::new(pool.clone());
        let candidate_service = CandidateService::new(pool.clone());
        let applicant_service = ApplicantService::new(pool.clone());
        let shortlink_service = ShortlinkService::new(pool.clone());
        let storage_service =
            StorageService::new(config.uploads_dir.clone(), config.public_base_url.clone());
        let automation_service = AutomationService::new(http_client);

        Self {
            pool,
            auth_service,
            job_service,
            candidate_service,
            applicant_service,
            shortlink_service,
            storage_service,
            automation_service,
        }
    }
}
