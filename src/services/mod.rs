pub mod applicant_service;
pub mod auth_service;
pub mod automation_service;
pub mod candidate_service;
pub mod job_service;
pub mod shortlink_service;
pub mod storage_service;
