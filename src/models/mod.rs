pub mod analyzed_resume;
pub mod applicant;
pub mod hr_user;
pub mod job_listing;
pub mod shortlink;
