pub mod auth;
pub mod candidate_routes;
pub mod dashboard;
pub mod health;
pub mod job_routes;
pub mod public;
