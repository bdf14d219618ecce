pub mod application_service;
pub mod auth_service;
pub mod job_service;
