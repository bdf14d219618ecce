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
    application_service::ApplicationService, auth_service::AuthService, job_service::JobService,
};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub auth_service: AuthService,
    pub job_service: JobService,
    pub application_service: ApplicationService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let config = crate::config::get_config();

        let auth_service = AuthService::new(pool.clone(), config.session_ttl_hours);
        let job_service = JobService::new(pool.clone());
        let application_service = ApplicationService::new(pool.clone());

        Self {
            pool,
            auth_service,
            job_service,
            application_service,
        }
    }
}
