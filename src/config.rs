use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub database_url: String,
    pub jwt_secret: String,
    pub uploads_dir: String,
    pub public_base_url: String,
    pub create_job_webhook_url: String,
    pub enhance_jd_webhook_url: String,
    pub resume_analyzer_webhook_url: String,
    pub shortlist_webhook_url: String,
    pub compare_webhook_url: String,
    pub integration_rps: u32,
    pub public_rps: u32,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_address: get_env("SERVER_ADDRESS")?,
            database_url: get_env("DATABASE_URL")?,
            jwt_secret: get_env("JWT_SECRET")?,
            uploads_dir: env::var("UPLOADS_DIR").unwrap_or_else(|_| "./uploads".to_string()),
            public_base_url: get_env("PUBLIC_BASE_URL")?,
            create_job_webhook_url: get_env("CREATE_JOB_WEBHOOK_URL")?,
            enhance_jd_webhook_url: get_env("ENHANCE_JD_WEBHOOK_URL")?,
            resume_analyzer_webhook_url: get_env("RESUME_ANALYZER_WEBHOOK_URL")?,
            shortlist_webhook_url: get_env("SHORTLIST_WEBHOOK_URL")?,
            compare_webhook_url: get_env("COMPARE_WEBHOOK_URL")?,
            integration_rps: get_env_parse("INTEGRATION_RPS")?,
            public_rps: get_env_parse("PUBLIC_RPS")?,
        })
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_parse<T>(name: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = get_env(name)?;
    raw.parse()
        .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e)))
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}
