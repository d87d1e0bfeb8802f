//! Configuration module
//!
//! Configuration is read once at startup into an explicit struct and passed
//! into the application state. Handlers and services never read the process
//! environment directly, so tests can substitute configurations freely.

use std::env;

const DEFAULT_SERVER_PORT: u16 = 5000;
const MAX_CONNECTIONS: u32 = 20;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const DEFAULT_SMTP_SERVER: &str = "smtp.gmail.com";
const DEFAULT_SMTP_PORT: u16 = 587;
const DEFAULT_RECIPIENT: &str = "careers@applyflow.dev";
const MAX_RESUME_SIZE_MB: usize = 10;

/// Outbound mail settings. The notifier is considered configured only when
/// both username and password are present.
#[derive(Clone, Debug)]
pub struct SmtpSettings {
    pub server: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Fixed internal recipient for manager notifications and diagnostics.
    pub recipient: String,
}

impl SmtpSettings {
    pub fn is_configured(&self) -> bool {
        self.username.is_some() && self.password.is_some()
    }

    /// Username/password pair when both are set.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(user), Some(pass)) => Some((user, pass)),
            _ => None,
        }
    }
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub max_resume_size_bytes: usize,
    pub smtp: SmtpSettings,
}

impl Config {
    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins: Vec<String> = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let max_resume_size_mb = env::var("MAX_RESUME_SIZE_MB")
            .unwrap_or_else(|_| MAX_RESUME_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(MAX_RESUME_SIZE_MB);

        let smtp = SmtpSettings {
            server: env::var("SMTP_SERVER").unwrap_or_else(|_| DEFAULT_SMTP_SERVER.to_string()),
            port: env::var("SMTP_PORT")
                .unwrap_or_else(|_| DEFAULT_SMTP_PORT.to_string())
                .parse()
                .unwrap_or(DEFAULT_SMTP_PORT),
            username: env::var("SMTP_USERNAME").ok().filter(|s| !s.is_empty()),
            password: env::var("SMTP_PASSWORD").ok().filter(|s| !s.is_empty()),
            recipient: env::var("CONTACT_RECIPIENT")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_RECIPIENT.to_string()),
        };

        let config = Config {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            environment,
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| MAX_CONNECTIONS.to_string())
                .parse()
                .unwrap_or(MAX_CONNECTIONS),
            db_timeout_seconds: env::var("DB_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| CONNECTION_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            max_resume_size_bytes: max_resume_size_mb * 1024 * 1024,
            smtp,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !self.database_url.starts_with("postgresql://")
            && !self.database_url.starts_with("postgres://")
        {
            return Err(anyhow::anyhow!(
                "DATABASE_URL must be a valid PostgreSQL connection string"
            ));
        }

        if self.is_production() && self.cors_origins.iter().any(|o| o.trim() == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        if self.smtp.recipient.trim().is_empty() {
            return Err(anyhow::anyhow!("CONTACT_RECIPIENT cannot be empty"));
        }

        Ok(())
    }
}
