use anyhow::{bail, Context, Result};

/// Webhook the wizard posts to when `WEBHOOK_URL` is not set.
pub const DEFAULT_WEBHOOK_URL: &str =
    "https://n8n-bnap.onrender.com/webhook/0fca86f4-685d-4de3-be7e-b1dbfb22659b";

/// Longest idle period a session may be kept: one year.
pub const MAX_SESSION_IDLE_MINUTES: u32 = 525_600;

/// Application configuration loaded from environment variables.
/// Every variable has a default, so the service starts with an empty environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub webhook_url: String,
    pub port: u16,
    pub rust_log: String,
    /// Sessions untouched for longer than this are dropped on the next sweep.
    pub session_idle_minutes: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            webhook_url: env_or("WEBHOOK_URL", DEFAULT_WEBHOOK_URL),
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            session_idle_minutes: parse_idle_minutes(&env_or("SESSION_IDLE_MINUTES", "120"))?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            webhook_url: DEFAULT_WEBHOOK_URL.to_string(),
            port: 8080,
            rust_log: "info".to_string(),
            session_idle_minutes: 120,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_idle_minutes(raw: &str) -> Result<u32> {
    let minutes = raw
        .trim()
        .parse::<u32>()
        .context("SESSION_IDLE_MINUTES must be a whole number of minutes")?;
    if !(1..=MAX_SESSION_IDLE_MINUTES).contains(&minutes) {
        bail!("SESSION_IDLE_MINUTES must be between 1 and {MAX_SESSION_IDLE_MINUTES}, got {minutes}");
    }
    Ok(minutes)
}
