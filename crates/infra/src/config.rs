use nag_scheduler_utils::create_random_secret;
use std::str::FromStr;
use tracing::{info, warn};

const DEFAULT_SCAN_INTERVAL_MINUTES: u64 = 30;
/// One week
pub const MAX_SCAN_INTERVAL_MINUTES: u64 = 60 * 24 * 7;

const DEFAULT_EMAIL_GATEWAY_API_URL: &str =
    "https://email-gateway-production.up.railway.app/api/v1/emails";

#[derive(Debug, Clone)]
pub struct Config {
    /// Secret key that must be provided in the `x-api-key` header
    /// to manage `Reminder`s and trigger scans manually
    pub admin_api_key: String,
    /// Port for the application to run on
    pub port: usize,
    /// Public url of the application. Acknowledge links in the
    /// reminder emails point to this url.
    pub app_url: String,
    pub email_gateway: EmailGatewayConfig,
    /// How often the scan job runs
    pub scan_interval_minutes: u64,
    /// Upper bound for a single notifier call, so that one unresponsive
    /// recipient can not stall the rest of the scan
    pub notifier_timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct EmailGatewayConfig {
    pub api_url: String,
    /// When missing, notifications are only recorded in memory
    pub api_key: Option<String>,
    pub from_address: String,
    pub from_name: String,
}

impl Config {
    pub fn new() -> Self {
        let admin_api_key = match std::env::var("ADMIN_API_KEY") {
            Ok(key) => key,
            Err(_) => {
                info!("Did not find ADMIN_API_KEY environment variable. Going to create one.");
                let key = create_random_secret(32);
                info!("Admin api key was generated and set to: {}", key);
                key
            }
        };

        let email_gateway = EmailGatewayConfig {
            api_url: std::env::var("EMAIL_GATEWAY_API_URL")
                .unwrap_or_else(|_| DEFAULT_EMAIL_GATEWAY_API_URL.into()),
            api_key: std::env::var("EMAIL_GATEWAY_API_KEY").ok(),
            from_address: std::env::var("EMAIL_FROM_ADDRESS")
                .unwrap_or_else(|_| "reminders@localhost".into()),
            from_name: std::env::var("EMAIL_FROM_NAME").unwrap_or_else(|_| "Nag".into()),
        };

        Self {
            admin_api_key,
            port: parse_env_or("PORT", 5000),
            app_url: std::env::var("APP_URL").unwrap_or_else(|_| "http://localhost:3000".into()),
            email_gateway,
            scan_interval_minutes: bounded_scan_interval(parse_env_or(
                "SCAN_INTERVAL_MINUTES",
                DEFAULT_SCAN_INTERVAL_MINUTES,
            )),
            notifier_timeout_secs: parse_env_or("NOTIFIER_TIMEOUT_SECS", 10),
        }
    }

    /// Link that acknowledges the `Reminder` with the given token
    pub fn acknowledge_url(&self, acknowledge_token: &str) -> String {
        format!(
            "{}/acknowledge/{}",
            self.app_url.trim_end_matches('/'),
            acknowledge_token
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn bounded_scan_interval(minutes: u64) -> u64 {
    if minutes > MAX_SCAN_INTERVAL_MINUTES {
        warn!(
            "The given SCAN_INTERVAL_MINUTES: {} is larger than the max: {}, falling back to the default: {}.",
            minutes, MAX_SCAN_INTERVAL_MINUTES, DEFAULT_SCAN_INTERVAL_MINUTES
        );
        return DEFAULT_SCAN_INTERVAL_MINUTES;
    }
    minutes
}

fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
{
    match std::env::var(key) {
        Ok(value) => match value.parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default: {}.",
                    key, value, default
                );
                default
            }
        },
        Err(_) => default,
    }
}
