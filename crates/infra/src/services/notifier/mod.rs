mod email_gateway;
mod inmemory;

use crate::Config;
use chrono::{TimeZone, Utc};
pub use email_gateway::EmailGatewayNotifier;
pub use inmemory::InMemoryNotifier;
use nag_scheduler_domain::Reminder;

/// Delivers the notification of a `Reminder` to all of its recipients.
///
/// Implementations do not retry, a failed delivery is simply reported
/// back to the caller.
#[async_trait::async_trait]
pub trait INotifier: Send + Sync {
    async fn send(&self, reminder: &Reminder) -> anyhow::Result<DeliveryInfo>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryInfo {
    pub recipients: Vec<String>,
    /// Identifier of the delivery, if the provider returned one
    pub provider_id: Option<String>,
}

/// The email that is sent for a `Reminder`
#[derive(Debug, Clone, PartialEq)]
pub struct EmailMessage {
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
}

impl EmailMessage {
    pub fn for_reminder(reminder: &Reminder, config: &Config) -> Self {
        let acknowledge_url = config.acknowledge_url(&reminder.acknowledge_token);
        let scheduled_for = Utc
            .timestamp_millis_opt(reminder.event_ts)
            .single()
            .map(|dt| dt.format("%A, %B %e, %Y %H:%M UTC").to_string())
            .unwrap_or_else(|| reminder.event_ts.to_string());

        let html = format!(
            r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Reminder: {name}</title></head>
<body>
<p>This is your reminder for:</p>
<h2>{name}</h2>
<p><strong>Scheduled for:</strong> {scheduled_for}</p>
<p><a href="{acknowledge_url}">Acknowledge reminder</a></p>
<p>You will continue receiving this email every {interval} minute(s) until acknowledged.</p>
</body>
</html>"#,
            name = escape_html(&reminder.event_name),
            scheduled_for = scheduled_for,
            acknowledge_url = acknowledge_url,
            interval = reminder.email_interval_minutes,
        );

        Self {
            to: reminder.email_recipients.clone(),
            subject: format!("Reminder: {}", reminder.event_name),
            html,
        }
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
