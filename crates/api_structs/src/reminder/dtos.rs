use chrono::{DateTime, TimeZone, Utc};
use nag_scheduler_domain::{Reminder, ReminderStatus, ScanSummary, ID};
use serde::{Deserialize, Serialize};

pub(crate) fn to_datetime(timestamp_millis: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(timestamp_millis)
        .single()
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDTO {
    pub id: ID,
    pub event_name: String,
    pub event_date_time: DateTime<Utc>,
    pub email_recipients: Vec<String>,
    pub hours_before_start: i64,
    pub email_interval_minutes: i64,
    pub status: ReminderStatus,
    pub acknowledge_token: String,
    pub last_notified_at: Option<DateTime<Utc>>,
    pub acknowledged_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ReminderDTO {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            id: reminder.id,
            event_name: reminder.event_name,
            event_date_time: to_datetime(reminder.event_ts),
            email_recipients: reminder.email_recipients,
            hours_before_start: reminder.hours_before_start,
            email_interval_minutes: reminder.email_interval_minutes,
            status: reminder.status,
            acknowledge_token: reminder.acknowledge_token,
            last_notified_at: reminder.last_notified_ts.map(to_datetime),
            acknowledged_at: reminder.acknowledged_ts.map(to_datetime),
            created_at: to_datetime(reminder.created),
            updated_at: to_datetime(reminder.updated),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScanResultsDTO {
    pub activated: usize,
    pub notified: usize,
    pub errors: Vec<String>,
}

impl ScanResultsDTO {
    pub fn new(summary: ScanSummary) -> Self {
        Self {
            activated: summary.activated,
            notified: summary.notified,
            errors: summary.errors,
        }
    }
}
