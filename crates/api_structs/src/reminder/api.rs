use crate::reminder::dtos::{to_datetime, ReminderDTO, ScanResultsDTO};
use chrono::{DateTime, Utc};
use nag_scheduler_domain::{Reminder, ScanSummary, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderResponse {
    pub reminder: ReminderDTO,
}

impl ReminderResponse {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            reminder: ReminderDTO::new(reminder),
        }
    }
}

/// The interval is stored in minutes, but clients may still send it in hours.
/// Minutes take precedence when both are given.
pub fn email_interval_in_minutes(minutes: Option<i64>, hours: Option<i64>) -> Option<i64> {
    minutes.or_else(|| hours.map(|hours| hours.saturating_mul(60)))
}

pub mod create_reminder {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub event_name: String,
        pub event_date_time: DateTime<Utc>,
        pub email_recipients: Vec<String>,
        #[serde(default)]
        pub hours_before_start: Option<i64>,
        #[serde(default)]
        pub email_interval_minutes: Option<i64>,
        /// Legacy unit, converted to minutes
        #[serde(default)]
        pub email_interval_hours: Option<i64>,
    }

    pub type APIResponse = ReminderResponse;
}

pub mod get_reminder {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    pub type APIResponse = ReminderResponse;
}

pub mod get_reminders {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub reminders: Vec<ReminderDTO>,
    }

    impl APIResponse {
        pub fn new(reminders: Vec<Reminder>) -> Self {
            Self {
                reminders: reminders.into_iter().map(ReminderDTO::new).collect(),
            }
        }
    }
}

pub mod update_reminder {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    #[derive(Serialize, Deserialize, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub event_name: Option<String>,
        #[serde(default)]
        pub event_date_time: Option<DateTime<Utc>>,
        #[serde(default)]
        pub email_recipients: Option<Vec<String>>,
        #[serde(default)]
        pub hours_before_start: Option<i64>,
        #[serde(default)]
        pub email_interval_minutes: Option<i64>,
        /// Legacy unit, converted to minutes
        #[serde(default)]
        pub email_interval_hours: Option<i64>,
    }

    pub type APIResponse = ReminderResponse;
}

pub mod delete_reminder {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub success: bool,
        pub message: String,
    }

    impl APIResponse {
        pub fn new() -> Self {
            Self {
                success: true,
                message: "Reminder deleted".into(),
            }
        }
    }

    impl Default for APIResponse {
        fn default() -> Self {
            Self::new()
        }
    }
}

pub mod acknowledge_reminder {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub token: String,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub success: bool,
        pub message: String,
        pub reminder: ReminderDTO,
    }

    impl APIResponse {
        pub fn new(reminder: Reminder, already_acknowledged: bool) -> Self {
            let message = if already_acknowledged {
                "Reminder already acknowledged"
            } else {
                "Reminder acknowledged"
            };
            Self {
                success: true,
                message: message.into(),
                reminder: ReminderDTO::new(reminder),
            }
        }
    }
}

pub mod scan_reminders {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub success: bool,
        pub results: ScanResultsDTO,
        pub timestamp: DateTime<Utc>,
    }

    impl APIResponse {
        pub fn new(summary: ScanSummary) -> Self {
            Self {
                success: true,
                timestamp: to_datetime(summary.scanned_at),
                results: ScanResultsDTO::new(summary),
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn converts_interval_to_minutes() {
        assert_eq!(email_interval_in_minutes(Some(10), None), Some(10));
        assert_eq!(email_interval_in_minutes(None, Some(2)), Some(120));
        assert_eq!(email_interval_in_minutes(Some(10), Some(2)), Some(10));
        assert_eq!(email_interval_in_minutes(None, None), None);
    }

    #[test]
    fn serializes_reminder_in_camel_case() {
        let reminder = Reminder::new(
            "Dentist".into(),
            0,
            vec!["me@example.com".into()],
            6,
            10,
            0,
        );
        let json = serde_json::to_value(ReminderResponse::new(reminder)).unwrap();
        let reminder = &json["reminder"];
        assert_eq!(reminder["eventName"], "Dentist");
        assert_eq!(reminder["status"], "pending");
        assert_eq!(reminder["emailIntervalMinutes"], 10);
        assert_eq!(reminder["eventDateTime"], "1970-01-01T00:00:00Z");
        assert!(reminder["lastNotifiedAt"].is_null());
    }

    #[test]
    fn deserializes_create_body_with_legacy_interval() {
        let body: create_reminder::RequestBody = serde_json::from_value(serde_json::json!({
            "eventName": "Dentist",
            "eventDateTime": "2030-01-01T10:00:00Z",
            "emailRecipients": ["me@example.com"],
            "emailIntervalHours": 1
        }))
        .unwrap();
        assert_eq!(body.hours_before_start, None);
        assert_eq!(
            email_interval_in_minutes(body.email_interval_minutes, body.email_interval_hours),
            Some(60)
        );
    }
}
