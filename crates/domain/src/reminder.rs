use crate::shared::entity::{Entity, ID};
use nag_scheduler_utils::create_random_hex_token;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// Lead time used when the client does not specify `hours_before_start`
pub const DEFAULT_HOURS_BEFORE_START: i64 = 6;
/// Repeat interval used when the client does not specify one
pub const DEFAULT_EMAIL_INTERVAL_MINUTES: i64 = 60;
pub const MAX_EVENT_NAME_LEN: usize = 255;
/// Number of random bytes in an acknowledge token (256 bits)
pub const ACKNOWLEDGE_TOKEN_BYTES: usize = 32;

/// Where a `Reminder` is in its lifecycle.
///
/// A `Reminder` only ever moves forward: `Pending` -> `Active` -> `Acknowledged`.
/// `Acknowledged` is terminal and can be reached from both other states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderStatus {
    Pending,
    Active,
    Acknowledged,
}

impl ReminderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Acknowledged => "acknowledged",
        }
    }
}

impl Display for ReminderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReminderStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "active" => Ok(Self::Active),
            "acknowledged" => Ok(Self::Acknowledged),
            _ => Err(anyhow::anyhow!("Unknown reminder status: {}", s)),
        }
    }
}

/// A `Reminder` nags its `email_recipients` every `email_interval_minutes`
/// from `hours_before_start` hours before the event until someone follows
/// the acknowledge link sent in the email.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub id: ID,
    pub event_name: String,
    /// Timestamp in millis of the event this `Reminder` is about
    pub event_ts: i64,
    pub email_recipients: Vec<String>,
    pub hours_before_start: i64,
    pub email_interval_minutes: i64,
    pub status: ReminderStatus,
    /// Secret that lets the holder acknowledge this `Reminder`.
    /// Never changes after creation.
    pub acknowledge_token: String,
    /// Timestamp in millis of the last successful notification
    pub last_notified_ts: Option<i64>,
    pub acknowledged_ts: Option<i64>,
    pub created: i64,
    pub updated: i64,
}

#[derive(Error, Debug, PartialEq)]
pub enum ReminderValidationError {
    #[error("Event name must be between 1 and {} characters", MAX_EVENT_NAME_LEN)]
    InvalidEventName,
    #[error("At least one email recipient is required")]
    NoRecipients,
    #[error("Invalid email recipient: `{0}`")]
    InvalidRecipient(String),
    #[error("Hours before start can not be negative, got: {0}")]
    NegativeHoursBeforeStart(i64),
    #[error("Email interval must be a positive number of minutes, got: {0}")]
    NonPositiveInterval(i64),
}

impl Reminder {
    /// Creates a new `Pending` `Reminder` with a fresh acknowledge token.
    /// The returned `Reminder` is not validated, see `Reminder::validate`.
    pub fn new(
        event_name: String,
        event_ts: i64,
        email_recipients: Vec<String>,
        hours_before_start: i64,
        email_interval_minutes: i64,
        created: i64,
    ) -> Self {
        Self {
            id: Default::default(),
            event_name,
            event_ts,
            email_recipients,
            hours_before_start,
            email_interval_minutes,
            status: ReminderStatus::Pending,
            acknowledge_token: Self::generate_acknowledge_token(),
            last_notified_ts: None,
            acknowledged_ts: None,
            created,
            updated: created,
        }
    }

    pub fn generate_acknowledge_token() -> String {
        create_random_hex_token(ACKNOWLEDGE_TOKEN_BYTES)
    }

    pub fn validate(&self) -> Result<(), ReminderValidationError> {
        let name_len = self.event_name.trim().chars().count();
        if name_len == 0 || self.event_name.chars().count() > MAX_EVENT_NAME_LEN {
            return Err(ReminderValidationError::InvalidEventName);
        }
        if self.email_recipients.is_empty() {
            return Err(ReminderValidationError::NoRecipients);
        }
        if let Some(invalid) = self
            .email_recipients
            .iter()
            .find(|email| !is_valid_email(email))
        {
            return Err(ReminderValidationError::InvalidRecipient(invalid.clone()));
        }
        if self.hours_before_start < 0 {
            return Err(ReminderValidationError::NegativeHoursBeforeStart(
                self.hours_before_start,
            ));
        }
        if self.email_interval_minutes <= 0 {
            return Err(ReminderValidationError::NonPositiveInterval(
                self.email_interval_minutes,
            ));
        }
        Ok(())
    }

    pub fn is_acknowledged(&self) -> bool {
        self.status == ReminderStatus::Acknowledged
    }

    /// Marks the `Reminder` as acknowledged at `now`.
    /// Returns false and leaves the `Reminder` untouched if it was already acknowledged.
    pub fn acknowledge(&mut self, now: i64) -> bool {
        if self.is_acknowledged() {
            return false;
        }
        self.status = ReminderStatus::Acknowledged;
        self.acknowledged_ts = Some(now);
        self.updated = now;
        true
    }
}

impl Entity for Reminder {
    fn id(&self) -> &ID {
        &self.id
    }
}

fn is_valid_email(email: &str) -> bool {
    let mut parts = email.splitn(2, '@');
    match (parts.next(), parts.next()) {
        (Some(local), Some(domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && domain.contains('.')
                && !email.chars().any(char::is_whitespace)
        }
        _ => false,
    }
}
