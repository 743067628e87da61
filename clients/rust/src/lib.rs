mod base;
mod reminder;
mod status;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIErrorVariant, APIResponse};
pub use nag_scheduler_api_structs::dtos::*;
pub use nag_scheduler_domain::{ReminderStatus, ID};
use reminder::ReminderClient;
pub use reminder::{CreateReminderInput, UpdateReminderInput};
use status::StatusClient;
use std::sync::Arc;

pub use nag_scheduler_api_structs::dtos::ReminderDTO as Reminder;
pub use nag_scheduler_api_structs::dtos::ScanResultsDTO as ScanResults;

/// Nag Scheduler Server SDK
///
/// The SDK contains methods for interacting with the Nag Scheduler server
/// API.
#[derive(Clone)]
pub struct NagSDK {
    pub reminder: ReminderClient,
    pub status: StatusClient,
}

impl NagSDK {
    pub fn new<T: Into<String>>(address: String, api_key: T) -> Self {
        let mut base = BaseClient::new(address);
        base.set_api_key(api_key.into());
        let base = Arc::new(base);
        let reminder = ReminderClient::new(base.clone());
        let status = StatusClient::new(base);

        Self { reminder, status }
    }
}
