use crate::{APIResponse, BaseClient, ID};
use chrono::{DateTime, Utc};
use nag_scheduler_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct ReminderClient {
    base: Arc<BaseClient>,
}

pub type CreateReminderInput = create_reminder::RequestBody;

#[derive(Default)]
pub struct UpdateReminderInput {
    pub reminder_id: ID,
    pub event_name: Option<String>,
    pub event_date_time: Option<DateTime<Utc>>,
    pub email_recipients: Option<Vec<String>>,
    pub hours_before_start: Option<i64>,
    pub email_interval_minutes: Option<i64>,
}

impl ReminderClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(
        &self,
        input: CreateReminderInput,
    ) -> APIResponse<create_reminder::APIResponse> {
        self.base
            .post(input, "reminders".into(), StatusCode::CREATED)
            .await
    }

    pub async fn get(&self, reminder_id: ID) -> APIResponse<get_reminder::APIResponse> {
        self.base
            .get(format!("reminders/{}", reminder_id), StatusCode::OK)
            .await
    }

    pub async fn list(&self) -> APIResponse<get_reminders::APIResponse> {
        self.base.get("reminders".into(), StatusCode::OK).await
    }

    pub async fn update(
        &self,
        input: UpdateReminderInput,
    ) -> APIResponse<update_reminder::APIResponse> {
        let body = update_reminder::RequestBody {
            event_name: input.event_name,
            event_date_time: input.event_date_time,
            email_recipients: input.email_recipients,
            hours_before_start: input.hours_before_start,
            email_interval_minutes: input.email_interval_minutes,
            email_interval_hours: None,
        };
        self.base
            .patch(
                body,
                format!("reminders/{}", input.reminder_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn delete(&self, reminder_id: ID) -> APIResponse<delete_reminder::APIResponse> {
        self.base
            .delete(format!("reminders/{}", reminder_id), StatusCode::OK)
            .await
    }

    /// Runs a scan right away instead of waiting for the job scheduler
    pub async fn scan(&self) -> APIResponse<scan_reminders::APIResponse> {
        self.base
            .post((), "reminders/scan".into(), StatusCode::OK)
            .await
    }

    pub async fn acknowledge(
        &self,
        acknowledge_token: &str,
    ) -> APIResponse<acknowledge_reminder::APIResponse> {
        self.base
            .get(
                format!("acknowledge/{}", acknowledge_token),
                StatusCode::OK,
            )
            .await
    }
}
