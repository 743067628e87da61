use crate::{
    error::NagError,
    shared::{
        auth::protect_admin_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use nag_scheduler_api_structs::{email_interval_in_minutes, update_reminder::*};
use nag_scheduler_domain::{Reminder, ReminderValidationError, ID};
use nag_scheduler_infra::NagContext;

fn handle_error(e: UseCaseError) -> NagError {
    match e {
        UseCaseError::NotFound(reminder_id) => NagError::NotFound(format!(
            "The reminder with id: {}, was not found.",
            reminder_id
        )),
        UseCaseError::InvalidReminder(e) => NagError::BadClientData(e.to_string()),
        UseCaseError::StorageError => NagError::InternalError,
    }
}

pub async fn update_reminder_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<NagContext>,
) -> Result<HttpResponse, NagError> {
    protect_admin_route(&http_req, &ctx)?;

    let body = body.0;
    let usecase = UpdateReminderUseCase {
        reminder_id: path_params.reminder_id.clone(),
        email_interval_minutes: email_interval_in_minutes(
            body.email_interval_minutes,
            body.email_interval_hours,
        ),
        event_name: body.event_name,
        event_ts: body.event_date_time.map(|dt| dt.timestamp_millis()),
        email_recipients: body.email_recipients,
        hours_before_start: body.hours_before_start,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(reminder)))
        .map_err(handle_error)
}

/// Only the fields that are set are changed. The status of a `Reminder`
/// is driven by the scan and acknowledgements and can not be edited.
#[derive(Debug, Default)]
pub struct UpdateReminderUseCase {
    pub reminder_id: ID,
    pub event_name: Option<String>,
    pub event_ts: Option<i64>,
    pub email_recipients: Option<Vec<String>>,
    pub hours_before_start: Option<i64>,
    pub email_interval_minutes: Option<i64>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    InvalidReminder(ReminderValidationError),
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateReminder";

    async fn execute(&mut self, ctx: &NagContext) -> Result<Self::Response, Self::Error> {
        let mut reminder = match ctx.repos.reminders.find(&self.reminder_id).await {
            Ok(Some(reminder)) => reminder,
            Ok(None) => return Err(UseCaseError::NotFound(self.reminder_id.clone())),
            Err(_) => return Err(UseCaseError::StorageError),
        };

        if let Some(event_name) = &self.event_name {
            reminder.event_name = event_name.trim().to_string();
        }
        if let Some(event_ts) = self.event_ts {
            reminder.event_ts = event_ts;
        }
        if let Some(email_recipients) = &self.email_recipients {
            reminder.email_recipients = email_recipients
                .iter()
                .map(|email| email.trim().to_string())
                .collect();
        }
        if let Some(hours_before_start) = self.hours_before_start {
            reminder.hours_before_start = hours_before_start;
        }
        if let Some(email_interval_minutes) = self.email_interval_minutes {
            reminder.email_interval_minutes = email_interval_minutes;
        }
        reminder.validate().map_err(UseCaseError::InvalidReminder)?;
        reminder.updated = ctx.sys.get_timestamp_millis();

        ctx.repos
            .reminders
            .save(&reminder)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        // The lifecycle fields may have moved on since the reminder was read
        match ctx.repos.reminders.find(&reminder.id).await {
            Ok(Some(reminder)) => Ok(reminder),
            Ok(None) => Err(UseCaseError::NotFound(reminder.id)),
            Err(_) => Err(UseCaseError::StorageError),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use nag_scheduler_domain::ReminderStatus;
    use nag_scheduler_infra::StaticTimeSys;
    use std::sync::Arc;

    async fn setup() -> (NagContext, Reminder) {
        let mut ctx = NagContext::create_inmemory();
        ctx.sys = Arc::new(StaticTimeSys::new(500));
        let reminder = Reminder::new(
            "Dentist".into(),
            1000 * 60 * 60 * 24,
            vec!["me@example.com".into()],
            6,
            60,
            0,
        );
        ctx.repos.reminders.insert(&reminder).await.unwrap();
        (ctx, reminder)
    }

    #[actix_web::main]
    #[test]
    async fn updates_only_given_fields() {
        let (ctx, reminder) = setup().await;

        let mut usecase = UpdateReminderUseCase {
            reminder_id: reminder.id.clone(),
            email_interval_minutes: Some(15),
            email_recipients: Some(vec!["a@example.com".into(), "b@example.com".into()]),
            ..Default::default()
        };
        let updated = usecase.execute(&ctx).await.unwrap();
        assert_eq!(updated.email_interval_minutes, 15);
        assert_eq!(updated.email_recipients.len(), 2);
        assert_eq!(updated.event_name, reminder.event_name);
        assert_eq!(updated.hours_before_start, reminder.hours_before_start);
        assert_eq!(updated.acknowledge_token, reminder.acknowledge_token);
        assert_eq!(updated.status, ReminderStatus::Pending);
        assert_eq!(updated.updated, 500);

        let stored = ctx.repos.reminders.find(&reminder.id).await.unwrap();
        assert_eq!(stored, Some(updated));
    }

    #[actix_web::main]
    #[test]
    async fn rejects_invalid_update_without_saving() {
        let (ctx, reminder) = setup().await;

        let mut usecase = UpdateReminderUseCase {
            reminder_id: reminder.id.clone(),
            hours_before_start: Some(-2),
            ..Default::default()
        };
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::InvalidReminder(ReminderValidationError::NegativeHoursBeforeStart(-2))
        );
        let stored = ctx.repos.reminders.find(&reminder.id).await.unwrap();
        assert_eq!(stored, Some(reminder));
    }

    #[actix_web::main]
    #[test]
    async fn rejects_update_of_unknown_reminder() {
        let (ctx, _) = setup().await;

        let reminder_id = ID::default();
        let mut usecase = UpdateReminderUseCase {
            reminder_id: reminder_id.clone(),
            event_name: Some("Doctor".into()),
            ..Default::default()
        };
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::NotFound(reminder_id)
        );
    }

    #[actix_web::main]
    #[test]
    async fn keeps_status_and_lifecycle_timestamps() {
        let (ctx, reminder) = setup().await;
        assert!(ctx
            .repos
            .reminders
            .update_status(&reminder.id, ReminderStatus::Pending, ReminderStatus::Active, 10)
            .await
            .unwrap());
        assert!(ctx
            .repos
            .reminders
            .update_last_notified(&reminder.id, 20)
            .await
            .unwrap());

        let mut usecase = UpdateReminderUseCase {
            reminder_id: reminder.id.clone(),
            hours_before_start: Some(1),
            ..Default::default()
        };
        let updated = usecase.execute(&ctx).await.unwrap();
        assert_eq!(updated.hours_before_start, 1);
        assert_eq!(updated.status, ReminderStatus::Active);
        assert_eq!(updated.last_notified_ts, Some(20));
        assert!(updated.acknowledged_ts.is_none());

        assert!(ctx
            .repos
            .reminders
            .acknowledge(&reminder.id, 30)
            .await
            .unwrap());
        let mut usecase = UpdateReminderUseCase {
            reminder_id: reminder.id.clone(),
            event_name: Some("Doctor".into()),
            ..Default::default()
        };
        let updated = usecase.execute(&ctx).await.unwrap();
        assert_eq!(updated.event_name, "Doctor");
        assert_eq!(updated.status, ReminderStatus::Acknowledged);
        assert_eq!(updated.last_notified_ts, Some(20));
        assert_eq!(updated.acknowledged_ts, Some(30));

        let stored = ctx.repos.reminders.find(&reminder.id).await.unwrap();
        assert_eq!(stored, Some(updated));
    }
}
