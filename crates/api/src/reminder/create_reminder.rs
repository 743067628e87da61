use crate::error::NagError;
use crate::shared::{
    auth::protect_admin_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use nag_scheduler_api_structs::{create_reminder::*, email_interval_in_minutes};
use nag_scheduler_domain::{
    Reminder, ReminderValidationError, DEFAULT_EMAIL_INTERVAL_MINUTES, DEFAULT_HOURS_BEFORE_START,
};
use nag_scheduler_infra::NagContext;

pub async fn create_reminder_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<NagContext>,
) -> Result<HttpResponse, NagError> {
    protect_admin_route(&http_req, &ctx)?;

    let body = body.0;
    let usecase = CreateReminderUseCase {
        email_interval_minutes: email_interval_in_minutes(
            body.email_interval_minutes,
            body.email_interval_hours,
        )
        .unwrap_or(DEFAULT_EMAIL_INTERVAL_MINUTES),
        event_name: body.event_name,
        event_ts: body.event_date_time.timestamp_millis(),
        email_recipients: body.email_recipients,
        hours_before_start: body.hours_before_start.unwrap_or(DEFAULT_HOURS_BEFORE_START),
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Created().json(APIResponse::new(reminder)))
        .map_err(NagError::from)
}

#[derive(Debug)]
pub struct CreateReminderUseCase {
    pub event_name: String,
    pub event_ts: i64,
    pub email_recipients: Vec<String>,
    pub hours_before_start: i64,
    pub email_interval_minutes: i64,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidReminder(ReminderValidationError),
    StorageError,
}

impl From<UseCaseError> for NagError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidReminder(e) => Self::BadClientData(e.to_string()),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateReminder";

    async fn execute(&mut self, ctx: &NagContext) -> Result<Self::Response, Self::Error> {
        let reminder = Reminder::new(
            self.event_name.trim().to_string(),
            self.event_ts,
            self.email_recipients
                .iter()
                .map(|email| email.trim().to_string())
                .collect(),
            self.hours_before_start,
            self.email_interval_minutes,
            ctx.sys.get_timestamp_millis(),
        );
        reminder.validate().map_err(UseCaseError::InvalidReminder)?;

        ctx.repos
            .reminders
            .insert(&reminder)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(reminder)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use nag_scheduler_domain::ReminderStatus;

    fn usecase() -> CreateReminderUseCase {
        CreateReminderUseCase {
            event_name: " Dentist ".into(),
            event_ts: 1000 * 60 * 60 * 24,
            email_recipients: vec!["me@example.com".into()],
            hours_before_start: 6,
            email_interval_minutes: 30,
        }
    }

    #[actix_web::main]
    #[test]
    async fn creates_pending_reminder() {
        let ctx = NagContext::create_inmemory();

        let res = usecase().execute(&ctx).await;
        assert!(res.is_ok());
        let reminder = res.unwrap();
        assert_eq!(reminder.status, ReminderStatus::Pending);
        assert_eq!(reminder.event_name, "Dentist");

        let stored = ctx.repos.reminders.find(&reminder.id).await.unwrap();
        assert_eq!(stored, Some(reminder));
    }

    #[actix_web::main]
    #[test]
    async fn rejects_reminder_without_recipients() {
        let ctx = NagContext::create_inmemory();

        let mut usecase = usecase();
        usecase.email_recipients = vec![];
        let res = usecase.execute(&ctx).await;
        assert_eq!(
            res.unwrap_err(),
            UseCaseError::InvalidReminder(ReminderValidationError::NoRecipients)
        );
        assert!(ctx.repos.reminders.find_all().await.unwrap().is_empty());
    }

    #[actix_web::main]
    #[test]
    async fn rejects_non_positive_interval() {
        let ctx = NagContext::create_inmemory();

        let mut usecase = usecase();
        usecase.email_interval_minutes = 0;
        let res = usecase.execute(&ctx).await;
        assert_eq!(
            res.unwrap_err(),
            UseCaseError::InvalidReminder(ReminderValidationError::NonPositiveInterval(0))
        );
    }
}
