use crate::{
    error::NagError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use nag_scheduler_api_structs::acknowledge_reminder::*;
use nag_scheduler_domain::Reminder;
use nag_scheduler_infra::NagContext;
use tracing::info;

fn handle_error(e: UseCaseError) -> NagError {
    match e {
        UseCaseError::NotFound => {
            NagError::NotFound("Invalid or expired acknowledgment link".into())
        }
        UseCaseError::StorageError => NagError::InternalError,
    }
}

pub async fn acknowledge_reminder_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<NagContext>,
) -> Result<HttpResponse, NagError> {
    let usecase = AcknowledgeReminderUseCase {
        token: path_params.token.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Ok().json(APIResponse::new(res.reminder, res.already_acknowledged))
        })
        .map_err(handle_error)
}

pub struct AcknowledgeReminderUseCase {
    pub token: String,
}

// The token is a credential and is kept out of the logs
impl std::fmt::Debug for AcknowledgeReminderUseCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AcknowledgeReminderUseCase").finish()
    }
}

#[derive(Debug)]
pub struct UseCaseResponse {
    pub reminder: Reminder,
    pub already_acknowledged: bool,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound,
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for AcknowledgeReminderUseCase {
    type Response = UseCaseResponse;

    type Error = UseCaseError;

    const NAME: &'static str = "AcknowledgeReminder";

    async fn execute(&mut self, ctx: &NagContext) -> Result<Self::Response, Self::Error> {
        let token = self.token.trim();
        if token.is_empty() {
            return Err(UseCaseError::NotFound);
        }

        let mut reminder = match ctx.repos.reminders.find_by_token(token).await {
            Ok(Some(reminder)) => reminder,
            Ok(None) => return Err(UseCaseError::NotFound),
            Err(_) => return Err(UseCaseError::StorageError),
        };

        if reminder.is_acknowledged() {
            return Ok(UseCaseResponse {
                reminder,
                already_acknowledged: true,
            });
        }

        let now = ctx.sys.get_timestamp_millis();
        let acknowledged = ctx
            .repos
            .reminders
            .acknowledge(&reminder.id, now)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        if acknowledged {
            info!("Reminder: {} was acknowledged", reminder.id);
            reminder.acknowledge(now);
            return Ok(UseCaseResponse {
                reminder,
                already_acknowledged: false,
            });
        }

        // Someone else acknowledged it in the meantime
        match ctx.repos.reminders.find(&reminder.id).await {
            Ok(Some(reminder)) => Ok(UseCaseResponse {
                reminder,
                already_acknowledged: true,
            }),
            Ok(None) => Err(UseCaseError::NotFound),
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

    async fn setup(status: ReminderStatus) -> (NagContext, Reminder) {
        let mut ctx = NagContext::create_inmemory();
        ctx.sys = Arc::new(StaticTimeSys::new(1000));
        let mut reminder = Reminder::new(
            "Dentist".into(),
            1000 * 60 * 60 * 24,
            vec!["me@example.com".into()],
            6,
            60,
            0,
        );
        reminder.status = status;
        ctx.repos.reminders.insert(&reminder).await.unwrap();
        (ctx, reminder)
    }

    #[actix_web::main]
    #[test]
    async fn acknowledges_active_reminder() {
        let (ctx, reminder) = setup(ReminderStatus::Active).await;

        let mut usecase = AcknowledgeReminderUseCase {
            token: reminder.acknowledge_token.clone(),
        };
        let res = usecase.execute(&ctx).await.unwrap();
        assert!(!res.already_acknowledged);
        assert_eq!(res.reminder.status, ReminderStatus::Acknowledged);
        assert_eq!(res.reminder.acknowledged_ts, Some(1000));

        let stored = ctx.repos.reminders.find(&reminder.id).await.unwrap().unwrap();
        assert_eq!(stored.status, ReminderStatus::Acknowledged);
        assert_eq!(stored.acknowledged_ts, Some(1000));
    }

    #[actix_web::main]
    #[test]
    async fn acknowledges_pending_reminder() {
        let (ctx, reminder) = setup(ReminderStatus::Pending).await;

        let mut usecase = AcknowledgeReminderUseCase {
            token: reminder.acknowledge_token.clone(),
        };
        let res = usecase.execute(&ctx).await.unwrap();
        assert!(!res.already_acknowledged);
        assert_eq!(res.reminder.status, ReminderStatus::Acknowledged);
    }

    #[actix_web::main]
    #[test]
    async fn acknowledging_twice_keeps_first_timestamp() {
        let (mut ctx, reminder) = setup(ReminderStatus::Active).await;
        let sys = Arc::new(StaticTimeSys::new(1000));
        ctx.sys = sys.clone();

        let mut usecase = AcknowledgeReminderUseCase {
            token: reminder.acknowledge_token.clone(),
        };
        assert!(!usecase.execute(&ctx).await.unwrap().already_acknowledged);

        sys.advance_millis(60 * 1000);
        let res = usecase.execute(&ctx).await.unwrap();
        assert!(res.already_acknowledged);
        assert_eq!(res.reminder.status, ReminderStatus::Acknowledged);
        assert_eq!(res.reminder.acknowledged_ts, Some(1000));
    }

    #[actix_web::main]
    #[test]
    async fn rejects_unknown_token() {
        let (ctx, _) = setup(ReminderStatus::Active).await;

        for token in ["unknown", "", "   "].iter() {
            let mut usecase = AcknowledgeReminderUseCase {
                token: token.to_string(),
            };
            assert_eq!(
                usecase.execute(&ctx).await.unwrap_err(),
                UseCaseError::NotFound
            );
        }
    }
}
