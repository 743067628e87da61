use crate::{
    error::NagError,
    shared::{
        auth::protect_admin_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use nag_scheduler_api_structs::scan_reminders::*;
use nag_scheduler_domain::{evaluate, ReminderStatus, ScanSummary};
use nag_scheduler_infra::NagContext;
use tracing::{info, warn};

pub async fn scan_reminders_controller(
    http_req: HttpRequest,
    ctx: web::Data<NagContext>,
) -> Result<HttpResponse, NagError> {
    protect_admin_route(&http_req, &ctx)?;

    execute(ScanRemindersUseCase {}, &ctx)
        .await
        .map(|summary| HttpResponse::Ok().json(APIResponse::new(summary)))
        .map_err(|_| NagError::InternalError)
}

/// Runs one pass of the reminder lifecycle over every reminder that is
/// not yet acknowledged.
///
/// First every due `Pending` reminder is activated, then every `Active`
/// reminder whose interval has elapsed is notified. A failed notification
/// is recorded in the summary and the reminder stays eligible for the next
/// scan. A storage failure aborts the scan.
#[derive(Debug)]
pub struct ScanRemindersUseCase {}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

impl ScanRemindersUseCase {
    async fn activate_due_reminders(
        &self,
        ctx: &NagContext,
        summary: &mut ScanSummary,
    ) -> Result<(), UseCaseError> {
        let now = summary.scanned_at;
        let pending = ctx
            .repos
            .reminders
            .find_by_status(ReminderStatus::Pending)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        for reminder in pending {
            if evaluate(&reminder, now).new_status != Some(ReminderStatus::Active) {
                continue;
            }
            let activated = ctx
                .repos
                .reminders
                .update_status(
                    &reminder.id,
                    ReminderStatus::Pending,
                    ReminderStatus::Active,
                    now,
                )
                .await
                .map_err(|_| UseCaseError::StorageError)?;
            if activated {
                info!("Activated reminder: {}", reminder.id);
                summary.activated += 1;
            }
        }

        Ok(())
    }

    async fn notify_due_reminders(
        &self,
        ctx: &NagContext,
        summary: &mut ScanSummary,
    ) -> Result<(), UseCaseError> {
        let now = summary.scanned_at;
        let active = ctx
            .repos
            .reminders
            .find_by_status(ReminderStatus::Active)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        for reminder in active
            .into_iter()
            .filter(|reminder| reminder.acknowledged_ts.is_none())
        {
            if !evaluate(&reminder, now).should_notify {
                continue;
            }

            match ctx.notifier.send(&reminder).await {
                Ok(delivery) => {
                    info!(
                        "Notified {} recipient(s) of reminder: {}",
                        delivery.recipients.len(),
                        reminder.id
                    );
                    summary.notified += 1;
                }
                Err(e) => {
                    warn!("Unable to notify reminder: {}. Error: {:?}", reminder.id, e);
                    summary
                        .errors
                        .push(format!("{}: {}", reminder.event_name, e));
                    continue;
                }
            }

            let updated = ctx
                .repos
                .reminders
                .update_last_notified(&reminder.id, now)
                .await
                .map_err(|_| UseCaseError::StorageError)?;
            if !updated {
                warn!(
                    "Reminder: {} was acknowledged or removed while being notified",
                    reminder.id
                );
            }
        }

        Ok(())
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for ScanRemindersUseCase {
    type Response = ScanSummary;

    type Error = UseCaseError;

    const NAME: &'static str = "ScanReminders";

    async fn execute(&mut self, ctx: &NagContext) -> Result<Self::Response, Self::Error> {
        let mut summary = ScanSummary::new(ctx.sys.get_timestamp_millis());

        self.activate_due_reminders(ctx, &mut summary).await?;
        self.notify_due_reminders(ctx, &mut summary).await?;

        if !summary.is_empty() {
            info!(
                "Scan activated {} and notified {} reminder(s) with {} error(s)",
                summary.activated,
                summary.notified,
                summary.errors.len()
            );
        }

        Ok(summary)
    }
}
