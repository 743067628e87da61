use crate::{
    error::NagError,
    shared::{
        auth::protect_admin_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use nag_scheduler_api_structs::get_reminders::*;
use nag_scheduler_domain::Reminder;
use nag_scheduler_infra::NagContext;

pub async fn get_reminders_controller(
    http_req: HttpRequest,
    ctx: web::Data<NagContext>,
) -> Result<HttpResponse, NagError> {
    protect_admin_route(&http_req, &ctx)?;

    execute(GetRemindersUseCase {}, &ctx)
        .await
        .map(|reminders| HttpResponse::Ok().json(APIResponse::new(reminders)))
        .map_err(|_| NagError::InternalError)
}

#[derive(Debug)]
pub struct GetRemindersUseCase {}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetRemindersUseCase {
    type Response = Vec<Reminder>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetReminders";

    async fn execute(&mut self, ctx: &NagContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .reminders
            .find_all()
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
