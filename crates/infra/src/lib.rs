mod config;
mod repos;
mod services;
mod system;

pub use config::{Config, EmailGatewayConfig, MAX_SCAN_INTERVAL_MINUTES};
pub use repos::{IReminderRepo, InMemoryReminderRepo, Repos};
pub use services::*;
use std::sync::Arc;
pub use system::{ISys, RealSys, StaticTimeSys};
use tracing::{info, warn};

#[derive(Clone)]
pub struct NagContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub notifier: Arc<dyn INotifier>,
}

struct ContextParams {
    pub postgres_connection_string: String,
}

impl NagContext {
    async fn create(params: ContextParams) -> anyhow::Result<Self> {
        let repos = Repos::create_postgres(&params.postgres_connection_string).await?;
        let config = Config::new();
        let notifier = create_notifier(&config)?;
        Ok(Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
            notifier,
        })
    }

    /// Context backed by inmemory repos and an `InMemoryNotifier`,
    /// which is what tests and local development run with
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
            notifier: Arc::new(InMemoryNotifier::new()),
        }
    }
}

fn create_notifier(config: &Config) -> anyhow::Result<Arc<dyn INotifier>> {
    if config.email_gateway.api_key.is_some() {
        Ok(Arc::new(EmailGatewayNotifier::new(config.clone())?))
    } else {
        warn!("EMAIL_GATEWAY_API_KEY env var was not provided. Reminder emails will only be recorded in memory.");
        Ok(Arc::new(InMemoryNotifier::new()))
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> anyhow::Result<NagContext> {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    match std::env::var(PSQL_CONNECTION_STRING) {
        Ok(connection_string) => {
            info!(
                "{} env var was provided. Going to use postgres.",
                PSQL_CONNECTION_STRING
            );
            NagContext::create(ContextParams {
                postgres_connection_string: connection_string,
            })
            .await
        }
        Err(_) => {
            info!(
                "{} env var was not provided. Going to use inmemory infra.",
                PSQL_CONNECTION_STRING
            );
            let mut ctx = NagContext::create_inmemory();
            ctx.notifier = create_notifier(&ctx.config)?;
            Ok(ctx)
        }
    }
}
