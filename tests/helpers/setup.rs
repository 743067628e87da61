use nag_scheduler_api::Application;
use nag_scheduler_infra::{Config, InMemoryNotifier, NagContext, StaticTimeSys};
use nag_scheduler_sdk::NagSDK;
use std::sync::Arc;

pub const ADMIN_API_KEY: &str = "test-admin-api-key";
/// 2030-01-01T00:00:00Z
pub const START_TS: i64 = 1_893_456_000_000;

pub struct TestApp {
    pub config: Config,
    pub sys: Arc<StaticTimeSys>,
    pub notifier: Arc<InMemoryNotifier>,
    pub address: String,
}

// Launch the application as a background task
pub async fn spawn_app() -> (TestApp, NagSDK) {
    let mut ctx = NagContext::create_inmemory();
    ctx.config.port = 0; // Random port
    ctx.config.admin_api_key = ADMIN_API_KEY.into();
    // Scans are triggered manually by the tests
    ctx.config.scan_interval_minutes = 0;

    let sys = Arc::new(StaticTimeSys::new(START_TS));
    let notifier = Arc::new(InMemoryNotifier::new());
    ctx.sys = sys.clone();
    ctx.notifier = notifier.clone();

    let config = ctx.config.clone();
    let application = Application::new(ctx)
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}/api/v1", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let app = TestApp {
        config,
        sys,
        notifier,
        address: address.clone(),
    };
    let sdk = NagSDK::new(address, ADMIN_API_KEY);
    (app, sdk)
}
