use super::{DeliveryInfo, EmailMessage, INotifier};
use crate::Config;
use nag_scheduler_domain::Reminder;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, info};

#[derive(Debug, Serialize)]
struct EmailAddress {
    email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

#[derive(Debug, Serialize)]
struct EmailPayload {
    to: Vec<EmailAddress>,
    from: EmailAddress,
    subject: String,
    html: String,
}

#[derive(Debug, Deserialize, Default)]
struct EmailGatewayResponse {
    #[serde(default)]
    id: Option<String>,
}

/// Sends reminder emails through an HTTP email gateway
pub struct EmailGatewayNotifier {
    client: Client,
    config: Config,
}

impl EmailGatewayNotifier {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.notifier_timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    fn payload(&self, message: EmailMessage) -> EmailPayload {
        let gateway = &self.config.email_gateway;
        EmailPayload {
            to: message
                .to
                .into_iter()
                .map(|email| EmailAddress { email, name: None })
                .collect(),
            from: EmailAddress {
                email: gateway.from_address.clone(),
                name: Some(gateway.from_name.clone()),
            },
            subject: message.subject,
            html: message.html,
        }
    }
}

#[async_trait::async_trait]
impl INotifier for EmailGatewayNotifier {
    async fn send(&self, reminder: &Reminder) -> anyhow::Result<DeliveryInfo> {
        let gateway = &self.config.email_gateway;
        let message = EmailMessage::for_reminder(reminder, &self.config);
        let recipients = message.to.clone();

        let mut req = self.client.post(&gateway.api_url).json(&self.payload(message));
        if let Some(api_key) = &gateway.api_key {
            req = req.bearer_auth(api_key);
        }

        let res = match req.send().await {
            Ok(res) => res,
            Err(e) => {
                error!(
                    "Unable to reach email gateway for reminder: {}. Error: {:?}",
                    reminder.id, e
                );
                return Err(e.into());
            }
        };

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            error!(
                "Email gateway rejected reminder: {} with status: {}. Body: {}",
                reminder.id, status, body
            );
            return Err(anyhow::anyhow!(
                "Email gateway responded with status {}",
                status
            ));
        }

        let body = res
            .json::<EmailGatewayResponse>()
            .await
            .unwrap_or_default();
        info!("Email sent for reminder: {}", reminder.id);

        Ok(DeliveryInfo {
            recipients,
            provider_id: body.id,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(api_url: String) -> Config {
        let mut config = Config::new();
        config.app_url = "https://nag.example.com".into();
        config.email_gateway.api_url = api_url;
        config.email_gateway.api_key = Some("gateway-key".into());
        config.email_gateway.from_address = "nag@example.com".into();
        config.email_gateway.from_name = "Nag".into();
        config.notifier_timeout_secs = 2;
        config
    }

    fn reminder() -> Reminder {
        Reminder::new(
            "Dentist".into(),
            0,
            vec!["a@example.com".into(), "b@example.com".into()],
            6,
            30,
            0,
        )
    }

    #[tokio::test]
    async fn sends_reminder_to_gateway() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v1/emails"))
            .and(header("authorization", "Bearer gateway-key"))
            .and(body_partial_json(json!({
                "to": [{"email": "a@example.com"}, {"email": "b@example.com"}],
                "from": {"email": "nag@example.com", "name": "Nag"},
                "subject": "Reminder: Dentist"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "msg_1" })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let notifier =
            EmailGatewayNotifier::new(config(format!("{}/api/v1/emails", mock_server.uri())))
                .unwrap();
        let info = notifier.send(&reminder()).await.expect("To send reminder");
        assert_eq!(info.provider_id, Some("msg_1".into()));
        assert_eq!(info.recipients.len(), 2);
    }

    #[tokio::test]
    async fn accepts_response_without_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&mock_server)
            .await;

        let notifier = EmailGatewayNotifier::new(config(mock_server.uri())).unwrap();
        let info = notifier.send(&reminder()).await.expect("To send reminder");
        assert!(info.provider_id.is_none());
    }

    #[tokio::test]
    async fn maps_error_status_to_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("gateway down"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let notifier = EmailGatewayNotifier::new(config(mock_server.uri())).unwrap();
        let err = notifier.send(&reminder()).await.unwrap_err();
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn times_out_on_slow_gateway() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&mock_server)
            .await;

        let notifier = EmailGatewayNotifier::new(config(mock_server.uri())).unwrap();
        assert!(notifier.send(&reminder()).await.is_err());
    }
}
