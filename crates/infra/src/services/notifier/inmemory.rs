use super::{DeliveryInfo, INotifier};
use nag_scheduler_domain::Reminder;
use std::sync::Mutex;
use tracing::info;

/// Notifier that keeps the sent `Reminder`s in memory.
///
/// Used when no email gateway is configured and in tests, where it can
/// also be told to fail for specific recipients.
pub struct InMemoryNotifier {
    sent: Mutex<Vec<Reminder>>,
    failing_recipients: Mutex<Vec<String>>,
}

impl InMemoryNotifier {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(vec![]),
            failing_recipients: Mutex::new(vec![]),
        }
    }

    /// Every `Reminder` that has been successfully sent, in order
    pub fn sent(&self) -> Vec<Reminder> {
        self.sent.lock().unwrap().clone()
    }

    /// Makes every delivery to this recipient fail
    pub fn fail_for_recipient(&self, recipient: &str) {
        self.failing_recipients
            .lock()
            .unwrap()
            .push(recipient.to_string());
    }
}

impl Default for InMemoryNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl INotifier for InMemoryNotifier {
    async fn send(&self, reminder: &Reminder) -> anyhow::Result<DeliveryInfo> {
        let failing = self
            .failing_recipients
            .lock()
            .unwrap()
            .iter()
            .find(|r| reminder.email_recipients.contains(r))
            .cloned();
        if let Some(recipient) = failing {
            return Err(anyhow::anyhow!("Unable to deliver email to {}", recipient));
        }

        info!(
            "Recorded notification for reminder: {} to {:?}",
            reminder.id, reminder.email_recipients
        );
        self.sent.lock().unwrap().push(reminder.clone());
        Ok(DeliveryInfo {
            recipients: reminder.email_recipients.clone(),
            provider_id: None,
        })
    }
}
