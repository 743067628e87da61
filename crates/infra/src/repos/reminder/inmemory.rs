use super::IReminderRepo;
use crate::repos::shared::inmemory_repo::*;
use nag_scheduler_domain::{Reminder, ReminderStatus, ID};

pub struct InMemoryReminderRepo {
    reminders: std::sync::Mutex<Vec<Reminder>>,
}

impl InMemoryReminderRepo {
    pub fn new() -> Self {
        Self {
            reminders: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        insert(reminder, &self.reminders);
        Ok(())
    }

    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()> {
        update_if(
            &reminder.id,
            &self.reminders,
            |_| true,
            |r| {
                r.event_name = reminder.event_name.clone();
                r.event_ts = reminder.event_ts;
                r.email_recipients = reminder.email_recipients.clone();
                r.hours_before_start = reminder.hours_before_start;
                r.email_interval_minutes = reminder.email_interval_minutes;
                r.updated = reminder.updated;
            },
        );
        Ok(())
    }

    async fn find(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        Ok(find(reminder_id, &self.reminders))
    }

    async fn find_by_token(&self, acknowledge_token: &str) -> anyhow::Result<Option<Reminder>> {
        let mut reminders = find_by(&self.reminders, |r| {
            r.acknowledge_token == acknowledge_token
        });
        if reminders.is_empty() {
            return Ok(None);
        }
        Ok(Some(reminders.remove(0)))
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Reminder>> {
        let mut reminders = find_by(&self.reminders, |_| true);
        reminders.sort_by(|r1, r2| r2.event_ts.cmp(&r1.event_ts));
        Ok(reminders)
    }

    async fn find_by_status(&self, status: ReminderStatus) -> anyhow::Result<Vec<Reminder>> {
        Ok(find_by(&self.reminders, |r| r.status == status))
    }

    async fn update_status(
        &self,
        reminder_id: &ID,
        from: ReminderStatus,
        to: ReminderStatus,
        now: i64,
    ) -> anyhow::Result<bool> {
        Ok(update_if(
            reminder_id,
            &self.reminders,
            |r| r.status == from,
            |r| {
                r.status = to;
                r.updated = now;
            },
        ))
    }

    async fn update_last_notified(
        &self,
        reminder_id: &ID,
        notified_ts: i64,
    ) -> anyhow::Result<bool> {
        Ok(update_if(
            reminder_id,
            &self.reminders,
            |r| r.status == ReminderStatus::Active && r.acknowledged_ts.is_none(),
            |r| {
                r.last_notified_ts = Some(notified_ts);
                r.updated = notified_ts;
            },
        ))
    }

    async fn acknowledge(&self, reminder_id: &ID, now: i64) -> anyhow::Result<bool> {
        Ok(update_if(
            reminder_id,
            &self.reminders,
            |r| !r.is_acknowledged(),
            |r| {
                r.acknowledge(now);
            },
        ))
    }

    async fn delete(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        Ok(delete(reminder_id, &self.reminders))
    }
}
