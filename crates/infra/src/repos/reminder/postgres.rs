use super::IReminderRepo;
use nag_scheduler_domain::{Reminder, ReminderStatus, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresReminderRepo {
    pool: PgPool,
}

impl PostgresReminderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderRaw {
    reminder_uid: Uuid,
    event_name: String,
    event_ts: i64,
    email_recipients: Vec<String>,
    hours_before_start: i64,
    email_interval_minutes: i64,
    status: String,
    acknowledge_token: String,
    last_notified_ts: Option<i64>,
    acknowledged_ts: Option<i64>,
    created: i64,
    updated: i64,
}

impl std::convert::TryFrom<ReminderRaw> for Reminder {
    type Error = anyhow::Error;

    fn try_from(raw: ReminderRaw) -> Result<Self, Self::Error> {
        Ok(Reminder {
            id: raw.reminder_uid.into(),
            event_name: raw.event_name,
            event_ts: raw.event_ts,
            email_recipients: raw.email_recipients,
            hours_before_start: raw.hours_before_start,
            email_interval_minutes: raw.email_interval_minutes,
            status: raw.status.parse()?,
            acknowledge_token: raw.acknowledge_token,
            last_notified_ts: raw.last_notified_ts,
            acknowledged_ts: raw.acknowledged_ts,
            created: raw.created,
            updated: raw.updated,
        })
    }
}

fn into_reminders(raws: Vec<ReminderRaw>) -> anyhow::Result<Vec<Reminder>> {
    use std::convert::TryInto;
    raws.into_iter().map(|raw| raw.try_into()).collect()
}

fn into_reminder(raw: Option<ReminderRaw>) -> anyhow::Result<Option<Reminder>> {
    use std::convert::TryInto;
    raw.map(|raw| raw.try_into()).transpose()
}

#[async_trait::async_trait]
impl IReminderRepo for PostgresReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reminders
            (reminder_uid, event_name, event_ts, email_recipients, hours_before_start,
            email_interval_minutes, status, acknowledge_token, last_notified_ts,
            acknowledged_ts, created, updated)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(reminder.id.inner_ref())
        .bind(&reminder.event_name)
        .bind(reminder.event_ts)
        .bind(&reminder.email_recipients)
        .bind(reminder.hours_before_start)
        .bind(reminder.email_interval_minutes)
        .bind(reminder.status.as_str())
        .bind(&reminder.acknowledge_token)
        .bind(reminder.last_notified_ts)
        .bind(reminder.acknowledged_ts)
        .bind(reminder.created)
        .bind(reminder.updated)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Saves the editable fields. Status and lifecycle timestamps are only
    /// changed through the conditional updates.
    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE reminders
            SET event_name = $2,
            event_ts = $3,
            email_recipients = $4,
            hours_before_start = $5,
            email_interval_minutes = $6,
            updated = $7
            WHERE reminder_uid = $1
            "#,
        )
        .bind(reminder.id.inner_ref())
        .bind(&reminder.event_name)
        .bind(reminder.event_ts)
        .bind(&reminder.email_recipients)
        .bind(reminder.hours_before_start)
        .bind(reminder.email_interval_minutes)
        .bind(reminder.updated)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        let raw: Option<ReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.reminder_uid = $1
            "#,
        )
        .bind(reminder_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;

        into_reminder(raw)
    }

    async fn find_by_token(&self, acknowledge_token: &str) -> anyhow::Result<Option<Reminder>> {
        let raw: Option<ReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.acknowledge_token = $1
            "#,
        )
        .bind(acknowledge_token)
        .fetch_optional(&self.pool)
        .await?;

        into_reminder(raw)
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Reminder>> {
        let raws: Vec<ReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminders AS r
            ORDER BY r.event_ts DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        into_reminders(raws)
    }

    async fn find_by_status(&self, status: ReminderStatus) -> anyhow::Result<Vec<Reminder>> {
        let raws: Vec<ReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.status = $1
            "#,
        )
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await?;

        into_reminders(raws)
    }

    async fn update_status(
        &self,
        reminder_id: &ID,
        from: ReminderStatus,
        to: ReminderStatus,
        now: i64,
    ) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            UPDATE reminders
            SET status = $3,
            updated = $4
            WHERE reminder_uid = $1 AND status = $2
            "#,
        )
        .bind(reminder_id.inner_ref())
        .bind(from.as_str())
        .bind(to.as_str())
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected() == 1)
    }

    async fn update_last_notified(
        &self,
        reminder_id: &ID,
        notified_ts: i64,
    ) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            UPDATE reminders
            SET last_notified_ts = $2,
            updated = $2
            WHERE reminder_uid = $1 AND status = 'active' AND acknowledged_ts IS NULL
            "#,
        )
        .bind(reminder_id.inner_ref())
        .bind(notified_ts)
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected() == 1)
    }

    async fn acknowledge(&self, reminder_id: &ID, now: i64) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            UPDATE reminders
            SET status = 'acknowledged',
            acknowledged_ts = $2,
            updated = $2
            WHERE reminder_uid = $1 AND status <> 'acknowledged'
            "#,
        )
        .bind(reminder_id.inner_ref())
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected() == 1)
    }

    async fn delete(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        let raw: Option<ReminderRaw> = sqlx::query_as(
            r#"
            DELETE FROM reminders AS r
            WHERE r.reminder_uid = $1
            RETURNING *
            "#,
        )
        .bind(reminder_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;

        into_reminder(raw)
    }
}
