mod inmemory;
mod postgres;

pub use inmemory::InMemoryReminderRepo;
use nag_scheduler_domain::{Reminder, ReminderStatus, ID};
pub use postgres::PostgresReminderRepo;

/// Storage of `Reminder`s.
///
/// The `update_*` and `acknowledge` methods are conditional updates: they only
/// touch the `Reminder` when it is still in the expected state and return
/// whether a row was changed. This makes overlapping scans harmless.
#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()>;
    /// Writes the editable fields. Status and lifecycle timestamps are
    /// only changed through the conditional updates below.
    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()>;
    async fn find(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>>;
    async fn find_by_token(&self, acknowledge_token: &str) -> anyhow::Result<Option<Reminder>>;
    /// All `Reminder`s, latest event first
    async fn find_all(&self) -> anyhow::Result<Vec<Reminder>>;
    async fn find_by_status(&self, status: ReminderStatus) -> anyhow::Result<Vec<Reminder>>;
    /// Sets the status to `to` if it currently is `from`
    async fn update_status(
        &self,
        reminder_id: &ID,
        from: ReminderStatus,
        to: ReminderStatus,
        now: i64,
    ) -> anyhow::Result<bool>;
    /// Sets `last_notified_ts` if the `Reminder` is still `Active`
    async fn update_last_notified(&self, reminder_id: &ID, notified_ts: i64)
        -> anyhow::Result<bool>;
    /// Moves the `Reminder` to `Acknowledged` unless it already is
    async fn acknowledge(&self, reminder_id: &ID, now: i64) -> anyhow::Result<bool>;
    async fn delete(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>>;
}
