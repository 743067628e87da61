use crate::reminder::{Reminder, ReminderStatus};

pub const MINUTE_MILLIS: i64 = 1000 * 60;
pub const HOUR_MILLIS: i64 = MINUTE_MILLIS * 60;

/// The outcome of evaluating a `Reminder` at a given point in time.
///
/// The decision is only a description of what should happen, applying
/// it to storage and sending the notification is up to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LifecycleDecision {
    /// The status the `Reminder` should transition to, if any
    pub new_status: Option<ReminderStatus>,
    /// Whether the recipients of the `Reminder` should be notified
    pub should_notify: bool,
}

impl Reminder {
    /// Timestamp in millis at which the `Reminder` goes from `Pending` to `Active`
    pub fn activation_ts(&self) -> i64 {
        self.event_ts
            .saturating_sub(self.hours_before_start.saturating_mul(HOUR_MILLIS))
    }

    pub fn is_activation_due(&self, now: i64) -> bool {
        self.status == ReminderStatus::Pending && now >= self.activation_ts()
    }

    /// Timestamp in millis at which the next notification is due.
    /// `None` means that a notification is due right away.
    pub fn next_notification_ts(&self) -> Option<i64> {
        self.last_notified_ts.map(|last_notified| {
            last_notified.saturating_add(self.email_interval_minutes.saturating_mul(MINUTE_MILLIS))
        })
    }

    fn is_notification_interval_elapsed(&self, now: i64) -> bool {
        if self.acknowledged_ts.is_some() {
            return false;
        }
        match self.next_notification_ts() {
            None => true,
            Some(next_ts) => now >= next_ts,
        }
    }
}

/// Decides what should happen to the `Reminder` at `now`.
///
/// A `Pending` reminder whose activation time has arrived is moved to `Active`
/// and the notification check is done as if it already was `Active`.
/// An `Acknowledged` reminder is never touched again.
pub fn evaluate(reminder: &Reminder, now: i64) -> LifecycleDecision {
    match reminder.status {
        ReminderStatus::Acknowledged => LifecycleDecision::default(),
        ReminderStatus::Pending => {
            if reminder.is_activation_due(now) {
                LifecycleDecision {
                    new_status: Some(ReminderStatus::Active),
                    should_notify: reminder.is_notification_interval_elapsed(now),
                }
            } else {
                LifecycleDecision::default()
            }
        }
        ReminderStatus::Active => LifecycleDecision {
            new_status: None,
            should_notify: reminder.is_notification_interval_elapsed(now),
        },
    }
}
