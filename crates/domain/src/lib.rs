mod reminder;
mod reminder_lifecycle;
mod scan;
mod shared;

pub use reminder::{
    Reminder, ReminderStatus, ReminderValidationError, ACKNOWLEDGE_TOKEN_BYTES,
    DEFAULT_EMAIL_INTERVAL_MINUTES, DEFAULT_HOURS_BEFORE_START, MAX_EVENT_NAME_LEN,
};
pub use reminder_lifecycle::{evaluate, LifecycleDecision, HOUR_MILLIS, MINUTE_MILLIS};
pub use scan::ScanSummary;
pub use shared::entity::{Entity, InvalidIDError, ID};
