/// Result of one scan over all in-flight `Reminder`s
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanSummary {
    /// Number of `Reminder`s that went from `Pending` to `Active`
    pub activated: usize,
    /// Number of `Reminder`s whose recipients were successfully notified
    pub notified: usize,
    /// One message per failed notification, formatted as `<event name>: <error>`
    pub errors: Vec<String>,
    /// Timestamp in millis the scan was evaluated at
    pub scanned_at: i64,
}

impl ScanSummary {
    pub fn new(scanned_at: i64) -> Self {
        Self {
            scanned_at,
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.activated == 0 && self.notified == 0 && self.errors.is_empty()
    }
}
