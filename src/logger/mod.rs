//! Logging capability
//!
//! The services log through this trait rather than calling the tracing
//! macros directly, so a test harness can swap in [`NoopLogger`] and an
//! embedding application can route log lines wherever it wants. Logging
//! is fire-and-forget and never blocks business logic.

use std::error::Error;

/// Structured key/value pairs attached to a log line
pub type LogFields<'a> = &'a [(&'a str, String)];

/// Logging capability consumed by the services
pub trait Logger: Send + Sync {
    fn info(&self, msg: &str, fields: LogFields);
    fn warn(&self, msg: &str, fields: LogFields);
    fn error(&self, msg: &str, err: &dyn Error, fields: LogFields);
    fn debug(&self, msg: &str, fields: LogFields);
}

/// Logger that forwards to the `tracing` facade
///
/// Fields are emitted as a single structured `fields` attribute so that
/// env filters and JSON subscribers see them, not just the message text.
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn info(&self, msg: &str, fields: LogFields) {
        tracing::info!(fields = %format_fields(fields), "{}", msg);
    }

    fn warn(&self, msg: &str, fields: LogFields) {
        tracing::warn!(fields = %format_fields(fields), "{}", msg);
    }

    fn error(&self, msg: &str, err: &dyn Error, fields: LogFields) {
        tracing::error!(error = %err, fields = %format_fields(fields), "{}", msg);
    }

    fn debug(&self, msg: &str, fields: LogFields) {
        tracing::debug!(fields = %format_fields(fields), "{}", msg);
    }
}

/// Logger that discards everything (tests)
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn info(&self, _msg: &str, _fields: LogFields) {}
    fn warn(&self, _msg: &str, _fields: LogFields) {}
    fn error(&self, _msg: &str, _err: &dyn Error, _fields: LogFields) {}
    fn debug(&self, _msg: &str, _fields: LogFields) {}
}

/// Render fields as `key=value key=value`
fn format_fields(fields: LogFields) -> String {
    fields
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_fields() {
        assert_eq!(format_fields(&[]), "");
        assert_eq!(
            format_fields(&[("user_id", "user1".to_string()), ("count", "3".to_string())]),
            "user_id=user1 count=3"
        );
    }
}
