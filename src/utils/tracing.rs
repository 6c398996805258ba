//! Logging macros for security and audit events.

/// Log a security-relevant event at WARN level
///
/// Use this for failed authentication and other rejected credentials.
#[macro_export]
macro_rules! security_event {
    ($event:expr, $($field:tt)*) => {
        tracing::warn!(
            security.event = $event,
            $($field)*
        )
    };
}

/// Log an audit event at INFO level
///
/// Use this for data modifications: course writes and enrollments.
#[macro_export]
macro_rules! audit_event {
    ($action:expr, $resource:expr, $($field:tt)*) => {
        tracing::info!(
            audit.action = $action,
            audit.resource = $resource,
            $($field)*
        )
    };
}
