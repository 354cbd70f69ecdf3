//! crates/logging/src/tracing_macros.rs
//! Convenience macros for streamkit-specific tracing.
//!
//! These macros wrap the standard tracing macros with the target of one
//! [`LogDomain`](crate::LogDomain). Callers must depend on `tracing`.

/// Emit a buffer trace (stream attach, drain, failure, compaction).
///
/// # Example
/// ```ignore
/// trace_buffer!(buffered = len, "stream attached");
/// ```
#[macro_export]
macro_rules! trace_buffer {
    ($($arg:tt)*) => {
        ::tracing::trace!(target: "streamkit::buffer", $($arg)*);
    };
}

/// Emit a buffer lifecycle event, shown from [`LogLevel::On`](crate::LogLevel::On) up.
#[macro_export]
macro_rules! info_buffer {
    ($($arg:tt)*) => {
        ::tracing::info!(target: "streamkit::buffer", $($arg)*);
    };
}

/// Emit a buffer debug event for conditions a caller may want to see.
#[macro_export]
macro_rules! debug_buffer {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "streamkit::buffer", $($arg)*);
    };
}

/// Emit a codec lifecycle event (a stream completed).
#[macro_export]
macro_rules! info_codec {
    ($($arg:tt)*) => {
        ::tracing::info!(target: "streamkit::codec", $($arg)*);
    };
}

/// Emit a codec debug event (state transitions, terminal statuses).
///
/// # Example
/// ```ignore
/// debug_codec!(status = %status, "codec finished");
/// ```
#[macro_export]
macro_rules! debug_codec {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "streamkit::codec", $($arg)*);
    };
}

/// Emit a per-call codec trace.
#[macro_export]
macro_rules! trace_codec {
    ($($arg:tt)*) => {
        ::tracing::trace!(target: "streamkit::codec", $($arg)*);
    };
}

/// Emit a wire-format trace.
#[macro_export]
macro_rules! trace_wire {
    ($($arg:tt)*) => {
        ::tracing::trace!(target: "streamkit::wire", $($arg)*);
    };
}
