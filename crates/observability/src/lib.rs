//! Logging setup shared by the store and the binary.

/// Logging configuration.
pub mod logging;

/// Subscriber construction (filters, sinks, formats).
pub mod tracing;

pub use self::logging::{LogConfig, LogFormat, LogTarget};
pub use self::tracing::{ObservabilityError, build_dispatch, init};
pub use ::tracing::Dispatch;
