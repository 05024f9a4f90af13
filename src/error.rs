use thiserror::Error;

use crate::protocol::{Environment, LogType};

/// Errors surfaced by the dispatcher and the adapters.
///
/// Received HTTP status codes, including 4xx and 5xx, are not errors: they
/// are returned as data from [`push`](crate::Adapter::push) so the caller
/// can decide its own retry policy. Only failures that prevent a status
/// from being received at all end up here.
#[derive(Debug, Error)]
pub enum Error {
    /// A required `Log` field is missing; nothing was sent.
    #[error("log is not ready to be pushed")]
    NotReady,
    /// The active adapter does not accept this log type.
    #[error("adapter `{adapter}` does not support log type `{given}` (supported: {supported})")]
    UnsupportedLogType {
        /// Name of the rejecting adapter.
        adapter: &'static str,
        /// The log type that was rejected.
        given: LogType,
        /// The set of types the adapter declared support for.
        supported: String,
    },
    /// The active adapter does not accept this environment.
    #[error("adapter `{adapter}` does not support environment `{given}` (supported: {supported})")]
    UnsupportedEnvironment {
        /// Name of the rejecting adapter.
        adapter: &'static str,
        /// The environment that was rejected.
        given: Environment,
        /// The set of environments the adapter declared support for.
        supported: String,
    },
    /// A breadcrumb carries a type the active adapter does not accept.
    #[error(
        "adapter `{adapter}` does not support breadcrumb type `{given}` (supported: {supported})"
    )]
    UnsupportedBreadcrumbType {
        /// Name of the rejecting adapter.
        adapter: &'static str,
        /// The breadcrumb type that was rejected.
        given: LogType,
        /// The set of breadcrumb types the adapter declared support for.
        supported: String,
    },
    /// The sampling rate is outside of `[0, 100]`.
    #[error("sample rate must be between 0 and 100, got {0}")]
    InvalidSampleRate(f64),
    /// The HTTP transport failed before any status was received.
    #[error("transport failure: {0}")]
    Transport(#[source] Box<ureq::Transport>),
}
