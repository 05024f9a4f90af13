//! The contract every provider adapter implements.

use std::fmt;

use crate::error::Error;
use crate::protocol::{Environment, Log, LogType};

/// Names of all providers this crate ships an adapter for.
pub const PROVIDERS: &[&str] = &[
    "airbrake",
    "appSignal",
    "bugsnag",
    "datadog",
    "dynatrace",
    "honeyBadger",
    "logOwl",
    "newRelic",
    "raygun",
    "rollBar",
    "sentry",
];

/// A provider-specific sink for logs.
///
/// Implementations declare which subset of the common enumerations they
/// accept and translate a [`Log`] into the provider's wire format, followed
/// by one blocking HTTP POST. Adapters are stateless beyond their
/// credentials and may be shared across threads.
pub trait Adapter: Send + Sync {
    /// Stable unique identifier of the provider, e.g. `"sentry"`.
    fn name(&self) -> &'static str;

    /// The log types this provider accepts.
    fn supported_log_types(&self) -> &'static [LogType];

    /// The environments this provider accepts.
    fn supported_environments(&self) -> &'static [Environment];

    /// The breadcrumb types this provider accepts.
    fn supported_breadcrumb_types(&self) -> &'static [LogType];

    /// Checks that the log only uses types and environments this adapter
    /// declared support for. Pure, performs no I/O.
    fn validate(&self, log: &Log) -> Result<(), Error> {
        let ty = log.ty().ok_or(Error::NotReady)?;
        if !self.supported_log_types().contains(&ty) {
            return Err(Error::UnsupportedLogType {
                adapter: self.name(),
                given: ty,
                supported: display_list(self.supported_log_types()),
            });
        }

        let environment = log.environment().ok_or(Error::NotReady)?;
        if !self.supported_environments().contains(&environment) {
            return Err(Error::UnsupportedEnvironment {
                adapter: self.name(),
                given: environment,
                supported: display_list(self.supported_environments()),
            });
        }

        for breadcrumb in log.breadcrumbs() {
            if !self.supported_breadcrumb_types().contains(&breadcrumb.ty()) {
                return Err(Error::UnsupportedBreadcrumbType {
                    adapter: self.name(),
                    given: breadcrumb.ty(),
                    supported: display_list(self.supported_breadcrumb_types()),
                });
            }
        }

        Ok(())
    }

    /// Serializes the log into the provider's format and submits it,
    /// returning the HTTP status code that was received.
    fn push(&self, log: &Log) -> Result<u16, Error>;
}

pub(crate) fn display_list<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod test {
    use std::time::SystemTime;

    use super::*;
    use crate::protocol::Breadcrumb;

    struct NarrowAdapter;

    impl Adapter for NarrowAdapter {
        fn name(&self) -> &'static str {
            "narrow"
        }

        fn supported_log_types(&self) -> &'static [LogType] {
            &[LogType::Error, LogType::Warning]
        }

        fn supported_environments(&self) -> &'static [Environment] {
            &[Environment::Production]
        }

        fn supported_breadcrumb_types(&self) -> &'static [LogType] {
            &[LogType::Error]
        }

        fn push(&self, _log: &Log) -> Result<u16, Error> {
            unreachable!("validation-only adapter");
        }
    }

    fn valid_log() -> Log {
        let mut log = Log::new();
        log.set_type(LogType::Error);
        log.set_environment(Environment::Production);
        log.set_message("boom");
        log.set_version("1.0.0");
        log.set_action("worker.run");
        log
    }

    #[test]
    fn test_validate_accepts_supported_log() {
        assert!(NarrowAdapter.validate(&valid_log()).is_ok());
    }

    #[test]
    fn test_validate_rejects_unsupported_type() {
        let mut log = valid_log();
        log.set_type(LogType::Debug);
        let err = NarrowAdapter.validate(&log).unwrap_err();
        match err {
            Error::UnsupportedLogType {
                adapter, supported, ..
            } => {
                assert_eq!(adapter, "narrow");
                assert_eq!(supported, "error, warning");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_validate_rejects_unsupported_environment() {
        let mut log = valid_log();
        log.set_environment(Environment::Staging);
        assert!(matches!(
            NarrowAdapter.validate(&log),
            Err(Error::UnsupportedEnvironment { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_unsupported_breadcrumb() {
        let mut log = valid_log();
        log.add_breadcrumb(Breadcrumb::new(
            LogType::Debug,
            "http",
            "GET /health",
            SystemTime::now(),
        ));
        assert!(matches!(
            NarrowAdapter.validate(&log),
            Err(Error::UnsupportedBreadcrumbType { .. })
        ));
    }
}
