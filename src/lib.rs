//! This crate pushes structured error and log events to third-party
//! tracking services (Sentry, Bugsnag, Raygun, AppSignal, Datadog and
//! others) over HTTP.
//!
//! The data model is shared across providers: a [`Log`] describes one
//! reportable occurrence, optionally carrying the acting [`User`] and an
//! ordered trail of [`Breadcrumb`]s. A [`Logger`] owns exactly one
//! [`Adapter`] and mediates every outgoing event through it; each adapter
//! translates the log into its provider's JSON wire format and performs a
//! single blocking POST. The HTTP status code that was received is handed
//! back verbatim, so callers decide their own retry policy. Transport
//! failures (DNS, connection refused, TLS) surface as [`Error::Transport`].
//!
//! There is no queueing, no batching and no retrying: every
//! [`Logger::add_log`] call is synchronous and at-most-once.
//!
//! # Examples
//!
//! ```no_run
//! use faultline::adapters::Sentry;
//! use faultline::{Environment, Log, LogType, Logger, User};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let adapter = Sentry::new("https://key@o1.ingest.sentry.io/42")?;
//! let logger = Logger::new(adapter);
//!
//! let mut log = Log::new();
//! log.set_type(LogType::Error);
//! log.set_environment(Environment::Production);
//! log.set_action("controller.database.deleteDocument");
//! log.set_version("0.11.5");
//! log.set_message("Document efgh5678 not found");
//! log.set_user(User::new("efgh5678"));
//!
//! let status = logger.add_log(&log)?;
//! assert_eq!(status, 200);
//! # Ok(()) }
//! ```

#![warn(missing_docs)]

mod adapter;
pub mod adapters;
mod constants;
mod dsn;
mod error;
mod logger;
pub mod protocol;
mod transport;
mod utils;

pub use crate::adapter::{Adapter, PROVIDERS};
pub use crate::adapters::{
    Airbrake, AppSignal, Bugsnag, Datadog, Dynatrace, HoneyBadger, LogOwl, NewRelic, Raygun,
    Rollbar, Sentry,
};
pub use crate::constants::VERSION;
pub use crate::dsn::{Dsn, ParseDsnError, Scheme};
pub use crate::error::Error;
pub use crate::logger::Logger;
pub use crate::protocol::{
    Breadcrumb, Environment, Log, LogType, ParseEnvironmentError, ParseLogTypeError, User,
};
