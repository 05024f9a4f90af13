//! Reference: <https://develop.sentry.dev/sdk/event-payloads/>

use serde_json::{json, Value};

use crate::adapter::Adapter;
use crate::constants::SDK_IDENTIFIER;
use crate::dsn::{Dsn, ParseDsnError};
use crate::error::Error;
use crate::protocol::{Environment, Log, LogType};
use crate::transport::Transport;
use crate::utils::datetime_to_timestamp;

/// Reports events to [Sentry](https://sentry.io), self-hosted or not.
#[derive(Debug, Clone)]
pub struct Sentry {
    dsn: Dsn,
    transport: Transport,
}

impl Sentry {
    /// Creates the adapter from a Sentry DSN such as
    /// `https://{key}@o1.ingest.sentry.io/{project}`, failing fast on a
    /// malformed one.
    pub fn new(dsn: &str) -> Result<Sentry, ParseDsnError> {
        Ok(Sentry {
            dsn: dsn.parse()?,
            transport: Transport::new(),
        })
    }

    /// Returns the DSN this adapter reports to.
    pub fn dsn(&self) -> &Dsn {
        &self.dsn
    }

    fn auth_header(&self) -> String {
        format!(
            "Sentry sentry_version=7, sentry_key={}, sentry_client={}",
            self.dsn.public_key(),
            SDK_IDENTIFIER
        )
    }

    fn payload(&self, log: &Log) -> Value {
        let breadcrumbs: Vec<Value> = log
            .breadcrumbs()
            .iter()
            .map(|breadcrumb| {
                json!({
                    "type": "default",
                    "level": breadcrumb.ty(),
                    "category": breadcrumb.category(),
                    "message": breadcrumb.message(),
                    "timestamp": datetime_to_timestamp(&breadcrumb.timestamp()),
                })
            })
            .collect();

        let extra = log.extra();
        // Sentry expects frames ordered from the oldest call to the newest.
        let mut frames: Vec<Value> = super::trace_frames(&extra, "detailedTrace")
            .iter()
            .map(|frame| {
                json!({
                    "filename": super::frame_field(frame, "file"),
                    "lineno": super::frame_field(frame, "line"),
                    "function": super::frame_field(frame, "function"),
                })
            })
            .collect();
        frames.reverse();

        json!({
            "timestamp": datetime_to_timestamp(&log.timestamp()),
            "platform": "rust",
            "level": "error",
            "logger": log.namespace(),
            "transaction": log.action(),
            "server_name": log.server(),
            "release": log.version(),
            "environment": log.environment(),
            "message": {
                "message": log.message(),
            },
            "exception": {
                "values": [{
                    "type": log.message(),
                    "stacktrace": {
                        "frames": frames,
                    },
                }],
            },
            "tags": log.tags(),
            "extra": extra,
            "breadcrumbs": breadcrumbs,
            "user": log.user(),
        })
    }
}

impl Adapter for Sentry {
    fn name(&self) -> &'static str {
        "sentry"
    }

    fn supported_log_types(&self) -> &'static [LogType] {
        &[
            LogType::Info,
            LogType::Debug,
            LogType::Warning,
            LogType::Error,
        ]
    }

    fn supported_environments(&self) -> &'static [Environment] {
        &[Environment::Staging, Environment::Production]
    }

    fn supported_breadcrumb_types(&self) -> &'static [LogType] {
        &[
            LogType::Info,
            LogType::Debug,
            LogType::Warning,
            LogType::Error,
        ]
    }

    fn push(&self, log: &Log) -> Result<u16, Error> {
        let auth = self.auth_header();
        self.transport.post(
            &self.dsn.store_api_url(),
            &[("X-Sentry-Auth", auth.as_str())],
            &self.payload(log),
        )
    }
}
