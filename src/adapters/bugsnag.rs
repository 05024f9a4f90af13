//! Reference: <https://bugsnagerrorreportingapi.docs.apiary.io/#reference/0/notify/send-error-reports>

use serde_json::{json, Value};

use crate::adapter::Adapter;
use crate::error::Error;
use crate::protocol::{Environment, Log, LogType};
use crate::transport::Transport;
use crate::utils::to_rfc3339;

const NOTIFY_URL: &str = "https://notify.bugsnag.com/";
const PAYLOAD_VERSION: &str = "5";

/// Reports events to [Bugsnag](https://bugsnag.com).
#[derive(Debug, Clone)]
pub struct Bugsnag {
    api_key: String,
    transport: Transport,
}

impl Bugsnag {
    /// Creates the adapter from the notifier API key.
    pub fn new(api_key: impl Into<String>) -> Bugsnag {
        Bugsnag {
            api_key: api_key.into(),
            transport: Transport::new(),
        }
    }

    fn payload(&self, log: &Log) -> Value {
        let breadcrumbs: Vec<Value> = log
            .breadcrumbs()
            .iter()
            .map(|breadcrumb| {
                json!({
                    "timestamp": to_rfc3339(&breadcrumb.timestamp()),
                    "name": breadcrumb.message(),
                    "type": "manual",
                    "metaData": {
                        "type": breadcrumb.ty(),
                        "category": breadcrumb.category(),
                    },
                })
            })
            .collect();

        let extra = log.extra();
        let frames: Vec<Value> = super::trace_frames(&extra, "detailedTrace")
            .iter()
            .map(|frame| {
                json!({
                    "file": super::frame_field(frame, "file"),
                    "lineNumber": super::frame_field(frame, "line"),
                    "method": super::frame_field(frame, "function"),
                })
            })
            .collect();

        json!({
            "payloadVersion": PAYLOAD_VERSION,
            "notifier": {
                "name": "faultline",
                "version": log.version(),
                "url": "https://crates.io/crates/faultline",
            },
            "events": [{
                "exceptions": [{
                    "errorClass": log.ty(),
                    "message": log.message(),
                    "stacktrace": frames,
                    "type": "rust",
                }],
                "breadcrumbs": breadcrumbs,
                "context": log.action(),
                "groupingHash": log.namespace(),
                "user": log.user(),
                "app": {
                    "releaseStage": log.environment(),
                },
                "device": {
                    "hostname": log.server(),
                    "time": to_rfc3339(&log.timestamp()),
                },
                "metaData": log.tags(),
            }],
        })
    }
}

impl Adapter for Bugsnag {
    fn name(&self) -> &'static str {
        "bugsnag"
    }

    fn supported_log_types(&self) -> &'static [LogType] {
        &[
            LogType::Info,
            LogType::Debug,
            LogType::Verbose,
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
            LogType::Verbose,
            LogType::Warning,
            LogType::Error,
        ]
    }

    fn push(&self, log: &Log) -> Result<u16, Error> {
        self.transport.post(
            NOTIFY_URL,
            &[
                ("Bugsnag-Api-Key", self.api_key.as_str()),
                ("Bugsnag-Payload-Version", PAYLOAD_VERSION),
            ],
            &self.payload(log),
        )
    }
}

#[cfg(test)]
mod test {
    use std::time::SystemTime;

    use serde_json::json;

    use super::*;
    use crate::protocol::Breadcrumb;

    #[test]
    fn test_payload_mapping() {
        let mut log = Log::new();
        log.set_type(LogType::Error);
        log.set_environment(Environment::Production);
        log.set_message("Document efgh5678 not found");
        log.set_version("0.11.5");
        log.set_action("controller.database.deleteDocument");
        log.set_server("digitalocean-us-001");
        log.add_breadcrumb(Breadcrumb::new(
            LogType::Info,
            "auth",
            "Using API key",
            SystemTime::now(),
        ));

        let payload = Bugsnag::new("key").payload(&log);
        let event = &payload["events"][0];
        assert_eq!(payload["payloadVersion"], json!("5"));
        assert_eq!(event["exceptions"][0]["errorClass"], json!("error"));
        assert_eq!(
            event["exceptions"][0]["message"],
            json!("Document efgh5678 not found")
        );
        assert_eq!(event["context"], json!("controller.database.deleteDocument"));
        assert_eq!(event["app"]["releaseStage"], json!("production"));
        assert_eq!(event["device"]["hostname"], json!("digitalocean-us-001"));
        assert_eq!(event["breadcrumbs"][0]["type"], json!("manual"));
        assert_eq!(
            event["breadcrumbs"][0]["metaData"]["category"],
            json!("auth")
        );
    }
}
