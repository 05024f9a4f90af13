//! Reference: <https://docs.honeybadger.io/api/reporting-exceptions>

use serde_json::{json, Value};

use crate::adapter::Adapter;
use crate::constants::SDK_IDENTIFIER;
use crate::error::Error;
use crate::protocol::{Environment, Log, LogType};
use crate::transport::Transport;
use crate::utils::timestamp_secs;

const NOTICES_URL: &str = "https://api.honeybadger.io/v1/notices";

/// Reports exceptions to [Honeybadger](https://honeybadger.io).
#[derive(Debug, Clone)]
pub struct HoneyBadger {
    api_key: String,
    transport: Transport,
}

impl HoneyBadger {
    /// Creates the adapter from the project API key.
    pub fn new(api_key: impl Into<String>) -> HoneyBadger {
        HoneyBadger {
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
                    "category": breadcrumb.category(),
                    "timestamp": timestamp_secs(&breadcrumb.timestamp()),
                    "message": breadcrumb.message(),
                    "metadata": {
                        "exception": breadcrumb.ty(),
                    },
                })
            })
            .collect();

        let extra = log.extra();
        let frames: Vec<Value> = super::trace_frames(&extra, "stackTrace")
            .iter()
            .map(|frame| {
                json!({
                    "number": super::frame_field(frame, "number"),
                    "file": super::frame_field(frame, "file"),
                    "method": super::frame_field(frame, "method"),
                })
            })
            .collect();

        let context = log.user().map(|user| {
            json!({
                "user_id": user.id,
                "user_email": user.email,
            })
        });

        json!({
            "notifier": {
                "name": "faultline",
                "url": "https://crates.io/crates/faultline",
                "tags": log.tags(),
                "version": log.version(),
            },
            "error": {
                "class": log.ty(),
                "message": log.message(),
                "backtrace": frames,
            },
            "breadcrumbs": {
                "enabled": true,
                "trail": breadcrumbs,
            },
            "request": {
                "params": super::stringified_extra(log),
                "action": log.action(),
                "context": context,
            },
            "server": {
                "project_root": log.server(),
                "environment_name": log.environment(),
                "hostname": log.server(),
            },
        })
    }
}

impl Adapter for HoneyBadger {
    fn name(&self) -> &'static str {
        "honeyBadger"
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
            NOTICES_URL,
            &[
                ("X-API-Key", self.api_key.as_str()),
                ("Accept", "application/json"),
                ("User-Agent", SDK_IDENTIFIER),
            ],
            &self.payload(log),
        )
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;
    use crate::protocol::User;

    #[test]
    fn test_payload_mapping() {
        let mut log = Log::new();
        log.set_type(LogType::Error);
        log.set_environment(Environment::Production);
        log.set_message("Document efgh5678 not found");
        log.set_version("0.11.5");
        log.set_action("controller.database.deleteDocument");
        log.set_server("digitalocean-us-001");
        log.set_user(User::new("efgh5678").with_email("user@example.com"));
        log.add_extra(
            "stackTrace",
            json!([{ "number": 15, "file": "src/server.js", "method": "deleteDocument" }]),
        );

        let payload = HoneyBadger::new("key").payload(&log);
        assert_eq!(payload["error"]["class"], json!("error"));
        assert_eq!(payload["error"]["backtrace"][0]["file"], json!("src/server.js"));
        assert_eq!(payload["request"]["context"]["user_id"], json!("efgh5678"));
        assert_eq!(payload["server"]["environment_name"], json!("production"));
        assert_eq!(payload["server"]["hostname"], json!("digitalocean-us-001"));
        assert_eq!(payload["breadcrumbs"]["enabled"], json!(true));
    }

    #[test]
    fn test_missing_user_yields_null_context() {
        let payload = HoneyBadger::new("key").payload(&Log::new());
        assert_eq!(payload["request"]["context"], Value::Null);
    }
}
