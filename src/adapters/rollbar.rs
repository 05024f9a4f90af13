//! Reference: <https://docs.rollbar.com/reference/create-item>

use serde_json::{json, Value};

use crate::adapter::Adapter;
use crate::error::Error;
use crate::protocol::{Environment, Log, LogType};
use crate::transport::Transport;
use crate::utils::timestamp_secs;

const ITEM_URL: &str = "https://api.rollbar.com/api/1/item";

/// Reports items to [Rollbar](https://rollbar.com).
#[derive(Debug, Clone)]
pub struct Rollbar {
    access_token: String,
    transport: Transport,
}

impl Rollbar {
    /// Creates the adapter from the project access token.
    pub fn new(access_token: impl Into<String>) -> Rollbar {
        Rollbar {
            access_token: access_token.into(),
            transport: Transport::new(),
        }
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
                })
            })
            .collect();

        let person = log.user().map(|user| {
            json!({
                "id": user.id,
                "username": user.username,
                "email": user.email,
            })
        });

        json!({
            "data": {
                "environment": log.environment(),
                "body": {
                    "message": {
                        "body": log.message(),
                    },
                    "timestamp": timestamp_secs(&log.timestamp()),
                },
                "trace_chain": breadcrumbs,
                "level": log.ty(),
                "custom": super::labelled_tags(log),
                "person": person,
            },
        })
    }
}

impl Adapter for Rollbar {
    fn name(&self) -> &'static str {
        "rollBar"
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
        self.transport.post(
            ITEM_URL,
            &[("X-Rollbar-Access-Token", self.access_token.as_str())],
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
        log.set_type(LogType::Warning);
        log.set_environment(Environment::Staging);
        log.set_message("Disk almost full");
        log.set_version("0.11.5");
        log.set_action("worker.cleanup");
        log.set_user(User::new("efgh5678").with_username("jorge"));

        let payload = Rollbar::new("token").payload(&log);
        let data = &payload["data"];
        assert_eq!(data["environment"], json!("staging"));
        assert_eq!(data["level"], json!("warning"));
        assert_eq!(data["body"]["message"]["body"], json!("Disk almost full"));
        assert_eq!(data["person"]["id"], json!("efgh5678"));
        assert_eq!(data["person"]["username"], json!("jorge"));
        let custom = data["custom"].as_array().unwrap();
        assert!(custom.contains(&json!("type: warning")));
    }
}
