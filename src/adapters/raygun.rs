//! Reference: <https://raygun.com/documentation/product-guides/crash-reporting/api/>

use serde_json::{json, Value};

use crate::adapter::Adapter;
use crate::error::Error;
use crate::protocol::{Environment, Log, LogType};
use crate::transport::Transport;
use crate::utils::timestamp_secs;

const ENTRIES_URL: &str = "https://api.raygun.com/entries";

/// Reports crashes to [Raygun](https://raygun.com).
#[derive(Debug, Clone)]
pub struct Raygun {
    api_key: String,
    transport: Transport,
}

impl Raygun {
    /// Creates the adapter from the application API key.
    pub fn new(api_key: impl Into<String>) -> Raygun {
        Raygun {
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
                    "message": breadcrumb.message(),
                    "type": breadcrumb.ty(),
                    "level": "request",
                    "timestamp": timestamp_secs(&breadcrumb.timestamp()),
                })
            })
            .collect();

        let user = match log.user() {
            Some(user) => json!({
                "isAnonymous": false,
                "identifier": user.id,
                "email": user.email,
                "fullName": user.username,
            }),
            None => json!({ "isAnonymous": true }),
        };

        json!({
            "occurredOn": timestamp_secs(&log.timestamp()),
            "details": {
                "machineName": log.server(),
                "groupingKey": log.namespace(),
                "version": log.version(),
                "error": {
                    "className": log.action(),
                    "message": log.message(),
                },
                "tags": super::labelled_tags(log),
                "userCustomData": log.extra(),
                "user": user,
                "breadcrumbs": breadcrumbs,
            },
        })
    }
}

impl Adapter for Raygun {
    fn name(&self) -> &'static str {
        "raygun"
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
            ENTRIES_URL,
            &[("X-ApiKey", self.api_key.as_str())],
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
        log.set_user(User::new("efgh5678"));
        log.add_tag("sdk", "Flutter");

        let payload = Raygun::new("key").payload(&log);
        let details = &payload["details"];
        assert_eq!(details["version"], json!("0.11.5"));
        assert_eq!(
            details["error"]["className"],
            json!("controller.database.deleteDocument")
        );
        assert_eq!(details["user"]["isAnonymous"], json!(false));
        assert_eq!(details["user"]["identifier"], json!("efgh5678"));
        let tags = details["tags"].as_array().unwrap();
        assert!(tags.contains(&json!("sdk: Flutter")));
        assert!(tags.contains(&json!("environment: production")));
    }

    #[test]
    fn test_missing_user_is_anonymous() {
        let payload = Raygun::new("key").payload(&Log::new());
        assert_eq!(payload["details"]["user"]["isAnonymous"], json!(true));
    }
}
