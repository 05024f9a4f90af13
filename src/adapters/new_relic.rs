//! Reference: <https://docs.newrelic.com/docs/logs/log-api/introduction-log-api>

use serde_json::{json, Map as JsonMap, Value};

use crate::adapter::Adapter;
use crate::error::Error;
use crate::protocol::{Environment, Log, LogType};
use crate::transport::Transport;
use crate::utils::timestamp_secs;

const DEFAULT_API_URL: &str = "https://log-api.newrelic.com/log/v1";

/// Ships logs to the [New Relic](https://newrelic.com) log API.
#[derive(Debug, Clone)]
pub struct NewRelic {
    license_key: String,
    api_url: String,
    transport: Transport,
}

impl NewRelic {
    /// Creates the adapter from the account license key.
    pub fn new(license_key: impl Into<String>) -> NewRelic {
        NewRelic {
            license_key: license_key.into(),
            api_url: DEFAULT_API_URL.to_string(),
            transport: Transport::new(),
        }
    }

    /// Points the adapter at a different intake, e.g.
    /// `https://log-api.eu.newrelic.com/log/v1` for EU accounts.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> NewRelic {
        self.api_url = api_url.into();
        self
    }

    fn payload(&self, log: &Log) -> Value {
        let breadcrumbs: Vec<Value> = log
            .breadcrumbs()
            .iter()
            .map(|breadcrumb| {
                json!({
                    "timestamp": timestamp_secs(&breadcrumb.timestamp()),
                    "category": breadcrumb.category(),
                    "action": breadcrumb.message(),
                    "metadata": {
                        "type": breadcrumb.ty(),
                    },
                })
            })
            .collect();

        let mut body = JsonMap::new();
        body.insert(
            "timestamp".to_string(),
            json!(timestamp_secs(&log.timestamp())),
        );
        body.insert("message".to_string(), json!(log.message()));
        body.insert("logtype".to_string(), json!(log.ty()));
        body.insert("version".to_string(), json!(log.version()));
        body.insert("environment".to_string(), json!(log.environment()));
        body.insert("action".to_string(), json!(log.action()));
        body.insert("namespace".to_string(), json!(log.namespace()));
        body.insert("server".to_string(), json!(log.server()));
        body.insert("breadcrumbs".to_string(), Value::Array(breadcrumbs));
        body.insert("tags".to_string(), json!(log.tags()));
        body.insert("params".to_string(), json!(super::stringified_extra(log)));

        if let Some(user) = log.user() {
            let mut fields = JsonMap::new();
            if let Some(id) = &user.id {
                fields.insert("id".to_string(), json!(id));
            }
            if let Some(username) = &user.username {
                fields.insert("username".to_string(), json!(username));
            }
            if let Some(email) = &user.email {
                fields.insert("email".to_string(), json!(email));
            }
            body.insert("user".to_string(), Value::Object(fields));
        }

        Value::Object(body)
    }
}

impl Adapter for NewRelic {
    fn name(&self) -> &'static str {
        "newRelic"
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
            &self.api_url,
            &[("Api-Key", self.license_key.as_str())],
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
    fn test_eu_api_url() {
        let adapter =
            NewRelic::new("key").with_api_url("https://log-api.eu.newrelic.com/log/v1");
        assert_eq!(adapter.api_url, "https://log-api.eu.newrelic.com/log/v1");
    }

    #[test]
    fn test_payload_mapping() {
        let mut log = Log::new();
        log.set_type(LogType::Error);
        log.set_environment(Environment::Production);
        log.set_message("Document efgh5678 not found");
        log.set_version("0.11.5");
        log.set_action("controller.database.deleteDocument");
        log.set_user(User::new("efgh5678"));

        let payload = NewRelic::new("key").payload(&log);
        assert_eq!(payload["logtype"], json!("error"));
        assert_eq!(payload["version"], json!("0.11.5"));
        assert_eq!(payload["user"], json!({ "id": "efgh5678" }));
    }

    #[test]
    fn test_missing_user_is_omitted() {
        let payload = NewRelic::new("key").payload(&Log::new());
        assert!(payload.get("user").is_none());
    }
}
