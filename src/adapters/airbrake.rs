//! Reference: <https://docs.airbrake.io/docs/devops-tools/api/#create-notice-v3>

use serde_json::{json, Map as JsonMap, Value};

use crate::adapter::Adapter;
use crate::error::Error;
use crate::protocol::{Environment, Log, LogType};
use crate::transport::Transport;
use crate::utils::datetime_to_timestamp;

const API_HOST: &str = "https://api.airbrake.io";

/// Creates notices in [Airbrake](https://airbrake.io).
#[derive(Debug, Clone)]
pub struct Airbrake {
    endpoint: String,
    transport: Transport,
}

impl Airbrake {
    /// Creates the adapter from the project id and the project key.
    pub fn new(project_id: impl Into<String>, project_key: impl Into<String>) -> Airbrake {
        Airbrake {
            endpoint: format!(
                "{}/api/v3/projects/{}/notices?key={}",
                API_HOST,
                project_id.into(),
                project_key.into()
            ),
            transport: Transport::new(),
        }
    }

    fn payload(&self, log: &Log) -> Value {
        let errors: Vec<Value> = log
            .breadcrumbs()
            .iter()
            .map(|breadcrumb| {
                json!({
                    "type": breadcrumb.ty(),
                    "message": breadcrumb.message(),
                })
            })
            .collect();

        let mut context = JsonMap::new();
        context.insert("hostname".to_string(), json!(log.server()));
        context.insert("environment".to_string(), json!(log.environment()));
        context.insert("severity".to_string(), json!(log.ty()));
        context.insert("version".to_string(), json!(log.version()));
        context.insert("action".to_string(), json!(log.action()));
        if let Some(user) = log.user() {
            context.insert(
                "user".to_string(),
                json!({
                    "id": user.id,
                    "name": user.username,
                    "email": user.email,
                }),
            );
        }

        json!({
            "errors": errors,
            "context": context,
            "lastNoticeAt": datetime_to_timestamp(&log.timestamp()),
        })
    }
}

impl Adapter for Airbrake {
    fn name(&self) -> &'static str {
        "airbrake"
    }

    fn supported_log_types(&self) -> &'static [LogType] {
        &[
            LogType::Debug,
            LogType::Info,
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
        self.transport.post(&self.endpoint, &[], &self.payload(log))
    }
}

#[cfg(test)]
mod test {
    use std::time::SystemTime;

    use serde_json::json;

    use super::*;
    use crate::protocol::{Breadcrumb, User};

    #[test]
    fn test_endpoint_from_project() {
        let adapter = Airbrake::new("1234", "secret");
        assert_eq!(
            adapter.endpoint,
            "https://api.airbrake.io/api/v3/projects/1234/notices?key=secret"
        );
    }

    #[test]
    fn test_payload_mapping() {
        let mut log = Log::new();
        log.set_type(LogType::Error);
        log.set_environment(Environment::Production);
        log.set_message("Document efgh5678 not found");
        log.set_version("0.11.5");
        log.set_action("controller.database.deleteDocument");
        log.set_user(User::new("efgh5678").with_username("jorge"));
        log.add_breadcrumb(Breadcrumb::new(
            LogType::Error,
            "database",
            "Missing document when searching by ID!",
            SystemTime::now(),
        ));

        let payload = Airbrake::new("1234", "secret").payload(&log);
        assert_eq!(payload["context"]["severity"], json!("error"));
        assert_eq!(payload["context"]["user"]["name"], json!("jorge"));
        assert_eq!(payload["errors"][0]["type"], json!("error"));
        assert_eq!(
            payload["errors"][0]["message"],
            json!("Missing document when searching by ID!")
        );
    }

    #[test]
    fn test_missing_user_is_omitted() {
        let payload = Airbrake::new("1234", "secret").payload(&Log::new());
        assert!(payload["context"].get("user").is_none());
    }
}
