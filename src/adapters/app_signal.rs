//! Reference: <https://docs.appsignal.com/api/public-endpoint/errors.html>

use serde_json::{json, Value};

use crate::adapter::Adapter;
use crate::constants::SDK_IDENTIFIER;
use crate::error::Error;
use crate::protocol::{Environment, Log, LogType, Map};
use crate::transport::Transport;
use crate::utils::timestamp_secs;

/// Reports errors to [AppSignal](https://appsignal.com).
#[derive(Debug, Clone)]
pub struct AppSignal {
    api_key: String,
    transport: Transport,
}

impl AppSignal {
    /// Creates the adapter from the project push key.
    pub fn new(api_key: impl Into<String>) -> AppSignal {
        AppSignal {
            api_key: api_key.into(),
            transport: Transport::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "https://appsignal-endpoint.net/collect?api_key={}&version=1.3.19",
            self.api_key
        )
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

        let mut tags: Map<String, String> = log.tags();
        if let Some(ty) = log.ty() {
            tags.insert("type".to_string(), ty.to_string());
        }
        if let Some(user) = log.user() {
            if let Some(id) = &user.id {
                tags.insert("userId".to_string(), id.clone());
            }
            if let Some(username) = &user.username {
                tags.insert("userName".to_string(), username.clone());
            }
            if let Some(email) = &user.email {
                tags.insert("userEmail".to_string(), email.clone());
            }
        }
        tags.insert("sdk".to_string(), SDK_IDENTIFIER.to_string());

        json!({
            "timestamp": timestamp_secs(&log.timestamp()),
            "namespace": log.namespace(),
            "error": {
                "name": log.message(),
                "message": log.message(),
                "backtrace": [],
            },
            "environment": {
                "environment": log.environment(),
                "server": log.server(),
                "version": log.version(),
            },
            "revision": log.version(),
            "action": log.action(),
            "params": super::stringified_extra(log),
            "tags": tags,
            "breadcrumbs": breadcrumbs,
        })
    }
}

impl Adapter for AppSignal {
    fn name(&self) -> &'static str {
        "appSignal"
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
        self.transport.post(&self.endpoint(), &[], &self.payload(log))
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;
    use crate::protocol::User;

    #[test]
    fn test_endpoint_carries_key() {
        let adapter = AppSignal::new("push-key-123");
        assert_eq!(
            adapter.endpoint(),
            "https://appsignal-endpoint.net/collect?api_key=push-key-123&version=1.3.19"
        );
    }

    #[test]
    fn test_payload_mapping() {
        let mut log = Log::new();
        log.set_type(LogType::Warning);
        log.set_environment(Environment::Staging);
        log.set_message("Rate limit almost reached");
        log.set_version("0.11.5");
        log.set_action("middleware.rateLimit");
        log.set_user(User::new("abcd1234").with_email("user@example.com"));
        log.add_extra("urgent", false);

        let payload = AppSignal::new("key").payload(&log);
        assert_eq!(payload["error"]["name"], json!("Rate limit almost reached"));
        assert_eq!(payload["revision"], json!("0.11.5"));
        assert_eq!(payload["environment"]["environment"], json!("staging"));
        assert_eq!(payload["tags"]["type"], json!("warning"));
        assert_eq!(payload["tags"]["userId"], json!("abcd1234"));
        assert_eq!(payload["tags"]["userEmail"], json!("user@example.com"));
        assert_eq!(payload["params"]["urgent"], json!("false"));
    }
}
