//! Reference: <https://www.dynatrace.com/support/help/dynatrace-api/environment-api/events-v2>

use serde_json::{json, Map as JsonMap, Value};

use crate::adapter::Adapter;
use crate::error::Error;
use crate::protocol::{Environment, Log, LogType};
use crate::transport::Transport;
use crate::utils::timestamp_secs;

/// Ingests error events into [Dynatrace](https://dynatrace.com).
#[derive(Debug, Clone)]
pub struct Dynatrace {
    endpoint: String,
    api_token: String,
    transport: Transport,
}

impl Dynatrace {
    /// Creates the adapter from the environment id (the subdomain of the
    /// `*.live.dynatrace.com` endpoint) and an API access token.
    pub fn new(environment_id: impl Into<String>, api_token: impl Into<String>) -> Dynatrace {
        Dynatrace {
            endpoint: format!(
                "https://{}.live.dynatrace.com/api/v2/events/ingest",
                environment_id.into()
            ),
            api_token: api_token.into(),
            transport: Transport::new(),
        }
    }

    fn payload(&self, log: &Log) -> Value {
        let breadcrumbs: Vec<Value> = log
            .breadcrumbs()
            .iter()
            .map(|breadcrumb| {
                json!({
                    "type": breadcrumb.ty(),
                    "category": breadcrumb.category(),
                    "message": breadcrumb.message(),
                    "timestamp": timestamp_secs(&breadcrumb.timestamp()),
                })
            })
            .collect();

        let extra = log.extra();
        let frames: Vec<Value> = super::trace_frames(&extra, "detailedTrace")
            .iter()
            .map(|frame| {
                json!({
                    "filename": super::frame_field(frame, "file"),
                    "lineno": super::frame_field(frame, "line"),
                    "function": super::frame_field(frame, "function"),
                })
            })
            .collect();

        let mut properties = JsonMap::new();
        for (key, value) in log.tags() {
            properties.insert(key, Value::String(value));
        }
        if let Some(ty) = log.ty() {
            properties.insert("type".to_string(), json!(ty));
        }
        if !log.version().is_empty() {
            properties.insert("version".to_string(), json!(log.version()));
        }
        if let Some(environment) = log.environment() {
            properties.insert("environment".to_string(), json!(environment));
        }
        if !log.action().is_empty() {
            properties.insert("action".to_string(), json!(log.action()));
        }
        properties.insert("namespace".to_string(), json!(log.namespace()));
        if let Some(server) = log.server() {
            properties.insert("server".to_string(), json!(server));
        }
        if let Some(user) = log.user() {
            if let Some(id) = &user.id {
                properties.insert("userId".to_string(), json!(id));
            }
            if let Some(email) = &user.email {
                properties.insert("userEmail".to_string(), json!(email));
            }
            if let Some(username) = &user.username {
                properties.insert("userName".to_string(), json!(username));
            }
        }
        properties.insert("stacktrace".to_string(), Value::Array(frames));
        properties.insert("breadcrumbs".to_string(), Value::Array(breadcrumbs));

        json!({
            "eventType": "ERROR_EVENT",
            "title": log.message(),
            "startTime": timestamp_secs(&log.timestamp()),
            "endTime": timestamp_secs(&log.timestamp()),
            "properties": properties,
        })
    }
}

impl Adapter for Dynatrace {
    fn name(&self) -> &'static str {
        "dynatrace"
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
        let auth = format!("Api-Token {}", self.api_token);
        self.transport.post(
            &self.endpoint,
            &[("Authorization", auth.as_str())],
            &self.payload(log),
        )
    }
}
