//! Reference: <https://docs.datadoghq.com/api/latest/logs/>

use serde_json::{json, Value};

use crate::adapter::Adapter;
use crate::error::Error;
use crate::protocol::{Environment, Log, LogType};
use crate::transport::Transport;
use crate::utils::datetime_to_timestamp;

/// Ships logs to the [Datadog](https://datadoghq.com) HTTP intake.
#[derive(Debug, Clone)]
pub struct Datadog {
    endpoint: String,
    transport: Transport,
}

impl Datadog {
    /// Creates the adapter from the intake API key.
    pub fn new(api_key: impl Into<String>) -> Datadog {
        Datadog {
            endpoint: format!(
                "https://http-intake.logs.datadoghq.com/v1/input/{}",
                api_key.into()
            ),
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
                    "timestamp": datetime_to_timestamp(&breadcrumb.timestamp()),
                })
            })
            .collect();

        json!({
            "message": log.message(),
            "level": log.ty(),
            "timestamp": datetime_to_timestamp(&log.timestamp()),
            "tags": log.tags(),
            "environment": log.environment(),
            "version": log.version(),
            "action": log.action(),
            "namespace": log.namespace(),
            "server": log.server(),
            "extra": log.extra(),
            "user": log.user(),
            "breadcrumbs": breadcrumbs,
        })
    }
}

impl Adapter for Datadog {
    fn name(&self) -> &'static str {
        "datadog"
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
            LogType::Warning,
            LogType::Debug,
            LogType::Error,
        ]
    }

    fn push(&self, log: &Log) -> Result<u16, Error> {
        self.transport.post(&self.endpoint, &[], &self.payload(log))
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_endpoint_carries_key() {
        let adapter = Datadog::new("dd-key");
        assert_eq!(
            adapter.endpoint,
            "https://http-intake.logs.datadoghq.com/v1/input/dd-key"
        );
    }

    #[test]
    fn test_payload_mapping() {
        let mut log = Log::new();
        log.set_type(LogType::Info);
        log.set_environment(Environment::Staging);
        log.set_message("Deployment finished");
        log.set_version("0.11.5");
        log.set_action("deploy.finish");
        log.add_tag("authMode", "default");

        let payload = Datadog::new("dd-key").payload(&log);
        assert_eq!(payload["message"], json!("Deployment finished"));
        assert_eq!(payload["level"], json!("info"));
        assert_eq!(payload["environment"], json!("staging"));
        assert_eq!(payload["tags"]["authMode"], json!("default"));
    }
}
