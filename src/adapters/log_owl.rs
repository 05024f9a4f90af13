//! Reference: <https://docs.logowl.io/docs/>

use serde_json::{json, Value};

use crate::adapter::Adapter;
use crate::error::Error;
use crate::protocol::{Environment, Log, LogType};
use crate::transport::Transport;
use crate::utils::timestamp_secs;

const DEFAULT_HOST: &str = "https://api.logowl.io";

/// Submits errors to [Log Owl](https://logowl.io), hosted or self-hosted.
#[derive(Debug, Clone)]
pub struct LogOwl {
    ticket: String,
    host: String,
    transport: Transport,
}

impl LogOwl {
    /// Creates the adapter from the service ticket.
    pub fn new(ticket: impl Into<String>) -> LogOwl {
        LogOwl {
            ticket: ticket.into(),
            host: DEFAULT_HOST.to_string(),
            transport: Transport::new(),
        }
    }

    /// Points the adapter at a self-hosted instance.
    pub fn with_host(mut self, host: impl Into<String>) -> LogOwl {
        self.host = host.into();
        self
    }

    fn payload(&self, log: &Log) -> Value {
        json!({
            "ticket": self.ticket,
            "message": log.message(),
            "timestamp": timestamp_secs(&log.timestamp()),
        })
    }
}

impl Adapter for LogOwl {
    fn name(&self) -> &'static str {
        "logOwl"
    }

    fn supported_log_types(&self) -> &'static [LogType] {
        &[LogType::Error]
    }

    fn supported_environments(&self) -> &'static [Environment] {
        &[Environment::Staging, Environment::Production]
    }

    fn supported_breadcrumb_types(&self) -> &'static [LogType] {
        &[]
    }

    fn push(&self, log: &Log) -> Result<u16, Error> {
        // The log type picks the ingestion route, so validation guarantees
        // it is present before we get here.
        let ty = log.ty().ok_or(Error::NotReady)?;
        let url = format!("{}/logging/{}", self.host, ty);
        self.transport.post(&url, &[], &self.payload(log))
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_payload_carries_ticket() {
        let mut log = Log::new();
        log.set_message("Queue worker crashed");
        let payload = LogOwl::new("ticket-123").payload(&log);
        assert_eq!(payload["ticket"], json!("ticket-123"));
        assert_eq!(payload["message"], json!("Queue worker crashed"));
    }

    #[test]
    fn test_custom_host() {
        let adapter = LogOwl::new("ticket-123").with_host("https://logs.example.com");
        assert_eq!(adapter.host, "https://logs.example.com");
    }

    #[test]
    fn test_only_errors_supported() {
        let adapter = LogOwl::new("ticket-123");
        assert_eq!(adapter.supported_log_types(), &[LogType::Error]);
        assert!(adapter.supported_breadcrumb_types().is_empty());
    }
}
