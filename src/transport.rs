//! The blocking HTTP transport shared by all adapters.

use log::debug;
use serde_json::Value;
use ureq::Agent;

use crate::constants::SDK_IDENTIFIER;
use crate::error::Error;

/// Performs one synchronous POST per call on a shared [`ureq::Agent`].
///
/// Any status actually received is returned as data, even 4xx/5xx; only
/// transport-level failures (DNS, connection refused, TLS) are errors.
#[derive(Debug, Clone)]
pub(crate) struct Transport {
    agent: Agent,
}

impl Transport {
    pub(crate) fn new() -> Transport {
        Transport {
            agent: ureq::AgentBuilder::new().user_agent(SDK_IDENTIFIER).build(),
        }
    }

    pub(crate) fn post(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &Value,
    ) -> Result<u16, Error> {
        let mut request = self.agent.post(url).set("Content-Type", "application/json");
        for (name, value) in headers {
            request = request.set(name, value);
        }

        match request.send_json(body) {
            Ok(response) => {
                debug!("pushed log to {}: {}", url, response.status());
                Ok(response.status())
            }
            Err(ureq::Error::Status(code, _)) => {
                debug!("log rejected by {}: {}", url, code);
                Ok(code)
            }
            Err(ureq::Error::Transport(err)) => {
                debug!("failed to reach {}: {}", url, err);
                Err(Error::Transport(Box::new(err)))
            }
        }
    }
}
