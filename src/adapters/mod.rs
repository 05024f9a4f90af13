//! The provided provider adapters.
//!
//! Each module maps the common [`Log`](crate::Log) model onto one
//! provider's ingestion API and submits it with a single blocking POST.
//! Payload construction lives in an inherent `payload` method per adapter,
//! separate from the network call, so the field mapping is testable
//! without a provider.

use serde_json::Value;

use crate::constants::SDK_IDENTIFIER;
use crate::protocol::{Log, Map};

mod airbrake;
mod app_signal;
mod bugsnag;
mod datadog;
mod dynatrace;
mod honey_badger;
mod log_owl;
mod new_relic;
mod raygun;
mod rollbar;
mod sentry;

pub use self::airbrake::Airbrake;
pub use self::app_signal::AppSignal;
pub use self::bugsnag::Bugsnag;
pub use self::datadog::Datadog;
pub use self::dynatrace::Dynatrace;
pub use self::honey_badger::HoneyBadger;
pub use self::log_owl::LogOwl;
pub use self::new_relic::NewRelic;
pub use self::raygun::Raygun;
pub use self::rollbar::Rollbar;
pub use self::sentry::Sentry;

/// Renders extra values for providers that expect flat string parameters:
/// strings stay as-is, everything else becomes its JSON rendering.
pub(crate) fn stringified_extra(log: &Log) -> Map<String, String> {
    log.extra()
        .iter()
        .map(|(key, value)| {
            let rendered = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (key.clone(), rendered)
        })
        .collect()
}

/// Extracts the stack-frame objects stored under the given extra key,
/// skipping anything that is not an object.
pub(crate) fn trace_frames(
    extra: &Map<String, Value>,
    key: &str,
) -> Vec<serde_json::Map<String, Value>> {
    match extra.get(key) {
        Some(Value::Array(frames)) => frames
            .iter()
            .filter_map(|frame| frame.as_object().cloned())
            .collect(),
        _ => Vec::new(),
    }
}

pub(crate) fn frame_field(frame: &serde_json::Map<String, Value>, key: &str) -> Value {
    frame
        .get(key)
        .cloned()
        .unwrap_or_else(|| Value::String(String::new()))
}

/// Tags flattened into `"key: value"` strings, with the log type, the
/// environment and the SDK marker appended.
pub(crate) fn labelled_tags(log: &Log) -> Vec<String> {
    let mut tags: Vec<String> = log
        .tags()
        .iter()
        .map(|(key, value)| format!("{key}: {value}"))
        .collect();
    if let Some(ty) = log.ty() {
        tags.push(format!("type: {ty}"));
    }
    if let Some(environment) = log.environment() {
        tags.push(format!("environment: {environment}"));
    }
    tags.push(format!("sdk: {SDK_IDENTIFIER}"));
    tags
}
