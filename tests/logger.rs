use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

use serde_json::{json, Value};

use faultline::{Adapter, Breadcrumb, Environment, Error, Log, LogType, Logger, User};

/// Records every payload it would have sent instead of doing network I/O.
struct RecordingAdapter {
    log_types: &'static [LogType],
    pushed: Arc<Mutex<Vec<Value>>>,
}

impl RecordingAdapter {
    fn new() -> (RecordingAdapter, Arc<Mutex<Vec<Value>>>) {
        Self::with_log_types(&[
            LogType::Info,
            LogType::Debug,
            LogType::Verbose,
            LogType::Warning,
            LogType::Error,
        ])
    }

    fn with_log_types(
        log_types: &'static [LogType],
    ) -> (RecordingAdapter, Arc<Mutex<Vec<Value>>>) {
        let pushed = Arc::new(Mutex::new(Vec::new()));
        (
            RecordingAdapter {
                log_types,
                pushed: Arc::clone(&pushed),
            },
            pushed,
        )
    }
}

impl Adapter for RecordingAdapter {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn supported_log_types(&self) -> &'static [LogType] {
        self.log_types
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
        let breadcrumbs: Vec<Value> = log
            .breadcrumbs()
            .iter()
            .map(|breadcrumb| {
                json!({
                    "type": breadcrumb.ty(),
                    "category": breadcrumb.category(),
                    "message": breadcrumb.message(),
                })
            })
            .collect();
        self.pushed.lock().unwrap().push(json!({
            "message": log.message(),
            "action": log.action(),
            "user": log.user(),
            "breadcrumbs": breadcrumbs,
        }));
        Ok(200)
    }
}

fn ready_log() -> Log {
    let mut log = Log::new();
    log.set_type(LogType::Error);
    log.set_environment(Environment::Production);
    log.set_action("controller.database.deleteDocument");
    log.set_version("0.11.5");
    log.set_message("Document efgh5678 not found");
    log
}

#[test]
fn incomplete_log_never_reaches_the_adapter() {
    let (adapter, pushed) = RecordingAdapter::new();
    let logger = Logger::new(adapter);

    let mut log = Log::new();
    log.set_type(LogType::Error);
    log.set_environment(Environment::Production);
    log.set_message("missing action and version");

    assert!(matches!(logger.add_log(&log), Err(Error::NotReady)));
    assert!(pushed.lock().unwrap().is_empty());
}

#[test]
fn unsupported_log_type_is_rejected_with_allowed_set() {
    let (adapter, pushed) =
        RecordingAdapter::with_log_types(&[LogType::Error, LogType::Warning]);
    let logger = Logger::new(adapter);

    let mut log = ready_log();
    log.set_type(LogType::Debug);

    match logger.add_log(&log) {
        Err(Error::UnsupportedLogType {
            adapter,
            given,
            supported,
        }) => {
            assert_eq!(adapter, "recording");
            assert_eq!(given, LogType::Debug);
            assert_eq!(supported, "error, warning");
        }
        other => panic!("expected a validation failure, got {other:?}"),
    }
    assert!(pushed.lock().unwrap().is_empty());
}

#[test]
fn full_sampling_short_circuits_before_the_adapter() {
    let (adapter, pushed) = RecordingAdapter::new();
    let logger = Logger::with_sample_rate(adapter, 100.0).unwrap();

    let log = ready_log();
    for _ in 0..25 {
        assert_eq!(logger.add_log(&log).unwrap(), 0);
    }
    assert!(pushed.lock().unwrap().is_empty());
}

#[test]
fn without_sampling_every_log_is_delivered_exactly_once() {
    let (adapter, pushed) = RecordingAdapter::new();
    let logger = Logger::new(adapter);

    let log = ready_log();
    for _ in 0..5 {
        assert_eq!(logger.add_log(&log).unwrap(), 200);
    }
    assert_eq!(pushed.lock().unwrap().len(), 5);
}

#[test]
fn payload_carries_user_and_ordered_breadcrumbs() {
    let (adapter, pushed) = RecordingAdapter::new();
    let logger = Logger::new(adapter);

    let mut log = ready_log();
    log.set_namespace("api");
    log.set_server("digitalocean-us-001");
    log.set_user(User::new("efgh5678"));
    let now = SystemTime::now();
    log.add_breadcrumb(Breadcrumb::new(
        LogType::Debug,
        "http",
        "DELETE /api/v1/database/abcd1234/efgh5678",
        now - Duration::from_secs(500),
    ));
    log.add_breadcrumb(Breadcrumb::new(
        LogType::Error,
        "database",
        "Missing document when searching by ID!",
        now,
    ));

    assert_eq!(logger.add_log(&log).unwrap(), 200);

    let pushed = pushed.lock().unwrap();
    assert_eq!(pushed.len(), 1);
    let payload = &pushed[0];
    assert_eq!(payload["user"]["id"], json!("efgh5678"));

    let breadcrumbs = payload["breadcrumbs"].as_array().unwrap();
    assert_eq!(breadcrumbs.len(), 2);
    assert_eq!(breadcrumbs[0]["category"], json!("http"));
    assert_eq!(breadcrumbs[1]["category"], json!("database"));
}

#[test]
fn masked_values_are_redacted_in_transmitted_reads() {
    let mut log = ready_log();
    log.add_tag("password", "123456");
    log.set_masked(["password".to_string()].into());

    // what an adapter reads during push is already redacted
    let tags = log.tags();
    assert_eq!(tags["password"], "******");

    log.set_masked(Default::default());
    assert_eq!(log.tags()["password"], "123456");
}
