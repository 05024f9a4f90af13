//! The common data model shared by every provider adapter.
//!
//! A [`Log`] describes one reportable occurrence together with the acting
//! [`User`] and an ordered trail of [`Breadcrumb`]s. Adapters read these
//! types through their getters and map them onto the provider's wire
//! format, so the model itself carries no provider specifics.

use std::collections::BTreeSet;
use std::fmt;
use std::str;
use std::time::SystemTime;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::utils::impl_str_serde;

/// The internally used map type.
pub use std::collections::BTreeMap as Map;

/// The namespace a log falls back to when none was assigned.
pub const UNKNOWN_NAMESPACE: &str = "UNKNOWN";

/// An error used when parsing `LogType`.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid log type")]
pub struct ParseLogTypeError;

/// Represents the severity of a log or a breadcrumb.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogType {
    /// Very spammy debug information.
    Debug,
    /// Informational messages.
    Info,
    /// A warning.
    Warning,
    /// An error.
    Error,
    /// Even spammier than debug; not every provider accepts it.
    Verbose,
}

impl str::FromStr for LogType {
    type Err = ParseLogTypeError;

    fn from_str(string: &str) -> Result<LogType, Self::Err> {
        Ok(match string {
            "debug" => LogType::Debug,
            "info" => LogType::Info,
            "warning" => LogType::Warning,
            "error" => LogType::Error,
            "verbose" => LogType::Verbose,
            _ => return Err(ParseLogTypeError),
        })
    }
}

impl fmt::Display for LogType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            LogType::Debug => write!(f, "debug"),
            LogType::Info => write!(f, "info"),
            LogType::Warning => write!(f, "warning"),
            LogType::Error => write!(f, "error"),
            LogType::Verbose => write!(f, "verbose"),
        }
    }
}

impl_str_serde!(LogType);

/// An error used when parsing `Environment`.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid environment")]
pub struct ParseEnvironmentError;

/// Represents the deployment environment a log originates from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Environment {
    /// A production deployment.
    Production,
    /// A staging deployment.
    Staging,
}

impl str::FromStr for Environment {
    type Err = ParseEnvironmentError;

    fn from_str(string: &str) -> Result<Environment, Self::Err> {
        Ok(match string {
            "production" => Environment::Production,
            "staging" => Environment::Staging,
            _ => return Err(ParseEnvironmentError),
        })
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Environment::Production => write!(f, "production"),
            Environment::Staging => write!(f, "staging"),
        }
    }
}

impl_str_serde!(Environment);

/// Represents a single step in the trail that preceded a reported event.
///
/// Breadcrumbs are immutable once constructed and owned by the [`Log`]
/// holding them; their insertion order is the chronological order reported
/// to the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct Breadcrumb {
    ty: LogType,
    category: String,
    message: String,
    timestamp: SystemTime,
}

impl Breadcrumb {
    /// Creates a new breadcrumb.
    pub fn new(
        ty: LogType,
        category: impl Into<String>,
        message: impl Into<String>,
        timestamp: SystemTime,
    ) -> Breadcrumb {
        Breadcrumb {
            ty,
            category: category.into(),
            message: message.into(),
            timestamp,
        }
    }

    /// Returns the breadcrumb type.
    pub fn ty(&self) -> LogType {
        self.ty
    }

    /// Returns the free-text grouping category, e.g. `"auth"` or `"http"`.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Returns the breadcrumb message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the time at which this step happened.
    pub fn timestamp(&self) -> SystemTime {
        self.timestamp
    }
}

/// Represents the user on whose behalf the reported code path ran.
///
/// All fields are independently optional and none of them is validated.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct User {
    /// The ID of the user.
    pub id: Option<String>,
    /// The email address of the user.
    pub email: Option<String>,
    /// A human readable username of the user.
    pub username: Option<String>,
}

impl User {
    /// Creates a user from its identifier.
    pub fn new(id: impl Into<String>) -> User {
        User {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    /// Attaches an email address.
    pub fn with_email(mut self, email: impl Into<String>) -> User {
        self.email = Some(email.into());
        self
    }

    /// Attaches a username.
    pub fn with_username(mut self, username: impl Into<String>) -> User {
        self.username = Some(username.into());
        self
    }
}

/// One reportable event.
///
/// A log is built up through its setters and handed to
/// [`Logger::add_log`](crate::Logger::add_log). It is ready to be pushed
/// once the type, environment, message, version and action are all set;
/// the dispatcher enforces this before involving any adapter.
///
/// Tag and extra values whose keys were passed to [`Log::set_masked`] are
/// redacted when read back through [`Log::tags`] and [`Log::extra`]. The
/// stored values are never modified, so clearing the mask restores the
/// original reads exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct Log {
    timestamp: SystemTime,
    ty: Option<LogType>,
    message: String,
    version: String,
    environment: Option<Environment>,
    action: String,
    namespace: String,
    server: Option<String>,
    tags: Map<String, String>,
    extra: Map<String, Value>,
    user: Option<User>,
    breadcrumbs: Vec<Breadcrumb>,
    masked: BTreeSet<String>,
}

impl Default for Log {
    fn default() -> Log {
        Log::new()
    }
}

impl Log {
    /// Creates an empty log stamped with the current time.
    pub fn new() -> Log {
        Log {
            timestamp: SystemTime::now(),
            ty: None,
            message: String::new(),
            version: String::new(),
            environment: None,
            action: String::new(),
            namespace: UNKNOWN_NAMESPACE.to_string(),
            server: None,
            tags: Map::new(),
            extra: Map::new(),
            user: None,
            breadcrumbs: Vec::new(),
            masked: BTreeSet::new(),
        }
    }

    /// Sets the time at which the event occurred.
    pub fn set_timestamp(&mut self, timestamp: SystemTime) {
        self.timestamp = timestamp;
    }

    /// Returns the time at which the event occurred.
    pub fn timestamp(&self) -> SystemTime {
        self.timestamp
    }

    /// Sets the severity of this log.
    pub fn set_type(&mut self, ty: LogType) {
        self.ty = Some(ty);
    }

    /// Returns the severity of this log, if one was set.
    pub fn ty(&self) -> Option<LogType> {
        self.ty
    }

    /// Sets the human-readable description of the event.
    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    /// Returns the human-readable description of the event.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Sets the version of the reporting application, e.g. `"0.11.5"`.
    pub fn set_version(&mut self, version: impl Into<String>) {
        self.version = version.into();
    }

    /// Returns the version of the reporting application.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Sets the deployment environment.
    pub fn set_environment(&mut self, environment: Environment) {
        self.environment = Some(environment);
    }

    /// Returns the deployment environment, if one was set.
    pub fn environment(&self) -> Option<Environment> {
        self.environment
    }

    /// Sets the code path that produced the event, e.g.
    /// `"controller.database.deleteDocument"`.
    pub fn set_action(&mut self, action: impl Into<String>) {
        self.action = action.into();
    }

    /// Returns the code path that produced the event.
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Sets a grouping namespace, e.g. `"api"`.
    pub fn set_namespace(&mut self, namespace: impl Into<String>) {
        self.namespace = namespace.into();
    }

    /// Returns the grouping namespace, [`UNKNOWN_NAMESPACE`] when unset.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Sets the host the event happened on, e.g. `"digitalocean-us-001"`.
    pub fn set_server(&mut self, server: impl Into<String>) {
        self.server = Some(server.into());
    }

    /// Returns the host the event happened on.
    pub fn server(&self) -> Option<&str> {
        self.server.as_deref()
    }

    /// Adds one key/value label.
    pub fn add_tag(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.tags.insert(key.into(), value.into());
    }

    /// Returns the labels with masked values redacted.
    pub fn tags(&self) -> Map<String, String> {
        self.tags
            .iter()
            .map(|(key, value)| {
                if self.masked.contains(key) {
                    (key.clone(), "*".repeat(value.chars().count()))
                } else {
                    (key.clone(), value.clone())
                }
            })
            .collect()
    }

    /// Adds one entry of free-form metadata.
    pub fn add_extra(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.extra.insert(key.into(), value.into());
    }

    /// Returns the free-form metadata with masked values redacted,
    /// including inside nested objects.
    pub fn extra(&self) -> Map<String, Value> {
        self.extra
            .iter()
            .map(|(key, value)| (key.clone(), mask_value(value, key, &self.masked)))
            .collect()
    }

    /// Sets the user who caused the log.
    pub fn set_user(&mut self, user: User) {
        self.user = Some(user);
    }

    /// Returns the user who caused the log.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Appends one reproduction step.
    pub fn add_breadcrumb(&mut self, breadcrumb: Breadcrumb) {
        self.breadcrumbs.push(breadcrumb);
    }

    /// Returns the reproduction steps in the order they were added.
    pub fn breadcrumbs(&self) -> &[Breadcrumb] {
        &self.breadcrumbs
    }

    /// Declares the tag/extra keys whose values must be redacted when read
    /// back. Passing an empty set clears the mask.
    pub fn set_masked(&mut self, masked: BTreeSet<String>) {
        self.masked = masked;
    }

    /// Whether all fields required for a push are present.
    pub fn is_ready(&self) -> bool {
        self.ty.is_some()
            && self.environment.is_some()
            && !self.message.is_empty()
            && !self.version.is_empty()
            && !self.action.is_empty()
    }
}

fn redacted(value: &Value) -> Value {
    let len = match value {
        Value::String(s) => s.chars().count(),
        other => other.to_string().len(),
    };
    Value::String("*".repeat(len))
}

fn mask_value(value: &Value, key: &str, masked: &BTreeSet<String>) -> Value {
    if masked.contains(key) {
        return redacted(value);
    }
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, value)| (key.clone(), mask_value(value, key, masked)))
                .collect(),
        ),
        other => other.clone(),
    }
}
