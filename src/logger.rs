//! The dispatcher that fronts a single adapter.

use std::fmt;

use log::debug;
use rand::Rng;

use crate::adapter::Adapter;
use crate::error::Error;
use crate::protocol::Log;

/// Single entry point that owns one active [`Adapter`] and mediates every
/// outgoing event through it.
///
/// A `Logger` is immutable after construction, so sharing one instance
/// across threads is safe without further coordination. Every
/// [`add_log`](Logger::add_log) call is synchronous and at-most-once; there
/// is no retry, no queueing and no batching.
pub struct Logger {
    adapter: Box<dyn Adapter>,
    sample_rate: Option<f64>,
}

impl Logger {
    /// Creates a logger that forwards every valid log to the adapter.
    pub fn new(adapter: impl Adapter + 'static) -> Logger {
        Logger {
            adapter: Box::new(adapter),
            sample_rate: None,
        }
    }

    /// Creates a logger with a sampling rate in percent.
    ///
    /// For every log a uniform value in `[0, 100)` is drawn; draws at or
    /// below `percent` short-circuit without contacting the adapter. Note
    /// that this matches the historical behavior of the wire-compatible
    /// implementations: a higher rate drops *more* logs.
    pub fn with_sample_rate(adapter: impl Adapter + 'static, percent: f64) -> Result<Logger, Error> {
        if !percent.is_finite() || !(0.0..=100.0).contains(&percent) {
            return Err(Error::InvalidSampleRate(percent));
        }
        Ok(Logger {
            adapter: Box::new(adapter),
            sample_rate: Some(percent),
        })
    }

    /// Returns the name of the active adapter.
    pub fn adapter_name(&self) -> &'static str {
        self.adapter.name()
    }

    /// Validates the log and pushes it through the active adapter,
    /// returning the HTTP status code that was received.
    ///
    /// Fails with [`Error::NotReady`] when a required field is missing and
    /// with a validation error when the log uses a type or environment the
    /// adapter does not support, in both cases before any network traffic.
    /// A log suppressed by sampling returns `Ok(0)`.
    pub fn add_log(&self, log: &Log) -> Result<u16, Error> {
        if !log.is_ready() {
            return Err(Error::NotReady);
        }

        if let Some(rate) = self.sample_rate {
            let roll: f64 = rand::rng().random_range(0.0..100.0);
            if roll <= rate {
                debug!("log sampled out before reaching `{}`", self.adapter.name());
                return Ok(0);
            }
        }

        self.adapter.validate(log)?;
        self.adapter.push(log)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Logger")
            .field("adapter", &self.adapter.name())
            .field("sample_rate", &self.sample_rate)
            .finish()
    }
}
