use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::HandlerError;

/// Text used for tags whose value was never set.
pub const UNSET_TAG: &str = "None";

/// Read-only view of a metric sample handed over by the collection pipeline.
pub trait MetricSample: Send + Sync {
    fn path(&self) -> &str;
    /// Epoch seconds.
    fn timestamp(&self) -> i64;
    fn value(&self) -> f64;
    fn precision(&self) -> String;
    fn host(&self) -> String;
    fn ttl(&self) -> String;
}

/// A metric as produced by the collectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub path: String,
    pub value: f64,
    pub timestamp: i64,
    #[serde(default)]
    pub precision: u32,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub ttl: Option<u64>,
}

static GRAPHITE_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<path>\S+)\s+(?P<value>-?[0-9]*\.?[0-9]+(?:[eE][-+]?[0-9]+)?)\s+(?P<timestamp>[0-9]+(?:\.[0-9]*)?)\s*$",
    )
    .expect("static regex compile")
});

impl Metric {
    pub fn new(path: impl Into<String>, value: f64, timestamp: i64) -> Self {
        Self {
            path: path.into(),
            value,
            timestamp,
            precision: 0,
            host: None,
            ttl: None,
        }
    }

    #[must_use]
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    #[must_use]
    pub fn with_ttl(mut self, ttl: u64) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Parse a Graphite plaintext line (`path value timestamp`).
    ///
    /// Precision is the number of decimal digits written in the value.
    ///
    /// # Errors
    ///
    /// Returns `HandlerError::ParseError` if the line does not match the format.
    pub fn parse(line: &str) -> Result<Self, HandlerError> {
        let caps = GRAPHITE_LINE_RE
            .captures(line.trim_end_matches(['\r', '\n']))
            .ok_or_else(|| HandlerError::ParseError(format!("not a graphite line: {line:?}")))?;

        let value_text = &caps["value"];
        let value: f64 = value_text
            .parse()
            .map_err(|e| HandlerError::ParseError(format!("value {value_text:?}: {e}")))?;
        let timestamp_text = &caps["timestamp"];
        let timestamp: f64 = timestamp_text
            .parse()
            .map_err(|e| HandlerError::ParseError(format!("timestamp {timestamp_text:?}: {e}")))?;

        #[allow(clippy::cast_possible_truncation)]
        let timestamp = timestamp.trunc() as i64;

        Ok(Self::new(&caps["path"], value, timestamp).with_precision(decimal_places(value_text)))
    }
}

fn decimal_places(number: &str) -> u32 {
    let mantissa = number.split(['e', 'E']).next().unwrap_or(number);
    mantissa
        .split_once('.')
        .map_or(0, |(_, frac)| u32::try_from(frac.len()).unwrap_or(u32::MAX))
}

impl MetricSample for Metric {
    fn path(&self) -> &str {
        &self.path
    }

    fn timestamp(&self) -> i64 {
        self.timestamp
    }

    fn value(&self) -> f64 {
        self.value
    }

    fn precision(&self) -> String {
        self.precision.to_string()
    }

    fn host(&self) -> String {
        self.host.clone().unwrap_or_else(|| UNSET_TAG.to_string())
    }

    fn ttl(&self) -> String {
        self.ttl
            .map_or_else(|| UNSET_TAG.to_string(), |ttl| ttl.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageTags {
    pub precision: String,
    pub host: String,
    pub ttl: String,
}

/// Body written to the queue for one metric. Field order is the wire order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub metric: String,
    pub timestamp: i64,
    pub value: f64,
    pub tags: MessageTags,
}

impl OutboundMessage {
    pub fn from_sample<S: MetricSample + ?Sized>(sample: &S) -> Self {
        Self {
            metric: sample.path().to_string(),
            timestamp: sample.timestamp(),
            value: sample.value(),
            tags: MessageTags {
                precision: sample.precision(),
                host: sample.host(),
                ttl: sample.ttl(),
            },
        }
    }

    /// Compact JSON body for the queue message.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be encoded (NaN or infinite).
    pub fn to_body(&self) -> Result<String, HandlerError> {
        if !self.value.is_finite() {
            return Err(HandlerError::SerializationError(format!(
                "non-finite value {} for {}",
                self.value, self.metric
            )));
        }
        Ok(serde_json::to_string(self)?)
    }
}
