//! Telemetry snapshot handed to dynamic alerts
//!
//! The control loop samples every channel it has before resolution starts and
//! passes the frozen [`AlertContext`] into the resolver. Dynamic alerts read it
//! through a [`ContextView`], which substitutes sentinels for absent channels
//! and remembers which ones were missing.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A sampled telemetry value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SignalValue {
    /// Boolean value
    Boolean(bool),
    /// Signed integer value
    Integer(i64),
    /// Floating-point value
    Float(f64),
    /// Free text (process names, branch names, ...)
    Text(String),
}

impl fmt::Display for SignalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalValue::Integer(v) => write!(f, "{}", v),
            SignalValue::Float(v) => write!(f, "{:.3}", v),
            SignalValue::Boolean(v) => write!(f, "{}", if *v { "true" } else { "false" }),
            SignalValue::Text(v) => f.write_str(v),
        }
    }
}

impl SignalValue {
    /// Numeric view; text that does not parse is NaN
    pub fn as_f64(&self) -> f64 {
        match self {
            SignalValue::Integer(v) => *v as f64,
            SignalValue::Float(v) => *v,
            SignalValue::Boolean(v) => if *v { 1.0 } else { 0.0 },
            SignalValue::Text(v) => v.trim().parse().unwrap_or(f64::NAN),
        }
    }

    /// Truthiness; non-empty text is true
    pub fn as_bool(&self) -> bool {
        match self {
            SignalValue::Boolean(v) => *v,
            SignalValue::Integer(v) => *v != 0,
            SignalValue::Float(v) => *v != 0.0,
            SignalValue::Text(v) => !v.is_empty(),
        }
    }
}

/// Read-only telemetry snapshot for one tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertContext {
    /// Sampled channels by name
    #[serde(default)]
    pub channels: BTreeMap<String, SignalValue>,

    /// Ticks left before a soft disable turns into a hard disengagement
    #[serde(default)]
    pub soft_disable_ticks: u32,
}

impl AlertContext {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: add a channel value
    pub fn with_channel(mut self, name: impl Into<String>, value: SignalValue) -> Self {
        self.channels.insert(name.into(), value);
        self
    }

    /// Builder method: set the remaining soft-disable time
    pub fn with_soft_disable_ticks(mut self, ticks: u32) -> Self {
        self.soft_disable_ticks = ticks;
        self
    }

    /// Raw channel lookup
    pub fn get(&self, channel: &str) -> Option<&SignalValue> {
        self.channels.get(channel)
    }
}

/// Per-invocation reader over an [`AlertContext`]
///
/// Missing channels never fail: numbers read as NaN, text as an empty string
/// and flags as false. Each miss is recorded once so the resolver can report it.
pub struct ContextView<'a> {
    context: &'a AlertContext,
    metric: bool,
    soft_disable_immediate_ticks: u32,
    missing: Vec<String>,
}

impl<'a> ContextView<'a> {
    pub fn new(context: &'a AlertContext, metric: bool, soft_disable_immediate_ticks: u32) -> Self {
        Self {
            context,
            metric,
            soft_disable_immediate_ticks,
            missing: Vec::new(),
        }
    }

    fn lookup(&mut self, channel: &str) -> Option<&'a SignalValue> {
        let context = self.context;
        let value = context.get(channel);
        if value.is_none() && !self.missing.iter().any(|m| m == channel) {
            self.missing.push(channel.to_string());
        }
        value
    }

    /// Numeric channel, NaN when absent
    pub fn number(&mut self, channel: &str) -> f64 {
        self.lookup(channel).map(SignalValue::as_f64).unwrap_or(f64::NAN)
    }

    /// Text channel, empty when absent
    pub fn text(&mut self, channel: &str) -> String {
        self.lookup(channel).map(|v| v.to_string()).unwrap_or_default()
    }

    /// Boolean channel, false when absent
    pub fn flag(&mut self, channel: &str) -> bool {
        self.lookup(channel).map(SignalValue::as_bool).unwrap_or(false)
    }

    /// Whether a channel is present, without recording a miss
    pub fn has(&self, channel: &str) -> bool {
        self.context.get(channel).is_some()
    }

    pub fn metric(&self) -> bool {
        self.metric
    }

    pub fn soft_disable_ticks(&self) -> u32 {
        self.context.soft_disable_ticks
    }

    /// True once the soft-disable countdown is below the escalation threshold
    pub fn soft_disable_imminent(&self) -> bool {
        self.context.soft_disable_ticks < self.soft_disable_immediate_ticks
    }

    /// Channels read but absent, in first-read order
    pub fn missing(&self) -> &[String] {
        &self.missing
    }

    pub fn into_missing(self) -> Vec<String> {
        self.missing
    }
}
