//! Core types for the alert engine
//!
//! This module defines the value types that flow through one control tick:
//! categories, priorities, presentation tags and the flat [`Alert`] record, plus
//! every error type the library can return. The engine itself never stores
//! history beyond the per-event activation counters.

use crate::event_name::EventName;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Timestamp type used for wire envelopes
pub type Timestamp = DateTime<Utc>;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// How an event affects engagement or alerting
///
/// One event may be registered under several categories at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Enable,
    PreEnable,
    OverrideLateral,
    OverrideLongitudinal,
    NoEntry,
    Warning,
    UserDisable,
    SoftDisable,
    ImmediateDisable,
    Permanent,
}

impl Category {
    /// Every category, in slot order
    pub const ALL: [Category; 10] = [
        Category::Enable,
        Category::PreEnable,
        Category::OverrideLateral,
        Category::OverrideLongitudinal,
        Category::NoEntry,
        Category::Warning,
        Category::UserDisable,
        Category::SoftDisable,
        Category::ImmediateDisable,
        Category::Permanent,
    ];

    /// Number of categories
    pub const COUNT: usize = Self::ALL.len();

    /// Slot index used by per-category tables and bitmasks
    pub fn index(self) -> usize {
        self as usize
    }

    /// Bit used in the compact category mask
    pub fn bit(self) -> u16 {
        1 << self.index()
    }

    /// camelCase name, as used in provenance strings and on the wire
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Enable => "enable",
            Category::PreEnable => "preEnable",
            Category::OverrideLateral => "overrideLateral",
            Category::OverrideLongitudinal => "overrideLongitudinal",
            Category::NoEntry => "noEntry",
            Category::Warning => "warning",
            Category::UserDisable => "userDisable",
            Category::SoftDisable => "softDisable",
            Category::ImmediateDisable => "immediateDisable",
            Category::Permanent => "permanent",
        }
    }

    /// Expand a category bitmask; unknown high bits are ignored
    pub fn from_mask(mask: u16) -> Vec<Category> {
        Self::ALL.iter().copied().filter(|c| mask & c.bit() != 0).collect()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = EngineError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| EngineError::UnknownCategory(s.to_string()))
    }
}

/// Alert priority; higher always wins arbitration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Priority {
    Lowest,
    Lower,
    Low,
    Mid,
    High,
    Highest,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Priority::Lowest => "LOWEST",
            Priority::Lower => "LOWER",
            Priority::Low => "LOW",
            Priority::Mid => "MID",
            Priority::High => "HIGH",
            Priority::Highest => "HIGHEST",
        };
        f.write_str(s)
    }
}

/// Visual style of the alert banner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AlertStatus {
    Normal,
    UserPrompt,
    Critical,
}

/// Banner size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AlertSize {
    None,
    Small,
    Mid,
    Full,
}

/// Cue forwarded to the vehicle HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VisualAlert {
    None,
    Fcw,
    SteerRequired,
    BrakePressed,
    WrongGear,
    SeatbeltUnbuckled,
    SpeedTooHigh,
    Ldw,
}

/// Sound played with the alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AudibleAlert {
    None,
    Engage,
    Disengage,
    Refuse,
    Prompt,
    PromptRepeat,
    PromptDistracted,
    WarningSoft,
    WarningImmediate,
}

/// Which event/category pair produced a materialized alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AlertOrigin {
    pub event: EventName,
    pub category: Category,
}

impl fmt::Display for AlertOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.event, self.category)
    }
}

/// A user-facing alert
///
/// Catalog entries carry times in seconds. The resolver stamps the tick-based
/// duration and the provenance when the alert materializes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    /// Primary text line
    pub text_1: String,
    /// Secondary text line (may be empty)
    pub text_2: String,
    pub status: AlertStatus,
    pub size: AlertSize,
    pub priority: Priority,
    pub visual: VisualAlert,
    pub audible: AudibleAlert,
    /// Display duration in seconds
    pub duration_secs: f64,
    /// Display duration in control ticks, stamped at resolution
    pub duration_ticks: u32,
    /// Blink/repeat rate (Hz), 0 for none
    pub rate: f64,
    /// Continuous activation required before the alert may surface (seconds)
    pub creation_delay: f64,
    /// `"<event>/<category>"`, stamped at resolution
    pub alert_type: String,
    /// Typed provenance, stamped at resolution
    pub origin: Option<AlertOrigin>,
}

impl Alert {
    /// Create an alert with no repeat rate and no creation delay
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        text_1: impl Into<String>,
        text_2: impl Into<String>,
        status: AlertStatus,
        size: AlertSize,
        priority: Priority,
        visual: VisualAlert,
        audible: AudibleAlert,
        duration_secs: f64,
    ) -> Self {
        Self {
            text_1: text_1.into(),
            text_2: text_2.into(),
            status,
            size,
            priority,
            visual,
            audible,
            duration_secs,
            duration_ticks: 0,
            rate: 0.0,
            creation_delay: 0.0,
            alert_type: String::new(),
            origin: None,
        }
    }

    /// Builder method: set the repeat rate
    pub fn with_rate(mut self, rate: f64) -> Self {
        self.rate = rate;
        self
    }

    /// Builder method: set the creation delay in seconds
    pub fn with_creation_delay(mut self, creation_delay: f64) -> Self {
        self.creation_delay = creation_delay;
        self
    }

    /// Record where this alert came from and convert its duration to ticks
    pub fn stamp(&mut self, origin: AlertOrigin, tick_duration: f64) {
        self.alert_type = origin.to_string();
        self.origin = Some(origin);
        self.duration_ticks = secs_to_ticks(self.duration_secs, tick_duration);
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} {} {:?} {:?}",
            self.text_1, self.text_2, self.priority, self.visual, self.audible
        )
    }
}

/// Convert seconds to whole ticks, truncating
///
/// A small epsilon keeps values like 0.3 / 0.01 from landing on 29.
pub fn secs_to_ticks(secs: f64, tick_duration: f64) -> u32 {
    if !secs.is_finite() || secs <= 0.0 || tick_duration <= 0.0 {
        return 0;
    }
    (secs / tick_duration + 1e-9).floor() as u32
}

/// Fatal errors raised while building an [`crate::EventCatalog`]
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("Event registered twice: {0}")]
    DuplicateEvent(EventName),

    #[error("Category {category} registered twice for event {event}")]
    DuplicateCategory { event: EventName, category: Category },

    #[error("Event missing from catalog: {0}")]
    MissingEvent(EventName),

    #[error("Unknown event: {0}")]
    UnknownEvent(EventName),

    #[error("Invalid alert for {event}/{category}: {reason}")]
    InvalidAlert {
        event: EventName,
        category: Category,
        reason: String,
    },
}

/// Failure reported by a dynamic alert callback
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResolveError {
    #[error("Invalid telemetry value on channel {channel}: {reason}")]
    InvalidChannel { channel: String, reason: String },

    #[error("Alert callback failed: {0}")]
    Callback(String),
}

/// Errors encoding or decoding the compact binary wire frame
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WireError {
    #[error("Wire frame truncated: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    #[error("Wire frame has {0} trailing bytes")]
    TrailingBytes(usize),

    #[error("Wire frame cannot hold {0} records")]
    TooManyRecords(usize),
}

/// Umbrella error type for the library
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Wire error: {0}")]
    Wire(#[from] WireError),

    #[error("Unknown event name: {0}")]
    UnknownEventName(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_ordering() {
        assert!(Priority::Highest > Priority::High);
        assert!(Priority::Mid > Priority::Low);
        assert!(Priority::Lower > Priority::Lowest);
    }

    #[test]
    fn test_category_names_round_trip() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
        assert!("bogus".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_mask() {
        let mask = Category::SoftDisable.bit() | Category::NoEntry.bit();
        assert_eq!(
            Category::from_mask(mask),
            vec![Category::NoEntry, Category::SoftDisable]
        );
        assert!(Category::from_mask(0).is_empty());
    }

    #[test]
    fn test_secs_to_ticks() {
        assert_eq!(secs_to_ticks(0.3, 0.01), 30);
        assert_eq!(secs_to_ticks(2.0, 0.01), 200);
        assert_eq!(secs_to_ticks(0.0, 0.01), 0);
        assert_eq!(secs_to_ticks(f64::NAN, 0.01), 0);
    }

    #[test]
    fn test_alert_stamp_and_display() {
        let mut alert = Alert::new(
            "Brake!",
            "Risk of Collision",
            AlertStatus::Critical,
            AlertSize::Full,
            Priority::Highest,
            VisualAlert::Fcw,
            AudibleAlert::WarningSoft,
            2.0,
        );
        alert.stamp(
            AlertOrigin {
                event: EventName::Fcw,
                category: Category::Permanent,
            },
            0.01,
        );

        assert_eq!(alert.alert_type, "fcw/permanent");
        assert_eq!(alert.duration_ticks, 200);
        assert_eq!(
            format!("{}", alert),
            "Brake!/Risk of Collision HIGHEST Fcw WarningSoft"
        );
    }
}
