//! Per-tick diagnostics
//!
//! Nothing that goes wrong inside a tick is allowed to abort it. Instead the
//! component that noticed the problem degrades gracefully and records a
//! [`Diagnostic`] here for the caller to drain and publish.

use crate::event_name::EventName;
use crate::types::Category;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A recoverable problem observed during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Diagnostic {
    /// An id absent from the catalog was asserted or decoded; it was dropped
    UnknownEventId { raw: u16 },

    /// A dynamic alert read a channel the snapshot did not contain
    MissingTelemetryChannel {
        event: EventName,
        category: Category,
        channel: String,
    },

    /// Received category flags disagree with the local catalog; flags ignored
    MalformedWireRecord {
        raw: u16,
        received_mask: u16,
        local_mask: u16,
    },

    /// A dynamic alert failed and was replaced by the internal-error alert
    ResolverFailure {
        event: EventName,
        category: Category,
        reason: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnknownEventId { raw } => write!(f, "unknown event id {}", raw),
            Diagnostic::MissingTelemetryChannel { event, category, channel } => {
                write!(f, "{}/{}: missing telemetry channel {}", event, category, channel)
            }
            Diagnostic::MalformedWireRecord { raw, received_mask, local_mask } => write!(
                f,
                "wire record {}: category mask 0x{:03X} does not match local 0x{:03X}",
                raw, received_mask, local_mask
            ),
            Diagnostic::ResolverFailure { event, category, reason } => {
                write!(f, "{}/{}: alert callback failed: {}", event, category, reason)
            }
        }
    }
}

/// Pending entries kept before new diagnostics are dropped
pub const DEFAULT_CAPACITY: usize = 256;

/// Buffer of diagnostics waiting to be drained
///
/// A condition is buffered and logged at `warn` only in the cycle it first
/// appears. While it persists from one cycle to the next it is logged at
/// `debug` and not buffered again. The owning component marks cycle
/// boundaries with [`next_cycle`](Self::next_cycle). Once `capacity` entries
/// are pending, further diagnostics are counted in [`dropped`](Self::dropped)
/// instead of stored.
#[derive(Debug, Clone)]
pub struct DiagnosticLog {
    entries: Vec<Diagnostic>,
    capacity: usize,
    dropped: u64,
    overflow_reported: bool,
    current: Vec<Diagnostic>,
    previous: Vec<Diagnostic>,
}

impl Default for DiagnosticLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl DiagnosticLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
            dropped: 0,
            overflow_reported: false,
            current: Vec::new(),
            previous: Vec::new(),
        }
    }

    /// Record a diagnostic and emit it on the log facade
    ///
    /// Returns `true` if the diagnostic was buffered.
    pub fn record(&mut self, diagnostic: Diagnostic) -> bool {
        let seen_now = self.current.contains(&diagnostic);
        let persisting = seen_now || self.previous.contains(&diagnostic);
        if !seen_now && self.current.len() < self.capacity {
            self.current.push(diagnostic.clone());
        }

        if persisting {
            log::debug!("{} (persisting)", diagnostic);
            return false;
        }

        if self.entries.len() >= self.capacity {
            self.dropped += 1;
            if !self.overflow_reported {
                log::warn!(
                    "diagnostic buffer full ({} pending), dropping: {}",
                    self.entries.len(),
                    diagnostic
                );
                self.overflow_reported = true;
            } else {
                log::debug!("dropped: {}", diagnostic);
            }
            return false;
        }

        log::warn!("{}", diagnostic);
        self.entries.push(diagnostic);
        true
    }

    /// Close the current cycle
    ///
    /// Conditions recorded in the cycle just closed count as persisting if
    /// they are recorded again in the next one.
    pub fn next_cycle(&mut self) {
        self.previous = std::mem::take(&mut self.current);
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Diagnostics discarded because the buffer was full, since creation
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Take every pending diagnostic, leaving the log empty
    pub fn drain(&mut self) -> Vec<Diagnostic> {
        self.overflow_reported = false;
        std::mem::take(&mut self.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_drain() {
        let mut log = DiagnosticLog::new();
        assert!(log.is_empty());

        log.record(Diagnostic::UnknownEventId { raw: 9999 });
        log.record(Diagnostic::MissingTelemetryChannel {
            event: EventName::Overheat,
            category: Category::Permanent,
            channel: "deviceState.cpuTempC".to_string(),
        });
        assert_eq!(log.len(), 2);

        let drained = log.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0], Diagnostic::UnknownEventId { raw: 9999 });
        assert!(log.is_empty());
    }

    #[test]
    fn test_persisting_condition_is_recorded_once() {
        let mut log = DiagnosticLog::new();
        let missing = Diagnostic::MissingTelemetryChannel {
            event: EventName::Overheat,
            category: Category::Permanent,
            channel: "deviceState.cpuTempC".to_string(),
        };

        for _ in 0..1000 {
            log.record(missing.clone());
            log.next_cycle();
        }
        assert_eq!(log.entries(), &[missing.clone()]);

        // one clean cycle, then the condition counts as new again
        log.next_cycle();
        assert!(log.record(missing.clone()));
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_repeat_within_cycle_is_recorded_once() {
        let mut log = DiagnosticLog::new();
        assert!(log.record(Diagnostic::UnknownEventId { raw: 9000 }));
        assert!(!log.record(Diagnostic::UnknownEventId { raw: 9000 }));
        assert!(log.record(Diagnostic::UnknownEventId { raw: 9001 }));
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_capacity_drops_and_counts() {
        let mut log = DiagnosticLog::with_capacity(4);
        for raw in 0..10 {
            log.record(Diagnostic::UnknownEventId { raw: 1000 + raw });
            log.next_cycle();
        }
        assert_eq!(log.len(), 4);
        assert_eq!(log.dropped(), 6);
        assert_eq!(log.entries()[3], Diagnostic::UnknownEventId { raw: 1003 });

        log.drain();
        assert!(log.record(Diagnostic::UnknownEventId { raw: 2000 }));
        assert_eq!(log.dropped(), 6);
    }

    #[test]
    fn test_display() {
        let d = Diagnostic::MalformedWireRecord {
            raw: 3,
            received_mask: 0x001,
            local_mask: 0x010,
        };
        assert_eq!(
            d.to_string(),
            "wire record 3: category mask 0x001 does not match local 0x010"
        );
    }

    #[test]
    fn test_serialize_tagged() {
        let d = Diagnostic::UnknownEventId { raw: 7 };
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, r#"{"kind":"unknownEventId","raw":7}"#);
    }
}
