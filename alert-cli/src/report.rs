//! Replay report rendering (text and JSON)

use alert_engine::{Category, EventName, Priority, TickOutput};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write;

/// Output of one replayed scenario
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub scenario: String,
    pub started_at: DateTime<Utc>,
    pub tick_duration_secs: f64,
    pub ticks: Vec<TickOutput>,
}

impl ScenarioReport {
    /// Pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .with_context(|| format!("Failed to serialize report for {:?}", self.scenario))
    }

    /// Human-readable summary, one line per tick where something changed
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "=== {} ({} ticks, started {}) ===",
            self.scenario,
            self.ticks.len(),
            self.started_at.format("%Y-%m-%d %H:%M:%S UTC")
        );

        let mut previous: Option<String> = None;
        for tick in &self.ticks {
            let line = describe_tick(tick);
            if previous.as_deref() != Some(line.as_str()) {
                let _ = writeln!(
                    out,
                    "[{:>8.3}s] frame {:>5}: {}",
                    tick.frame as f64 * self.tick_duration_secs,
                    tick.frame,
                    line
                );
            }
            for diagnostic in &tick.diagnostics {
                let _ = writeln!(out, "           frame {:>5}: ! {}", tick.frame, diagnostic);
            }
            previous = Some(line);
        }
        out
    }
}

fn describe_tick(tick: &TickOutput) -> String {
    let active: Vec<String> = tick
        .events
        .iter()
        .map(|e| match EventName::from_raw(e.event_id) {
            Some(name) => name.to_string(),
            None => e.event_id.to_string(),
        })
        .collect();

    let signals: Vec<&str> = tick
        .signals
        .iter()
        .filter(|(_, on)| **on)
        .map(|(c, _)| c.as_str())
        .collect();

    let alerts: Vec<String> = tick
        .alerts
        .iter()
        .map(|(category, alert)| format!("{}={}", category, alert))
        .collect();

    format!(
        "active [{}] signals [{}] alerts [{}]",
        active.join(", "),
        signals.join(", "),
        alerts.join("; ")
    )
}

/// Text listing of a catalog grouped by category and priority
pub fn catalog_listing(
    listing: &BTreeMap<Category, Vec<(Priority, Vec<EventName>)>>,
    only: Option<Category>,
) -> String {
    let mut out = String::new();
    for (category, by_priority) in listing {
        if only.is_some_and(|c| c != *category) {
            continue;
        }
        let _ = writeln!(out, "{}:", category);
        for (priority, events) in by_priority {
            let names: Vec<&str> = events.iter().map(|e| e.as_str()).collect();
            let _ = writeln!(out, "  {:<8} {}", priority.to_string(), names.join(", "));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use alert_engine::{catalog, AlertContext, AlertEngine, EngineConfig};
    use std::sync::Arc;

    fn report() -> ScenarioReport {
        let catalog = Arc::new(catalog::standard().unwrap());
        let mut engine = AlertEngine::new(catalog, EngineConfig::default()).unwrap();
        let ctx = AlertContext::new();
        let ticks = (0..3)
            .map(|_| engine.tick([(EventName::Fcw.raw(), false)], &[Category::Permanent], &ctx))
            .collect();
        ScenarioReport {
            scenario: "fcw".to_string(),
            started_at: DateTime::from_timestamp(0, 0).unwrap(),
            tick_duration_secs: 0.01,
            ticks,
        }
    }

    #[test]
    fn test_text_collapses_repeated_ticks() {
        let text = report().to_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "=== fcw (3 ticks, started 1970-01-01 00:00:00 UTC) ===");
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("active [fcw]"));
        assert!(lines[1].contains("permanent=BRAKE!/Risk of Collision HIGHEST Fcw WarningSoft"));
    }

    #[test]
    fn test_json_report() {
        let json = report().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["scenario"], "fcw");
        assert_eq!(value["ticks"].as_array().unwrap().len(), 3);
        assert_eq!(value["started_at"], "1970-01-01T00:00:00Z");
    }

    #[test]
    fn test_catalog_listing_filter() {
        let catalog = catalog::standard().unwrap();
        let listing = catalog.alerts_by_priority(&AlertContext::new());
        let text = catalog_listing(&listing, Some(Category::Enable));
        assert_eq!(text, "enable:\n  MID      pcmEnable, buttonEnable\n");
    }
}
