//! Scenario replay
//!
//! Drives an [`AlertEngine`] through every tick of a scenario and collects the
//! per-tick output for reporting.

use crate::config::Scenario;
use crate::report::ScenarioReport;
use alert_engine::{AlertEngine, EventCatalog};
use anyhow::{Context, Result};
use chrono::Utc;
use std::sync::Arc;

/// Run a scenario in a fresh session
pub fn run_scenario(scenario: &Scenario, catalog: Arc<EventCatalog>) -> Result<ScenarioReport> {
    let started_at = Utc::now();
    let mut engine = AlertEngine::new(catalog, scenario.engine.clone())
        .with_context(|| format!("Cannot start session for scenario {:?}", scenario.name))?;

    log::info!("Replaying {:?}: {} ticks", scenario.name, scenario.tick_count());

    let mut ticks = Vec::new();
    for block in &scenario.blocks {
        for _ in 0..block.repeat {
            let output = engine.tick(
                block.assertions.iter().copied(),
                &block.categories,
                &block.context,
            );
            ticks.push(output);
        }
    }

    let diagnostics: usize = ticks.iter().map(|t| t.diagnostics.len()).sum();
    if diagnostics > 0 {
        log::warn!("{:?}: {} diagnostics recorded", scenario.name, diagnostics);
    }

    Ok(ScenarioReport {
        scenario: scenario.name.clone(),
        started_at,
        tick_duration_secs: scenario.engine.tick_duration_secs,
        ticks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_scenario;
    use alert_engine::{catalog, Category, Priority};

    fn standard() -> Arc<EventCatalog> {
        Arc::new(catalog::standard().unwrap())
    }

    #[test]
    fn test_replay_door_open() {
        let scenario = parse_scenario(
            r#"
            [[tick]]
            repeat = 2
            events = ["doorOpen"]
            categories = ["softDisable", "noEntry"]
            soft_disable_ticks = 200

            [[tick]]
            categories = ["softDisable"]
            "#,
            "door",
        )
        .unwrap();

        let report = run_scenario(&scenario, standard()).unwrap();
        assert_eq!(report.ticks.len(), 3);
        assert_eq!(report.ticks[1].frame, 1);
        assert_eq!(
            report.ticks[0].alerts[&Category::SoftDisable].priority,
            Priority::Mid
        );
        assert!(report.ticks[2].alerts.is_empty());
    }

    #[test]
    fn test_replay_records_unknown_ids() {
        let scenario = parse_scenario("[[tick]]\nraw_events = [60000]\n", "unknown").unwrap();
        let report = run_scenario(&scenario, standard()).unwrap();
        assert_eq!(report.ticks[0].diagnostics.len(), 1);
        assert!(report.ticks[0].events.is_empty());
    }
}
