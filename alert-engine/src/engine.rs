//! Per-session tick driver
//!
//! [`AlertEngine`] owns the active set, resolver and codec of one control
//! session and runs the full cycle for a tick:
//!
//! 1. assert the upstream events
//! 2. snapshot category signals and wire records
//! 3. resolve and arbitrate alerts for the requested categories
//! 4. roll the set into the next tick

use crate::arbiter::AlertArbiter;
use crate::catalog::EventCatalog;
use crate::config::EngineConfig;
use crate::context::AlertContext;
use crate::diagnostics::Diagnostic;
use crate::events::ActiveEventSet;
use crate::resolver::AlertResolver;
use crate::types::{Alert, Category, Result};
use crate::wire::{WireCodec, WireEvent};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Everything a tick produced
#[derive(Debug, Clone, Serialize)]
pub struct TickOutput {
    /// Tick number within the session, starting at 0
    pub frame: u64,
    /// Governing alert per requested category that had one
    pub alerts: BTreeMap<Category, Alert>,
    /// Category signals for every category
    pub signals: BTreeMap<Category, bool>,
    /// Wire records of the set as it was resolved
    pub events: Vec<WireEvent>,
    pub diagnostics: Vec<Diagnostic>,
}

/// One control session
#[derive(Debug)]
pub struct AlertEngine {
    config: EngineConfig,
    set: ActiveEventSet,
    resolver: AlertResolver,
    arbiter: AlertArbiter,
    codec: WireCodec,
    frame: u64,
}

impl AlertEngine {
    /// Start a session; fails if the configuration is unusable
    pub fn new(catalog: Arc<EventCatalog>, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        log::debug!(
            "Starting alert session: tick {}s, {} catalog events",
            config.tick_duration_secs,
            catalog.len()
        );
        Ok(Self {
            set: ActiveEventSet::new(catalog.clone()),
            resolver: AlertResolver::new(catalog.clone(), &config),
            arbiter: AlertArbiter::new(),
            codec: WireCodec::new(catalog),
            config,
            frame: 0,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Active set as it stands between ticks
    pub fn events(&self) -> &ActiveEventSet {
        &self.set
    }

    pub fn events_mut(&mut self) -> &mut ActiveEventSet {
        &mut self.set
    }

    pub fn codec_mut(&mut self) -> &mut WireCodec {
        &mut self.codec
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Run one full tick
    ///
    /// `assertions` are `(raw event id, is_static)` pairs from fault detection.
    pub fn tick<I>(
        &mut self,
        assertions: I,
        categories: &[Category],
        context: &AlertContext,
    ) -> TickOutput
    where
        I: IntoIterator<Item = (u16, bool)>,
    {
        for (raw, is_static) in assertions {
            self.set.add_raw(raw, is_static);
        }

        let signals = Category::ALL
            .iter()
            .map(|c| (*c, self.set.contains(*c)))
            .collect();
        let events = self.codec.encode(&self.set);

        let resolved = self.resolver.resolve(&self.set, categories, context);
        let alerts = self.arbiter.govern(&resolved);

        let mut diagnostics = self.set.take_diagnostics();
        diagnostics.extend(self.resolver.take_diagnostics());
        diagnostics.extend(self.codec.take_diagnostics());

        log::trace!(
            "frame {}: {} active, {} alerts, {} diagnostics",
            self.frame,
            events.len(),
            alerts.len(),
            diagnostics.len()
        );

        self.set.clear();
        let output = TickOutput {
            frame: self.frame,
            alerts,
            signals,
            events,
            diagnostics,
        };
        self.frame += 1;
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::event_name::EventName;
    use crate::types::Priority;

    fn engine() -> AlertEngine {
        let catalog = Arc::new(catalog::standard().unwrap());
        AlertEngine::new(catalog, EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let catalog = Arc::new(catalog::standard().unwrap());
        let config = EngineConfig::default().with_tick_duration(0.0);
        assert!(AlertEngine::new(catalog, config).is_err());
    }

    #[test]
    fn test_tick_signals_and_alerts() {
        let mut engine = engine();
        let ctx = AlertContext::new().with_soft_disable_ticks(200);

        let out = engine.tick(
            [(EventName::DoorOpen.raw(), false)],
            &[Category::SoftDisable, Category::NoEntry],
            &ctx,
        );
        assert_eq!(out.frame, 0);
        assert!(out.signals[&Category::SoftDisable]);
        assert!(!out.signals[&Category::ImmediateDisable]);
        assert_eq!(out.alerts[&Category::SoftDisable].priority, Priority::Mid);
        assert_eq!(out.alerts[&Category::NoEntry].text_2, "Door Open");
        assert_eq!(out.events.len(), 1);

        // not re-asserted, so gone next tick
        let out = engine.tick(Vec::<(u16, bool)>::new(), &[Category::SoftDisable], &ctx);
        assert_eq!(out.frame, 1);
        assert!(out.alerts.is_empty());
        assert!(!out.signals[&Category::SoftDisable]);
    }

    #[test]
    fn test_tick_reports_unknown_ids() {
        let mut engine = engine();
        let out = engine.tick([(5000, false)], &[Category::Warning], &AlertContext::new());
        assert!(out.alerts.is_empty());
        assert_eq!(out.diagnostics, vec![Diagnostic::UnknownEventId { raw: 5000 }]);
    }

    #[test]
    fn test_tick_output_serializes() {
        let mut engine = engine();
        let out = engine.tick(
            [(EventName::Fcw.raw(), false)],
            &[Category::Permanent],
            &AlertContext::new(),
        );
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["alerts"]["permanent"]["text_1"], "BRAKE!");
        assert_eq!(json["signals"]["permanent"], true);
    }
}
