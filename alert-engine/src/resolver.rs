//! Alert resolution
//!
//! Turns the active event set into materialized alerts for the requested
//! categories. Resolution never fails: a dynamic alert that errors or panics is
//! replaced by a generic internal-error alert and reported as a diagnostic.

use crate::catalog::{AlertSpec, EventCatalog};
use crate::config::EngineConfig;
use crate::context::{AlertContext, ContextView};
use crate::diagnostics::{Diagnostic, DiagnosticLog};
use crate::event_name::EventName;
use crate::events::ActiveEventSet;
use crate::types::{
    Alert, AlertOrigin, AlertSize, AlertStatus, AudibleAlert, Category, Priority, VisualAlert,
};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Slack for comparing accumulated tick time against creation delays
const GATE_EPSILON: f64 = 1e-9;

/// Alert shown in place of a dynamic alert that could not be produced
pub fn internal_error_alert() -> Alert {
    Alert::new(
        "Internal Alert Error",
        "Check system logs",
        AlertStatus::UserPrompt,
        AlertSize::Mid,
        Priority::High,
        VisualAlert::SteerRequired,
        AudibleAlert::PromptRepeat,
        0.2,
    )
}

/// Whether an event active for `counter` previous ticks has been active long
/// enough to surface an alert with `creation_delay`
pub fn delay_elapsed(counter: u32, tick_duration: f64, creation_delay: f64) -> bool {
    (f64::from(counter) + 1.0) * tick_duration + GATE_EPSILON >= creation_delay
}

/// Materializes alerts from active events
#[derive(Debug)]
pub struct AlertResolver {
    catalog: Arc<EventCatalog>,
    tick_duration: f64,
    metric: bool,
    soft_disable_immediate_ticks: u32,
    diagnostics: DiagnosticLog,
}

impl AlertResolver {
    pub fn new(catalog: Arc<EventCatalog>, config: &EngineConfig) -> Self {
        Self {
            catalog,
            tick_duration: config.tick_duration_secs,
            metric: config.metric,
            soft_disable_immediate_ticks: config.soft_disable_immediate_ticks(),
            diagnostics: DiagnosticLog::new(),
        }
    }

    /// Alerts for every active event in each requested category
    ///
    /// Events are visited in ascending id order, so for equal priorities the
    /// lowest event id comes first. Alerts still inside their creation delay
    /// are left out. The result is otherwise unordered.
    ///
    /// Each call is one resolution cycle: a missing channel or failing
    /// callback that persists across calls is reported only once.
    pub fn resolve(
        &mut self,
        set: &ActiveEventSet,
        categories: &[Category],
        context: &AlertContext,
    ) -> Vec<Alert> {
        let catalog = Arc::clone(&self.catalog);
        let mut alerts = Vec::new();
        self.diagnostics.next_cycle();

        for event in set.iter() {
            let Ok(map) = catalog.lookup(event) else { continue };
            for category in categories {
                let Some(spec) = map.get(*category) else { continue };
                let mut alert = self.materialize(event, *category, spec, context);

                if !delay_elapsed(set.counter(event), self.tick_duration, alert.creation_delay) {
                    log::trace!(
                        "{}/{} pending ({} ticks active)",
                        event,
                        category,
                        set.counter(event).saturating_add(1)
                    );
                    continue;
                }

                alert.stamp(
                    AlertOrigin {
                        event,
                        category: *category,
                    },
                    self.tick_duration,
                );
                alerts.push(alert);
            }
        }

        alerts
    }

    fn materialize(
        &mut self,
        event: EventName,
        category: Category,
        spec: &AlertSpec,
        context: &AlertContext,
    ) -> Alert {
        let mut view = ContextView::new(context, self.metric, self.soft_disable_immediate_ticks);
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| spec.materialize(&mut view)));

        for channel in view.into_missing() {
            self.diagnostics.record(Diagnostic::MissingTelemetryChannel {
                event,
                category,
                channel,
            });
        }

        let reason = match outcome {
            Ok(Ok(alert)) => return alert,
            Ok(Err(e)) => e.to_string(),
            Err(payload) => panic_message(payload.as_ref()),
        };
        self.diagnostics.record(Diagnostic::ResolverFailure {
            event,
            category,
            reason,
        });
        internal_error_alert()
    }

    pub fn diagnostics(&self) -> &DiagnosticLog {
        &self.diagnostics
    }

    /// Drain diagnostics recorded since the last call
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        self.diagnostics.drain()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {}", s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {}", s)
    } else {
        "panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts;
    use crate::catalog::callbacks;
    use crate::context::SignalValue;
    use crate::types::ResolveError;

    fn catalog() -> Arc<EventCatalog> {
        Arc::new(
            EventCatalog::builder()
                .event(
                    EventName::Ldw,
                    [(Category::Warning, AlertSpec::from(alerts::normal_permanent("Lane Departure")))],
                )
                .event(
                    EventName::SensorDataInvalid,
                    [(
                        Category::Permanent,
                        AlertSpec::from(
                            alerts::normal_permanent("Sensor Data Invalid").with_creation_delay(0.05),
                        ),
                    )],
                )
                .event(
                    EventName::LowMemory,
                    [(Category::Permanent, AlertSpec::dynamic(callbacks::low_memory))],
                )
                .event(
                    EventName::OutOfSpace,
                    [(Category::Permanent, AlertSpec::dynamic(callbacks::out_of_space))],
                )
                .event(
                    EventName::HighCpuUsage,
                    [(
                        Category::Permanent,
                        AlertSpec::dynamic(|_: &mut ContextView<'_>| -> Result<Alert, ResolveError> {
                            panic!("sensor table corrupted")
                        }),
                    )],
                )
                .build()
                .unwrap(),
        )
    }

    fn resolver(catalog: Arc<EventCatalog>) -> AlertResolver {
        AlertResolver::new(catalog, &EngineConfig::default())
    }

    #[test]
    fn test_empty_set_resolves_nothing() {
        let catalog = catalog();
        let set = ActiveEventSet::new(catalog.clone());
        let mut resolver = resolver(catalog);
        assert!(resolver
            .resolve(&set, &[Category::Warning], &AlertContext::new())
            .is_empty());
    }

    #[test]
    fn test_resolve_stamps_provenance() {
        let catalog = catalog();
        let mut set = ActiveEventSet::new(catalog.clone());
        set.add(EventName::Ldw, false);
        let mut resolver = resolver(catalog);

        let alerts = resolver.resolve(&set, &[Category::Warning, Category::Permanent], &AlertContext::new());
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].alert_type, "ldw/warning");
        assert_eq!(alerts[0].duration_ticks, 20);
        assert_eq!(
            alerts[0].origin,
            Some(AlertOrigin {
                event: EventName::Ldw,
                category: Category::Warning
            })
        );
    }

    #[test]
    fn test_creation_delay_gates_alert() {
        let catalog = catalog();
        let mut set = ActiveEventSet::new(catalog.clone());
        let mut resolver = resolver(catalog);
        let ctx = AlertContext::new();

        // 0.05s at 0.01s per tick surfaces on the fifth consecutive tick
        for tick in 1..=7 {
            set.add(EventName::SensorDataInvalid, false);
            let alerts = resolver.resolve(&set, &[Category::Permanent], &ctx);
            assert_eq!(alerts.len() == 1, tick >= 5, "tick {}", tick);
            set.clear();
        }

        // one missed tick restarts the delay
        set.clear();
        set.add(EventName::SensorDataInvalid, false);
        assert!(resolver.resolve(&set, &[Category::Permanent], &ctx).is_empty());
    }

    #[test]
    fn test_delay_elapsed() {
        assert!(delay_elapsed(0, 0.01, 0.0));
        assert!(!delay_elapsed(0, 0.01, 0.02));
        assert!(delay_elapsed(1, 0.01, 0.02));
        assert!(delay_elapsed(29, 0.01, 0.3));
        assert!(!delay_elapsed(28, 0.01, 0.3));
    }

    #[test]
    fn test_missing_channel_is_reported() {
        let catalog = catalog();
        let mut set = ActiveEventSet::new(catalog.clone());
        set.add(EventName::LowMemory, false);
        let mut resolver = resolver(catalog);

        let alerts = resolver.resolve(&set, &[Category::Permanent], &AlertContext::new());
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].text_1, "Low Memory");
        assert_eq!(
            resolver.take_diagnostics(),
            vec![Diagnostic::MissingTelemetryChannel {
                event: EventName::LowMemory,
                category: Category::Permanent,
                channel: "deviceState.memoryUsagePercent".to_string(),
            }]
        );
    }

    #[test]
    fn test_failing_callback_falls_back() {
        let catalog = catalog();
        let mut set = ActiveEventSet::new(catalog.clone());
        set.add(EventName::OutOfSpace, false);
        let mut resolver = resolver(catalog);
        let ctx = AlertContext::new().with_channel("deviceState.freeSpacePercent", SignalValue::Float(-3.0));

        let alerts = resolver.resolve(&set, &[Category::Permanent], &ctx);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].text_1, "Internal Alert Error");
        assert_eq!(alerts[0].priority, Priority::High);
        assert_eq!(alerts[0].alert_type, "outOfSpace/permanent");

        let diagnostics = resolver.take_diagnostics();
        assert!(matches!(
            &diagnostics[..],
            [Diagnostic::ResolverFailure { event: EventName::OutOfSpace, .. }]
        ));
    }

    #[test]
    fn test_panicking_callback_falls_back() {
        let catalog = catalog();
        let mut set = ActiveEventSet::new(catalog.clone());
        set.add(EventName::HighCpuUsage, false);
        set.add(EventName::SensorDataInvalid, false);
        let mut resolver = resolver(catalog);

        let alerts = resolver.resolve(&set, &[Category::Permanent], &AlertContext::new());
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].text_1, "Internal Alert Error");

        match &resolver.take_diagnostics()[..] {
            [Diagnostic::ResolverFailure { reason, .. }] => {
                assert_eq!(reason, "panicked: sensor table corrupted")
            }
            other => panic!("unexpected diagnostics: {:?}", other),
        }
    }

    #[test]
    fn test_persisting_missing_channels_stay_bounded() {
        let catalog = Arc::new(crate::catalog::standard().unwrap());
        let mut set = ActiveEventSet::new(catalog.clone());
        set.add(EventName::Overheat, true);
        let mut resolver = resolver(catalog);
        let ctx = AlertContext::new();

        resolver.resolve(&set, &[Category::Permanent], &ctx);
        set.clear();
        assert_eq!(resolver.diagnostics().len(), 3);

        // never drained
        for _ in 0..10_000 {
            let alerts = resolver.resolve(&set, &[Category::Permanent], &ctx);
            assert_eq!(alerts.len(), 1);
            set.clear();
        }
        assert_eq!(resolver.diagnostics().len(), 3);
        assert_eq!(resolver.diagnostics().dropped(), 0);
    }

    #[test]
    fn test_saturated_counter_with_trace_logging() {
        let catalog = Arc::new(
            EventCatalog::builder()
                .event(
                    EventName::Ldw,
                    [(
                        Category::Warning,
                        AlertSpec::from(alerts::normal_permanent("Lane Departure").with_creation_delay(1e12)),
                    )],
                )
                .build()
                .unwrap(),
        );
        let mut set = ActiveEventSet::new(catalog.clone());
        set.add(EventName::Ldw, false);
        set.set_counter(EventName::Ldw, u32::MAX);
        let mut resolver = resolver(catalog);

        log::set_max_level(log::LevelFilter::Trace);
        let alerts = resolver.resolve(&set, &[Category::Warning], &AlertContext::new());
        assert!(alerts.is_empty());
    }
}
