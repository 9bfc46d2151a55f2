//! Alert arbitration
//!
//! Collapses the alerts resolved for one tick into a single governing alert
//! per category.

use crate::types::{Alert, Category};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Picks governing alerts
#[derive(Debug, Clone, Copy, Default)]
pub struct AlertArbiter;

impl AlertArbiter {
    pub fn new() -> Self {
        Self
    }

    /// Highest-priority alert
    ///
    /// Ties go to the lowest originating event id. Alerts without provenance
    /// lose ties to stamped ones, and between themselves the first one wins.
    pub fn pick_highest<'a>(&self, alerts: &'a [Alert]) -> Option<&'a Alert> {
        alerts.iter().fold(None, |best, candidate| match best {
            Some(current) if compare(candidate, current) != Ordering::Greater => Some(current),
            _ => Some(candidate),
        })
    }

    /// Governing alert for every category that has at least one candidate
    ///
    /// Alerts are grouped by the category stamped at resolution; unstamped
    /// alerts are ignored.
    pub fn govern(&self, alerts: &[Alert]) -> BTreeMap<Category, Alert> {
        let mut by_category: BTreeMap<Category, Vec<Alert>> = BTreeMap::new();
        for alert in alerts {
            if let Some(origin) = alert.origin {
                by_category.entry(origin.category).or_default().push(alert.clone());
            }
        }

        by_category
            .into_iter()
            .filter_map(|(category, candidates)| {
                self.pick_highest(&candidates).map(|a| (category, a.clone()))
            })
            .collect()
    }
}

/// `Greater` when `a` should govern over `b`
fn compare(a: &Alert, b: &Alert) -> Ordering {
    a.priority
        .cmp(&b.priority)
        .then_with(|| origin_event(b).cmp(&origin_event(a)))
}

/// Unstamped alerts sort after every real event
fn origin_event(alert: &Alert) -> u32 {
    alert
        .origin
        .map(|o| u32::from(o.event.raw()))
        .unwrap_or(u32::MAX)
}
