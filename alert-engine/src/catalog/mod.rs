//! Event catalog
//!
//! The catalog maps every known event to the alerts it raises in each
//! category. It is assembled once with [`CatalogBuilder`], validated, and then
//! shared read-only (`Arc<EventCatalog>`) by the active set, resolver and codec.
//! Lookups are direct array indexing by event id.

pub mod callbacks;
pub mod standard;

use crate::context::{AlertContext, ContextView};
use crate::event_name::EventName;
use crate::types::{Alert, CatalogError, Category, Priority, ResolveError};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

pub use standard::standard;

/// Signature of an alert computed from the telemetry snapshot
pub type AlertFn = dyn Fn(&mut ContextView<'_>) -> Result<Alert, ResolveError> + Send + Sync;

/// What an event displays for one category
#[derive(Clone)]
pub enum AlertSpec {
    /// Fixed content
    Fixed(Alert),
    /// Content computed from the current snapshot
    Dynamic(Arc<AlertFn>),
}

impl AlertSpec {
    /// Wrap a callback as a dynamic spec
    pub fn dynamic<F>(f: F) -> Self
    where
        F: Fn(&mut ContextView<'_>) -> Result<Alert, ResolveError> + Send + Sync + 'static,
    {
        AlertSpec::Dynamic(Arc::new(f))
    }

    /// Produce the alert for this tick
    pub fn materialize(&self, view: &mut ContextView<'_>) -> Result<Alert, ResolveError> {
        match self {
            AlertSpec::Fixed(alert) => Ok(alert.clone()),
            AlertSpec::Dynamic(f) => f(view),
        }
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, AlertSpec::Dynamic(_))
    }
}

impl From<Alert> for AlertSpec {
    fn from(alert: Alert) -> Self {
        AlertSpec::Fixed(alert)
    }
}

impl fmt::Debug for AlertSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertSpec::Fixed(alert) => f.debug_tuple("Fixed").field(alert).finish(),
            AlertSpec::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

/// Alerts of a single event, one slot per category
#[derive(Debug, Clone)]
pub struct CategoryMap {
    slots: [Option<AlertSpec>; Category::COUNT],
}

impl CategoryMap {
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| None),
        }
    }

    pub fn get(&self, category: Category) -> Option<&AlertSpec> {
        self.slots[category.index()].as_ref()
    }

    pub fn contains(&self, category: Category) -> bool {
        self.slots[category.index()].is_some()
    }

    /// Registered categories with their specs, in category order
    pub fn iter(&self) -> impl Iterator<Item = (Category, &AlertSpec)> {
        Category::ALL
            .into_iter()
            .filter_map(move |c| self.get(c).map(|spec| (c, spec)))
    }

    /// Category membership as a bitmask (see [`Category::bit`])
    pub fn mask(&self) -> u16 {
        self.iter().fold(0, |mask, (c, _)| mask | c.bit())
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn insert(&mut self, category: Category, spec: AlertSpec) -> Option<AlertSpec> {
        self.slots[category.index()].replace(spec)
    }
}

impl Default for CategoryMap {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable registry of events and their alerts
#[derive(Debug, Clone)]
pub struct EventCatalog {
    /// Indexed by event id; `None` means the event is not in this catalog
    entries: Vec<Option<CategoryMap>>,
}

impl EventCatalog {
    /// Start building a catalog
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::new()
    }

    /// Alerts registered for an event
    pub fn lookup(&self, event: EventName) -> Result<&CategoryMap, CatalogError> {
        self.entries[event.index()]
            .as_ref()
            .ok_or(CatalogError::UnknownEvent(event))
    }

    /// Whether the event participates in a category
    pub fn membership(&self, event: EventName, category: Category) -> bool {
        self.entries[event.index()]
            .as_ref()
            .map(|m| m.contains(category))
            .unwrap_or(false)
    }

    pub fn is_known(&self, event: EventName) -> bool {
        self.entries[event.index()].is_some()
    }

    /// Category mask of an event; 0 for unknown events
    pub fn mask(&self, event: EventName) -> u16 {
        self.entries[event.index()]
            .as_ref()
            .map(CategoryMap::mask)
            .unwrap_or(0)
    }

    /// Events present in the catalog, ascending
    pub fn events(&self) -> impl Iterator<Item = EventName> + '_ {
        EventName::ALL.iter().copied().filter(move |e| self.is_known(*e))
    }

    /// Number of registered events
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Events grouped by category and priority, highest priority first
    ///
    /// Dynamic alerts are materialized against `context`; ones that fail are
    /// left out of the listing.
    pub fn alerts_by_priority(
        &self,
        context: &AlertContext,
    ) -> BTreeMap<Category, Vec<(Priority, Vec<EventName>)>> {
        let mut grouped: BTreeMap<Category, BTreeMap<Priority, Vec<EventName>>> = BTreeMap::new();

        for event in self.events() {
            let Ok(map) = self.lookup(event) else { continue };
            for (category, spec) in map.iter() {
                let mut view = ContextView::new(context, true, 0);
                match spec.materialize(&mut view) {
                    Ok(alert) => grouped
                        .entry(category)
                        .or_default()
                        .entry(alert.priority)
                        .or_default()
                        .push(event),
                    Err(e) => log::debug!("Skipping {}/{} in listing: {}", event, category, e),
                }
            }
        }

        grouped
            .into_iter()
            .map(|(category, by_priority)| (category, by_priority.into_iter().rev().collect()))
            .collect()
    }
}

/// Assembles and validates an [`EventCatalog`]
///
/// Registration problems are collected and reported by [`CatalogBuilder::build`],
/// which is the only fallible step.
#[derive(Debug)]
pub struct CatalogBuilder {
    entries: Vec<Option<CategoryMap>>,
    errors: Vec<CatalogError>,
    require_all: bool,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self {
            entries: vec![None; EventName::COUNT],
            errors: Vec::new(),
            require_all: false,
        }
    }

    /// Register an event with its alerts; an empty list registers an event
    /// that raises no alerts
    pub fn event<I, S>(mut self, event: EventName, alerts: I) -> Self
    where
        I: IntoIterator<Item = (Category, S)>,
        S: Into<AlertSpec>,
    {
        if self.entries[event.index()].is_some() {
            self.errors.push(CatalogError::DuplicateEvent(event));
            return self;
        }

        let mut map = CategoryMap::new();
        for (category, spec) in alerts {
            if map.insert(category, spec.into()).is_some() {
                self.errors.push(CatalogError::DuplicateCategory { event, category });
            }
        }
        self.entries[event.index()] = Some(map);
        self
    }

    /// Fail the build unless every [`EventName`] is registered
    pub fn require_all_events(mut self) -> Self {
        self.require_all = true;
        self
    }

    /// Validate and freeze the catalog
    pub fn build(self) -> Result<EventCatalog, CatalogError> {
        if let Some(err) = self.errors.into_iter().next() {
            return Err(err);
        }

        if self.require_all {
            if let Some(missing) = EventName::ALL
                .iter()
                .find(|e| self.entries[e.index()].is_none())
            {
                return Err(CatalogError::MissingEvent(*missing));
            }
        }

        for event in EventName::ALL {
            let Some(map) = &self.entries[event.index()] else { continue };
            for (category, spec) in map.iter() {
                if let AlertSpec::Fixed(alert) = spec {
                    validate_alert(*event, category, alert)?;
                }
            }
        }

        let catalog = EventCatalog {
            entries: self.entries,
        };
        log::info!("Event catalog built: {} events", catalog.len());
        Ok(catalog)
    }
}

impl Default for CatalogBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_alert(event: EventName, category: Category, alert: &Alert) -> Result<(), CatalogError> {
    let invalid = |reason: &str| CatalogError::InvalidAlert {
        event,
        category,
        reason: reason.to_string(),
    };

    if !alert.creation_delay.is_finite() || alert.creation_delay < 0.0 {
        return Err(invalid("creation delay must be a non-negative number of seconds"));
    }
    if !alert.duration_secs.is_finite() || alert.duration_secs < 0.0 {
        return Err(invalid("duration must be a non-negative number of seconds"));
    }
    if !alert.rate.is_finite() || alert.rate < 0.0 {
        return Err(invalid("rate must be non-negative"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts;
    use crate::catalog::callbacks;

    fn small_catalog() -> EventCatalog {
        EventCatalog::builder()
            .event(EventName::StockFcw, Vec::<(Category, AlertSpec)>::new())
            .event(
                EventName::DoorOpen,
                [
                    (Category::SoftDisable, callbacks::user_soft_disable_spec("Door Open")),
                    (Category::NoEntry, alerts::no_entry("Door Open").into()),
                ],
            )
            .build()
            .unwrap()
    }

    #[test]
    fn test_lookup_and_membership() {
        let catalog = small_catalog();
        assert_eq!(catalog.len(), 2);

        let map = catalog.lookup(EventName::DoorOpen).unwrap();
        assert_eq!(map.len(), 2);
        assert!(map.get(Category::SoftDisable).unwrap().is_dynamic());
        assert!(!map.get(Category::NoEntry).unwrap().is_dynamic());

        assert!(catalog.membership(EventName::DoorOpen, Category::NoEntry));
        assert!(!catalog.membership(EventName::DoorOpen, Category::Warning));
        assert!(!catalog.membership(EventName::Fcw, Category::Permanent));

        assert!(catalog.lookup(EventName::StockFcw).unwrap().is_empty());
        assert_eq!(
            catalog.lookup(EventName::Fcw).unwrap_err(),
            CatalogError::UnknownEvent(EventName::Fcw)
        );
    }

    #[test]
    fn test_mask() {
        let catalog = small_catalog();
        assert_eq!(
            catalog.mask(EventName::DoorOpen),
            Category::SoftDisable.bit() | Category::NoEntry.bit()
        );
        assert_eq!(catalog.mask(EventName::StockFcw), 0);
        assert_eq!(catalog.mask(EventName::Fcw), 0);
    }

    #[test]
    fn test_duplicate_event_is_fatal() {
        let result = EventCatalog::builder()
            .event(EventName::Ldw, [(Category::Permanent, alerts::normal_permanent("Lane Departure"))])
            .event(EventName::Ldw, [(Category::Warning, alerts::normal_permanent("Lane Departure"))])
            .build();
        assert_eq!(result.unwrap_err(), CatalogError::DuplicateEvent(EventName::Ldw));
    }

    #[test]
    fn test_duplicate_category_is_fatal() {
        let result = EventCatalog::builder()
            .event(
                EventName::Ldw,
                [
                    (Category::Permanent, alerts::normal_permanent("A")),
                    (Category::Permanent, alerts::normal_permanent("B")),
                ],
            )
            .build();
        assert_eq!(
            result.unwrap_err(),
            CatalogError::DuplicateCategory {
                event: EventName::Ldw,
                category: Category::Permanent
            }
        );
    }

    #[test]
    fn test_missing_event_when_required() {
        let result = EventCatalog::builder()
            .event(EventName::Ldw, [(Category::Permanent, alerts::normal_permanent("A"))])
            .require_all_events()
            .build();
        assert_eq!(result.unwrap_err(), CatalogError::MissingEvent(EventName::StockFcw));
    }

    #[test]
    fn test_invalid_creation_delay_is_fatal() {
        let result = EventCatalog::builder()
            .event(
                EventName::Ldw,
                [(Category::Permanent, alerts::normal_permanent("A").with_creation_delay(-1.0))],
            )
            .build();
        assert!(matches!(result, Err(CatalogError::InvalidAlert { .. })));
    }

    #[test]
    fn test_alerts_by_priority() {
        let catalog = small_catalog();
        let listing = catalog.alerts_by_priority(&AlertContext::new());

        let no_entry = &listing[&Category::NoEntry];
        assert_eq!(no_entry, &vec![(Priority::Low, vec![EventName::DoorOpen])]);
        let soft = &listing[&Category::SoftDisable];
        assert_eq!(soft, &vec![(Priority::Mid, vec![EventName::DoorOpen])]);
    }
}
