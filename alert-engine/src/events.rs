//! Active event set
//!
//! Tracks which events are true during the current tick, which of them are
//! static, and how many consecutive ticks each event has been active.
//!
//! Membership and counters are dense arrays indexed by event id, so lookups are
//! O(1) and iteration is always in ascending id order without any sorting.

use crate::catalog::EventCatalog;
use crate::diagnostics::{Diagnostic, DiagnosticLog};
use crate::event_name::EventName;
use crate::types::Category;
use crate::wire::WireEvent;
use std::sync::Arc;

/// Events asserted this tick plus the persistent static subset
#[derive(Debug, Clone)]
pub struct ActiveEventSet {
    catalog: Arc<EventCatalog>,
    active: [bool; EventName::COUNT],
    static_events: [bool; EventName::COUNT],
    counters: [u32; EventName::COUNT],
    diagnostics: DiagnosticLog,
}

impl ActiveEventSet {
    /// Create an empty set for one control session
    pub fn new(catalog: Arc<EventCatalog>) -> Self {
        Self {
            catalog,
            active: [false; EventName::COUNT],
            static_events: [false; EventName::COUNT],
            counters: [0; EventName::COUNT],
            diagnostics: DiagnosticLog::new(),
        }
    }

    pub fn catalog(&self) -> &Arc<EventCatalog> {
        &self.catalog
    }

    /// Assert an event for this tick
    ///
    /// Returns `false` if the catalog does not know the event, in which case
    /// nothing is inserted and an [`Diagnostic::UnknownEventId`] is recorded.
    /// Adding an event twice in one tick is a no-op.
    pub fn add(&mut self, event: EventName, is_static: bool) -> bool {
        if !self.catalog.is_known(event) {
            self.diagnostics.record(Diagnostic::UnknownEventId { raw: event.raw() });
            return false;
        }
        let i = event.index();
        self.active[i] = true;
        if is_static {
            self.static_events[i] = true;
        }
        log::trace!("add {} (static: {})", event, is_static);
        true
    }

    /// Assert an event by raw id, as received from upstream fault detection
    pub fn add_raw(&mut self, raw: u16, is_static: bool) -> bool {
        match EventName::from_raw(raw) {
            Some(event) => self.add(event, is_static),
            None => {
                self.diagnostics.record(Diagnostic::UnknownEventId { raw });
                false
            }
        }
    }

    /// Bulk non-static insertion of decoded ids
    pub fn add_from_wire<I>(&mut self, raw_ids: I)
    where
        I: IntoIterator<Item = u16>,
    {
        for raw in raw_ids {
            self.add_raw(raw, false);
        }
    }

    /// Stop persisting a static event
    ///
    /// The event stays active for the rest of this tick and disappears at the
    /// next [`clear`](Self::clear) unless re-asserted.
    pub fn drop_static(&mut self, event: EventName) {
        self.static_events[event.index()] = false;
    }

    /// Roll the set into the next tick
    ///
    /// Counters of events active this tick advance by one, every other
    /// counter resets to zero. Afterwards only the static events remain.
    /// Unknown ids asserted again next tick are not reported a second time.
    pub fn clear(&mut self) {
        for event in EventName::ALL {
            if !self.catalog.is_known(*event) {
                continue;
            }
            let i = event.index();
            self.counters[i] = if self.active[i] {
                self.counters[i].saturating_add(1)
            } else {
                0
            };
        }
        self.active = self.static_events;
        self.diagnostics.next_cycle();
    }

    /// Whether any active event participates in `category`
    pub fn contains(&self, category: Category) -> bool {
        self.iter().any(|e| self.catalog.membership(e, category))
    }

    pub fn contains_event(&self, event: EventName) -> bool {
        self.active[event.index()]
    }

    pub fn is_static(&self, event: EventName) -> bool {
        self.static_events[event.index()]
    }

    /// Active events in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = EventName> + '_ {
        EventName::ALL
            .iter()
            .copied()
            .filter(move |e| self.active[e.index()])
    }

    /// Names of the active events, ascending
    pub fn names(&self) -> Vec<EventName> {
        self.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.active.iter().filter(|a| **a).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.active.iter().any(|a| *a)
    }

    /// Consecutive ticks the event was active before this one
    pub fn counter(&self, event: EventName) -> u32 {
        self.counters[event.index()]
    }

    #[cfg(test)]
    pub(crate) fn set_counter(&mut self, event: EventName, value: u32) {
        self.counters[event.index()] = value;
    }

    /// One record per active event, with category flags from the catalog
    pub fn to_wire(&self) -> Vec<WireEvent> {
        self.iter()
            .map(|e| WireEvent::from_mask(e.raw(), self.catalog.mask(e)))
            .collect()
    }

    pub fn diagnostics(&self) -> &DiagnosticLog {
        &self.diagnostics
    }

    /// Drain diagnostics recorded since the last call
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        self.diagnostics.drain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts;
    use crate::catalog::AlertSpec;

    fn catalog() -> Arc<EventCatalog> {
        Arc::new(
            EventCatalog::builder()
                .event(EventName::StockFcw, Vec::<(Category, AlertSpec)>::new())
                .event(EventName::Ldw, [(Category::Permanent, alerts::normal_permanent("Lane Departure"))])
                .event(EventName::DoorOpen, [(Category::NoEntry, alerts::no_entry("Door Open"))])
                .event(EventName::CanError, [(Category::ImmediateDisable, alerts::immediate_disable("CAN Error"))])
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn test_add_keeps_ascending_order_without_duplicates() {
        let mut set = ActiveEventSet::new(catalog());
        set.add(EventName::CanError, false);
        set.add(EventName::StockFcw, false);
        set.add(EventName::DoorOpen, false);
        set.add(EventName::StockFcw, false);
        set.add(EventName::Ldw, false);

        assert_eq!(
            set.names(),
            vec![EventName::StockFcw, EventName::Ldw, EventName::DoorOpen, EventName::CanError]
        );
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn test_clear_keeps_static_and_advances_counters() {
        let mut set = ActiveEventSet::new(catalog());
        set.add(EventName::Ldw, true);
        set.add(EventName::DoorOpen, false);
        set.clear();

        assert_eq!(set.names(), vec![EventName::Ldw]);
        assert_eq!(set.counter(EventName::Ldw), 1);
        assert_eq!(set.counter(EventName::DoorOpen), 1);

        set.clear();
        assert_eq!(set.counter(EventName::Ldw), 2);
        assert_eq!(set.counter(EventName::DoorOpen), 0);
    }

    #[test]
    fn test_clear_empty_set() {
        let mut set = ActiveEventSet::new(catalog());
        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.counter(EventName::Ldw), 0);
    }

    #[test]
    fn test_drop_static() {
        let mut set = ActiveEventSet::new(catalog());
        set.add(EventName::Ldw, true);
        set.clear();
        set.drop_static(EventName::Ldw);
        assert!(set.contains_event(EventName::Ldw));
        set.clear();
        assert!(set.is_empty());
    }

    #[test]
    fn test_unknown_events_are_rejected() {
        let mut set = ActiveEventSet::new(catalog());
        assert!(!set.add(EventName::Fcw, false));
        assert!(!set.add_raw(9999, false));
        assert!(set.is_empty());

        let diagnostics = set.take_diagnostics();
        assert_eq!(
            diagnostics,
            vec![
                Diagnostic::UnknownEventId { raw: EventName::Fcw.raw() },
                Diagnostic::UnknownEventId { raw: 9999 },
            ]
        );
    }

    #[test]
    fn test_contains_category() {
        let mut set = ActiveEventSet::new(catalog());
        assert!(!set.contains(Category::NoEntry));
        set.add(EventName::DoorOpen, false);
        assert!(set.contains(Category::NoEntry));
        assert!(!set.contains(Category::ImmediateDisable));
    }

    #[test]
    fn test_add_from_wire_is_not_static() {
        let mut set = ActiveEventSet::new(catalog());
        set.add_from_wire([EventName::DoorOpen.raw(), EventName::Ldw.raw()]);
        assert_eq!(set.names(), vec![EventName::Ldw, EventName::DoorOpen]);
        set.clear();
        assert!(set.is_empty());
    }

    #[test]
    fn test_to_wire_flags() {
        let mut set = ActiveEventSet::new(catalog());
        set.add(EventName::DoorOpen, false);
        let records = set.to_wire();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].event_id, EventName::DoorOpen.raw());
        assert!(records[0].category_flags[&Category::NoEntry]);
        assert!(!records[0].category_flags[&Category::Warning]);
    }
}
