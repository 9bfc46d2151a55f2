//! Alert Engine Library
//!
//! Event/alert arbitration for a fixed-period vehicle control loop. Upstream
//! fault detection asserts events every tick; the engine turns them into
//! prioritized, user-facing alerts and boolean category signals for the
//! control state machine.
//!
//! # Architecture
//!
//! - [`EventCatalog`]: immutable event → category → alert registry, built once
//! - [`ActiveEventSet`]: events true this tick, static events, activation counters
//! - [`AlertResolver`]: materializes alerts, applying creation-delay gating
//! - [`AlertArbiter`]: picks one governing alert per category
//! - [`WireCodec`]: encodes the active set for logging and transport
//! - [`AlertEngine`]: runs the whole cycle for one session
//!
//! The library does NOT:
//! - Detect faults
//! - Render alerts
//! - Drive the engagement state machine
//! - Persist anything across sessions
//!
//! # Example Usage
//!
//! ```
//! use alert_engine::{catalog, ActiveEventSet, AlertArbiter, AlertContext, AlertResolver};
//! use alert_engine::{Category, EngineConfig, EventName};
//! use std::sync::Arc;
//!
//! let catalog = Arc::new(catalog::standard().unwrap());
//! let config = EngineConfig::default();
//! let mut set = ActiveEventSet::new(catalog.clone());
//! let mut resolver = AlertResolver::new(catalog, &config);
//!
//! // One tick
//! set.add(EventName::DoorOpen, false);
//! let ctx = AlertContext::new().with_soft_disable_ticks(200);
//! let alerts = resolver.resolve(&set, &[Category::NoEntry], &ctx);
//! let governing = AlertArbiter::new().pick_highest(&alerts);
//! assert_eq!(governing.unwrap().alert_type, "doorOpen/noEntry");
//! assert!(set.contains(Category::SoftDisable));
//! set.clear();
//! ```

// Public modules
pub mod alerts;
pub mod arbiter;
pub mod catalog;
pub mod config;
pub mod context;
pub mod diagnostics;
pub mod engine;
pub mod event_name;
pub mod events;
pub mod resolver;
pub mod types;
pub mod wire;

// Re-export main types for convenience
pub use arbiter::AlertArbiter;
pub use catalog::{AlertSpec, CatalogBuilder, CategoryMap, EventCatalog};
pub use config::EngineConfig;
pub use context::{AlertContext, ContextView, SignalValue};
pub use diagnostics::{Diagnostic, DiagnosticLog};
pub use engine::{AlertEngine, TickOutput};
pub use event_name::EventName;
pub use events::ActiveEventSet;
pub use resolver::AlertResolver;
pub use types::{
    Alert, AlertOrigin, AlertSize, AlertStatus, AudibleAlert, CatalogError, Category,
    EngineError, Priority, ResolveError, Result, Timestamp, VisualAlert, WireError,
};
pub use wire::{decode_frame, encode_frame, WireCodec, WireEvent, WireMessage};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
