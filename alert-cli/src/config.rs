//! Scenario file loading and validation
//!
//! A scenario is a TOML file describing a control session tick by tick:
//!
//! ```toml
//! name = "door opens while engaged"
//!
//! [engine]
//! tick_duration_secs = 0.01
//!
//! [[tick]]
//! repeat = 50
//! events = ["doorOpen"]
//! static_events = ["dashcamMode"]
//! categories = ["softDisable", "noEntry"]
//! soft_disable_ticks = 200
//!
//! [tick.context]
//! "deviceState.cpuTempC" = 71.5
//! ```

use alert_engine::{AlertContext, Category, EngineConfig, EventName, SignalValue};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Scenario file as written on disk
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScenarioFile {
    pub name: Option<String>,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default, rename = "tick")]
    pub ticks: Vec<TickSpec>,
}

/// One block of identical ticks
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TickSpec {
    /// How many consecutive ticks this block runs (default: 1)
    #[serde(default = "default_repeat")]
    pub repeat: u32,
    /// Events asserted every tick of the block
    #[serde(default)]
    pub events: Vec<String>,
    /// Events asserted as static
    #[serde(default)]
    pub static_events: Vec<String>,
    /// Raw ids asserted as-is, including ids the catalog does not know
    #[serde(default)]
    pub raw_events: Vec<u16>,
    /// Categories to resolve (default: all)
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub soft_disable_ticks: u32,
    #[serde(default)]
    pub context: BTreeMap<String, SignalValue>,
}

fn default_repeat() -> u32 {
    1
}

/// Problems in an otherwise well-formed scenario file
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error("Scenario has no ticks")]
    Empty,

    #[error("Tick block {block}: unknown event {name:?}")]
    UnknownEvent { block: usize, name: String },

    #[error("Tick block {block}: unknown category {name:?}")]
    UnknownCategory { block: usize, name: String },

    #[error("Tick block {block}: repeat must be at least 1")]
    ZeroRepeat { block: usize },

    #[error(transparent)]
    Engine(#[from] alert_engine::EngineError),
}

/// Validated scenario, ready to replay
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: String,
    pub engine: EngineConfig,
    pub blocks: Vec<TickBlock>,
}

#[derive(Debug, Clone)]
pub struct TickBlock {
    pub repeat: u32,
    /// `(raw id, is_static)` pairs
    pub assertions: Vec<(u16, bool)>,
    pub categories: Vec<Category>,
    pub context: AlertContext,
}

impl Scenario {
    /// Total number of ticks
    pub fn tick_count(&self) -> u64 {
        self.blocks.iter().map(|b| u64::from(b.repeat)).sum()
    }
}

impl ScenarioFile {
    /// Resolve names and check the scenario can run
    pub fn validate(self, default_name: &str) -> std::result::Result<Scenario, ScenarioError> {
        self.engine.validate()?;
        if self.ticks.is_empty() {
            return Err(ScenarioError::Empty);
        }

        let mut blocks = Vec::with_capacity(self.ticks.len());
        for (block, spec) in self.ticks.into_iter().enumerate() {
            if spec.repeat == 0 {
                return Err(ScenarioError::ZeroRepeat { block });
            }

            let parse_event = |name: &String| {
                EventName::from_name(name).ok_or_else(|| ScenarioError::UnknownEvent {
                    block,
                    name: name.clone(),
                })
            };

            let mut assertions = Vec::new();
            for name in &spec.events {
                assertions.push((parse_event(name)?.raw(), false));
            }
            for name in &spec.static_events {
                assertions.push((parse_event(name)?.raw(), true));
            }
            assertions.extend(spec.raw_events.iter().map(|raw| (*raw, false)));

            let categories = if spec.categories.is_empty() {
                Category::ALL.to_vec()
            } else {
                spec.categories
                    .iter()
                    .map(|name| {
                        name.parse::<Category>()
                            .map_err(|_| ScenarioError::UnknownCategory {
                                block,
                                name: name.clone(),
                            })
                    })
                    .collect::<std::result::Result<Vec<_>, _>>()?
            };

            let context = AlertContext {
                channels: spec.context,
                soft_disable_ticks: spec.soft_disable_ticks,
            };

            blocks.push(TickBlock {
                repeat: spec.repeat,
                assertions,
                categories,
                context,
            });
        }

        Ok(Scenario {
            name: self.name.unwrap_or_else(|| default_name.to_string()),
            engine: self.engine,
            blocks,
        })
    }
}

/// Parse scenario text
pub fn parse_scenario(content: &str, default_name: &str) -> Result<Scenario> {
    let file: ScenarioFile = toml::from_str(content).context("Failed to parse scenario")?;
    let scenario = file.validate(default_name)?;
    Ok(scenario)
}

/// Load a scenario from a TOML file
pub fn load_scenario(path: &Path) -> Result<Scenario> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read scenario file: {:?}", path))?;

    let default_name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "scenario".to_string());

    parse_scenario(&content, &default_name)
        .with_context(|| format!("Invalid scenario file: {:?}", path))
}
