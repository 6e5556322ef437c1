//! Parser registration
//!
//! A unit is a named group of exported plugin types. Units whose name ends
//! in "parser" (case-insensitively, and not starting with `__`) are
//! recognized, and inside them every export whose type name follows the
//! same rule is registered: the first under the unit's name, the rest
//! under their type names.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use super::{ForecastParser, weather_com_parser};
use crate::domain::Unit;
use crate::infrastructure::{ForecastError, ForecastResult, PageFetcher};

static PARSER_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^.+parser$").expect("valid parser name regex"));

static REGISTRY: Lazy<ParserRegistry> = Lazy::new(|| ParserRegistry::discover(builtin_units()));

/// Builds a plugin instance around the fetcher that serves its pages
pub type ParserFactory = fn(Box<dyn PageFetcher>) -> Box<dyn ForecastParser>;

/// A constructible plugin type
#[derive(Debug, Clone, Copy)]
pub struct ParserDescriptor {
    pub type_name: &'static str,
    /// Page URL template with `{forecast}` and `{area}` placeholders
    pub base_url: &'static str,
    pub native_unit: Unit,
    pub build: ParserFactory,
}

impl ParserDescriptor {
    pub fn create(&self, fetcher: Box<dyn PageFetcher>) -> Box<dyn ForecastParser> {
        (self.build)(fetcher)
    }
}

/// A named group of exported types offered for registration
#[derive(Debug, Clone)]
pub struct ParserUnit {
    pub name: &'static str,
    pub exports: Vec<ParserDescriptor>,
}

impl ParserUnit {
    pub fn new(name: &'static str, exports: Vec<ParserDescriptor>) -> Self {
        Self { name, exports }
    }
}

pub fn is_parser_name(name: &str) -> bool {
    !name.starts_with("__") && PARSER_NAME.is_match(name)
}

/// Units compiled into this binary
pub fn builtin_units() -> Vec<ParserUnit> {
    vec![weather_com_parser::unit()]
}

/// The process-wide registry, populated on first use
pub fn parser_registry() -> &'static ParserRegistry {
    &REGISTRY
}

/// Read-only mapping of parser name to plugin type
#[derive(Debug, Clone, Default)]
pub struct ParserRegistry {
    parsers: BTreeMap<String, ParserDescriptor>,
}

fn register(parsers: &mut BTreeMap<String, ParserDescriptor>, name: &str, descriptor: ParserDescriptor) {
    debug!("Registered parser '{}' ({})", name, descriptor.type_name);
    if parsers.insert(name.to_string(), descriptor).is_some() {
        warn!("Parser '{}' registered twice; keeping the later one", name);
    }
}

impl ParserRegistry {
    pub fn discover(units: impl IntoIterator<Item = ParserUnit>) -> Self {
        let mut parsers = BTreeMap::new();

        for unit in units {
            if !is_parser_name(unit.name) {
                debug!("Skipping unit '{}'", unit.name);
                continue;
            }

            let mut exports = unit
                .exports
                .into_iter()
                .filter(|export| is_parser_name(export.type_name));

            let Some(descriptor) = exports.next() else {
                debug!("Unit '{}' exports no parser types", unit.name);
                continue;
            };

            register(&mut parsers, unit.name, descriptor);
            // further exports are reachable by their own type name
            for extra in exports {
                register(&mut parsers, extra.type_name, extra);
            }
        }

        Self { parsers }
    }

    /// Look a parser up by unit name or exported type name, ignoring case
    pub fn get(&self, name: &str) -> ForecastResult<&ParserDescriptor> {
        let wanted = name.trim();

        self.parsers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(wanted))
            .or_else(|| {
                self.parsers
                    .iter()
                    .find(|(_, descriptor)| descriptor.type_name.eq_ignore_ascii_case(wanted))
            })
            .map(|(_, descriptor)| descriptor)
            .ok_or_else(|| {
                ForecastError::configuration(format!(
                    "unknown parser '{}' (available: {})",
                    wanted,
                    self.names().collect::<Vec<_>>().join(", ")
                ))
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_ok()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.parsers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }
}
