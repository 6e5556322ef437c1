//! Rename source-specific field keys to canonical names

use std::collections::HashMap;

use super::criteria::FieldMap;

/// Table of raw key → canonical key rename rules
#[derive(Debug, Clone, Default)]
pub struct FieldMapper {
    rules: HashMap<String, String>,
}

impl FieldMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a rename rule. Registering the same raw key again replaces
    /// its target.
    pub fn remap_key(&mut self, raw: impl Into<String>, canonical: impl Into<String>) -> &mut Self {
        self.rules.insert(raw.into(), canonical.into());
        self
    }

    /// Builder form of [`FieldMapper::remap_key`]
    #[must_use]
    pub fn with_rule(mut self, raw: &str, canonical: &str) -> Self {
        self.remap_key(raw, canonical);
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rename the keys of one field map; unmatched keys are kept as is
    pub fn remap_fields(&self, fields: &FieldMap) -> FieldMap {
        fields
            .iter()
            .map(|(key, value)| {
                let key = self.rules.get(key).unwrap_or(key);
                (key.clone(), value.clone())
            })
            .collect()
    }

    /// Apply every rule to each map, returning new maps
    pub fn remap(&self, items: &[FieldMap]) -> Vec<FieldMap> {
        items.iter().map(|fields| self.remap_fields(fields)).collect()
    }
}
