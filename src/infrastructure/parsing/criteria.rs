//! Declarative field selection
//!
//! An [`ExtractionCriteria`] maps a field key to the tag and class that
//! identify the element holding its text.

use std::collections::BTreeMap;
use std::fmt;

/// Extracted text keyed by field name
pub type FieldMap = BTreeMap<String, String>;

/// Tag name plus one class token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSelector {
    pub tag: String,
    pub class: String,
}

impl FieldSelector {
    pub fn new(tag: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            class: class.into(),
        }
    }
}

impl fmt::Display for FieldSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.tag, self.class)
    }
}

/// Field key → selector, in insertion order with unique keys
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionCriteria {
    fields: Vec<(String, FieldSelector)>,
}

impl ExtractionCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field; an existing key gets the new selector
    pub fn field(mut self, key: impl Into<String>, tag: &str, class: &str) -> Self {
        let key = key.into();
        let selector = FieldSelector::new(tag, class);
        match self.fields.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, current)) => *current = selector,
            None => self.fields.push((key, selector)),
        }
        self
    }

    /// Add a field keyed by its own class name
    pub fn class_field(self, tag: &str, class: &str) -> Self {
        self.field(class, tag, class)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldSelector)> {
        self.fields.iter().map(|(key, selector)| (key.as_str(), selector))
    }

    pub fn get(&self, key: &str) -> Option<&FieldSelector> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, selector)| selector)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
