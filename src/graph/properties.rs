//! Property tables keyed by interned handles

use super::label::{Properties, PropertyValue};
use std::collections::HashMap;
use std::hash::Hash;

/// One identity's stored attributes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyRow {
    properties: Properties,
    weight: Option<f64>,
}

impl PropertyRow {
    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// The explicitly stored weight, if any. Absent means the table default.
    pub fn weight(&self) -> Option<f64> {
        self.weight
    }
}

/// Weight and property storage for one identity namespace.
///
/// Plain accessors fall back to the configured defaults and never fail:
/// an absent row is indistinguishable from an empty row at the default
/// weight. Upserts only overwrite the fields explicitly supplied.
#[derive(Debug, Clone)]
pub struct PropertyTable<K> {
    rows: HashMap<K, PropertyRow>,
    default_weight: f64,
    key_defaults: Properties,
}

impl<K: Eq + Hash + Clone> PropertyTable<K> {
    pub fn new(default_weight: f64) -> Self {
        Self {
            rows: HashMap::new(),
            default_weight,
            key_defaults: Properties::new(),
        }
    }

    pub fn default_weight(&self) -> f64 {
        self.default_weight
    }

    /// Stored weight, or the table default when none was ever set.
    pub fn weight(&self, key: &K) -> f64 {
        self.rows
            .get(key)
            .and_then(|row| row.weight)
            .unwrap_or(self.default_weight)
    }

    /// The explicitly stored weight only; `None` if the identity rides the default.
    pub fn stored_weight(&self, key: &K) -> Option<f64> {
        self.rows.get(key).and_then(|row| row.weight)
    }

    /// The identity's own property mapping; empty if none was ever set.
    pub fn properties(&self, key: &K) -> Properties {
        self.rows
            .get(key)
            .map(|row| row.properties.clone())
            .unwrap_or_default()
    }

    /// One property value: the identity's own, else the per-key default.
    pub fn get(&self, key: &K, name: &str) -> Option<&PropertyValue> {
        self.rows
            .get(key)
            .and_then(|row| row.properties.get(name))
            .or_else(|| self.key_defaults.get(name))
    }

    pub fn row(&self, key: &K) -> Option<&PropertyRow> {
        self.rows.get(key)
    }

    pub fn rows(&self) -> impl Iterator<Item = (&K, &PropertyRow)> {
        self.rows.iter()
    }

    /// Upsert. Supplied properties merge key-wise (later values win);
    /// a supplied weight replaces the stored one; omitted fields keep
    /// whatever was there.
    pub fn set(&mut self, key: K, properties: Option<Properties>, weight: Option<f64>) {
        let row = self.rows.entry(key).or_default();
        if let Some(properties) = properties {
            for (name, value) in properties {
                row.properties.insert(name, value);
            }
        }
        if let Some(weight) = weight {
            row.weight = Some(weight);
        }
    }

    pub fn set_weight(&mut self, key: K, weight: f64) {
        self.set(key, None, Some(weight));
    }

    pub fn insert_property(&mut self, key: K, name: impl Into<String>, value: PropertyValue) {
        self.rows
            .entry(key)
            .or_default()
            .properties
            .insert(name.into(), value);
    }

    /// Fallback value for a property key when an identity has none of its own.
    pub fn set_default(&mut self, name: impl Into<String>, value: PropertyValue) {
        self.key_defaults.insert(name.into(), value);
    }

    pub fn key_defaults(&self) -> &Properties {
        &self.key_defaults
    }

    pub fn remove(&mut self, key: &K) -> Option<PropertyRow> {
        self.rows.remove(key)
    }
}
