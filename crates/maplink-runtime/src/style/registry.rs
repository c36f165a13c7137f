//! Registered entity table.
//!
//! Identifiers and metadata only. The table never owns the caller's data
//! or the peer's objects.

use maplink_types::{LayerId, SourceId};
use serde_json::Value;
use std::collections::HashMap;

/// Metadata kept for a registered source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    pub id: SourceId,
    /// The engine's source `type` (`geojson`, `vector`, ...), when given.
    pub kind: Option<String>,
}

/// Metadata kept for a registered layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerEntry {
    pub id: LayerId,
    /// Source the layer draws from; `None` for sourceless layers.
    pub source: Option<SourceId>,
    /// The engine's layer `type` (`circle`, `background`, ...), when given.
    pub kind: Option<String>,
}

/// Extracts the `type` field of a definition.
pub(crate) fn kind_of(definition: &Value) -> Option<String> {
    definition
        .get("type")
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Sources and layers known to be on (or headed to) the peer.
#[derive(Debug, Default)]
pub struct EntityTable {
    sources: HashMap<SourceId, SourceEntry>,
    layers: HashMap<LayerId, LayerEntry>,
}

impl EntityTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains_source(&self, id: &SourceId) -> bool {
        self.sources.contains_key(id)
    }

    #[must_use]
    pub fn contains_layer(&self, id: &LayerId) -> bool {
        self.layers.contains_key(id)
    }

    #[must_use]
    pub fn source(&self, id: &SourceId) -> Option<&SourceEntry> {
        self.sources.get(id)
    }

    #[must_use]
    pub fn layer(&self, id: &LayerId) -> Option<&LayerEntry> {
        self.layers.get(id)
    }

    pub(crate) fn insert_source(&mut self, entry: SourceEntry) {
        self.sources.insert(entry.id.clone(), entry);
    }

    pub(crate) fn insert_layer(&mut self, entry: LayerEntry) {
        self.layers.insert(entry.id.clone(), entry);
    }

    pub(crate) fn remove_source(&mut self, id: &SourceId) -> Option<SourceEntry> {
        self.sources.remove(id)
    }

    pub(crate) fn remove_layer(&mut self, id: &LayerId) -> Option<LayerEntry> {
        self.layers.remove(id)
    }

    /// Registered layers drawing from `source`, sorted by id.
    #[must_use]
    pub fn layers_using(&self, source: &SourceId) -> Vec<LayerId> {
        let mut ids: Vec<LayerId> = self
            .layers
            .values()
            .filter(|l| l.source.as_ref() == Some(source))
            .map(|l| l.id.clone())
            .collect();
        ids.sort();
        ids
    }

    /// Registered source ids, sorted.
    #[must_use]
    pub fn source_ids(&self) -> Vec<SourceId> {
        let mut ids: Vec<SourceId> = self.sources.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Registered layer ids, sorted.
    #[must_use]
    pub fn layer_ids(&self) -> Vec<LayerId> {
        let mut ids: Vec<LayerId> = self.layers.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub(crate) fn clear(&mut self) {
        self.sources.clear();
        self.layers.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty() && self.layers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn layers_using_filters_by_source() {
        let eq: SourceId = "eq".parse().expect("valid");
        let mut table = EntityTable::new();
        table.insert_source(SourceEntry {
            id: eq.clone(),
            kind: Some("geojson".into()),
        });
        for (id, source) in [("heat", Some(eq.clone())), ("bg", None), ("circles", Some(eq.clone()))] {
            table.insert_layer(LayerEntry {
                id: id.parse().expect("valid"),
                source,
                kind: None,
            });
        }

        let using: Vec<String> = table.layers_using(&eq).into_iter().map(String::from).collect();
        assert_eq!(using, vec!["circles", "heat"]);
        assert_eq!(table.layer_ids().len(), 3);
    }

    #[test]
    fn kind_of_reads_type_field() {
        assert_eq!(kind_of(&json!({"type": "circle"})).as_deref(), Some("circle"));
        assert_eq!(kind_of(&json!({"paint": {}})), None);
        assert_eq!(kind_of(&json!("mapbox://x")), None);
    }

    #[test]
    fn clear_empties_both_maps() {
        let mut table = EntityTable::new();
        table.insert_source(SourceEntry {
            id: "s".parse().expect("valid"),
            kind: None,
        });
        assert!(!table.is_empty());
        table.clear();
        assert!(table.is_empty());
    }
}
