use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A named drawing layer and its GDS (number, datatype) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerEntry {
    pub name: String,
    pub number: i32,
    pub datatype: i32,
}

impl LayerEntry {
    pub fn new(name: &str, number: i32, datatype: i32) -> Self {
        Self {
            name: name.to_string(),
            number,
            datatype,
        }
    }
}

/// The technology's layer directory, keyed by layer name.
///
/// Built once at startup and read-only afterwards. Iteration follows the
/// order layers were first defined.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayerMap {
    layers: IndexMap<String, LayerEntry>,
}

impl LayerMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a layer. A later entry with the same name replaces the earlier
    /// one, which is returned.
    pub fn insert(&mut self, entry: LayerEntry) -> Option<LayerEntry> {
        let previous = self.layers.insert(entry.name.clone(), entry);
        if let Some(prev) = &previous {
            log::debug!("Layer {} redefined, replacing {} {}", prev.name, prev.number, prev.datatype);
        }
        previous
    }

    pub fn get(&self, name: &str) -> Option<&LayerEntry> {
        self.layers.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.layers.contains_key(name)
    }

    pub fn by_gds(&self, number: i32, datatype: i32) -> Option<&LayerEntry> {
        self.layers
            .values()
            .find(|l| l.number == number && l.datatype == datatype)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LayerEntry> {
        self.layers.values()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl FromIterator<LayerEntry> for LayerMap {
    fn from_iter<I: IntoIterator<Item = LayerEntry>>(iter: I) -> Self {
        let mut map = LayerMap::new();
        for entry in iter {
            map.insert(entry);
        }
        map
    }
}
