use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::cell::{Cell, CellId};
use crate::error::MockError;

/// Which parts of a (library, cell) pair identify a stored cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyScope {
    /// Cells are keyed by name alone; the same name in two libraries
    /// refers to one cell.
    #[default]
    Name,
    /// Cells are keyed by library and name.
    LibraryAndName,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CellKey {
    library: Option<String>,
    name: String,
}

/// Owns every cell created during a session.
///
/// Iteration follows insertion order. Replacing a cell under an existing
/// key keeps that key's position.
#[derive(Debug, Default)]
pub struct CellStore {
    scope: KeyScope,
    cells: IndexMap<CellKey, Cell>,
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    scope: KeyScope,
    cells: Vec<&'a Cell>,
}

#[derive(Deserialize)]
struct Snapshot {
    scope: KeyScope,
    cells: Vec<Cell>,
}

impl CellStore {
    pub fn new(scope: KeyScope) -> Self {
        Self {
            scope,
            cells: IndexMap::new(),
        }
    }

    pub fn scope(&self) -> KeyScope {
        self.scope
    }

    fn key(&self, library: &str, name: &str) -> CellKey {
        let library = match self.scope {
            KeyScope::Name => None,
            KeyScope::LibraryAndName => Some(library.to_string()),
        };
        CellKey {
            library,
            name: name.to_string(),
        }
    }

    // ── Lookup / creation ────────────────────────────────────────────

    /// Return the stored cell for `(library, name)`, creating an empty one
    /// if none exists. Under [`KeyScope::Name`] an existing cell is
    /// returned even when it was created for another library.
    pub fn get_or_create(&mut self, library: &str, name: &str) -> &mut Cell {
        let key = self.key(library, name);
        self.cells.entry(key).or_insert_with(|| {
            log::debug!("Creating cell {}/{}", library, name);
            Cell::new(library, name)
        })
    }

    /// Store `cell`, replacing any cell under the same key. The replaced
    /// cell is returned.
    pub fn insert(&mut self, cell: Cell) -> Option<Cell> {
        let key = self.key(&cell.library, &cell.name);
        let previous = self.cells.insert(key, cell);
        if let Some(prev) = &previous {
            log::debug!("Replacing cell {}/{}", prev.library, prev.name);
        }
        previous
    }

    /// Strict lookup by cell name. Under [`KeyScope::LibraryAndName`] the
    /// first cell with that name, in store order, is returned.
    pub fn get(&self, name: &str) -> Result<&Cell, MockError> {
        let found = match self.scope {
            KeyScope::Name => self.cells.get(&self.key("", name)),
            KeyScope::LibraryAndName => self.cells.values().find(|c| c.name == name),
        };
        found.ok_or_else(|| MockError::CellNotFound(name.to_string()))
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut Cell, MockError> {
        let found = match self.scope {
            KeyScope::Name => {
                let key = self.key("", name);
                self.cells.get_mut(&key)
            }
            KeyScope::LibraryAndName => self.cells.values_mut().find(|c| c.name == name),
        };
        found.ok_or_else(|| MockError::CellNotFound(name.to_string()))
    }

    /// Strict lookup by library and name, honouring the key scope.
    pub fn get_in(&self, library: &str, name: &str) -> Result<&Cell, MockError> {
        self.cells
            .get(&self.key(library, name))
            .ok_or_else(|| MockError::CellNotFound(format!("{library}/{name}")))
    }

    pub fn get_in_mut(&mut self, library: &str, name: &str) -> Result<&mut Cell, MockError> {
        let key = self.key(library, name);
        self.cells
            .get_mut(&key)
            .ok_or_else(|| MockError::CellNotFound(format!("{library}/{name}")))
    }

    pub fn get_by_id(&self, id: &CellId) -> Option<&Cell> {
        self.cells.values().find(|c| c.id == *id)
    }

    pub fn get_by_id_mut(&mut self, id: &CellId) -> Option<&mut Cell> {
        self.cells.values_mut().find(|c| c.id == *id)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_ok()
    }

    pub fn cell_names(&self) -> Vec<&str> {
        self.cells.values().map(|c| c.name.as_str()).collect()
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.values()
    }

    // ── Serialization ────────────────────────────────────────────────

    pub fn to_json(&self) -> Result<String, MockError> {
        let snapshot = SnapshotRef {
            scope: self.scope,
            cells: self.cells.values().collect(),
        };
        Ok(serde_json::to_string_pretty(&snapshot)?)
    }

    pub fn from_json(json: &str) -> Result<Self, MockError> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        let mut store = CellStore::new(snapshot.scope);
        for cell in snapshot.cells {
            store.insert(cell);
        }
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Shape;

    #[test]
    fn test_get_or_create_returns_same_cell() {
        let mut store = CellStore::default();
        let first = store.get_or_create("mytech", "x").id;
        let second = store.get_or_create("mytech", "x").id;
        assert_eq!(first, second);
        assert_eq!(store.cell_count(), 1);
    }

    #[test]
    fn test_name_scope_collides_across_libraries() {
        let mut store = CellStore::new(KeyScope::Name);
        let a = store.get_or_create("liba", "inv").id;
        let b = store.get_or_create("libb", "inv");
        assert_eq!(b.id, a);
        assert_eq!(b.library, "liba");
        assert_eq!(store.cell_count(), 1);
    }

    #[test]
    fn test_library_scope_separates_libraries() {
        let mut store = CellStore::new(KeyScope::LibraryAndName);
        let a = store.get_or_create("liba", "inv").id;
        let b = store.get_or_create("libb", "inv").id;
        assert_ne!(a, b);
        assert_eq!(store.cell_count(), 2);
        assert_eq!(store.get_in("libb", "inv").unwrap().id, b);
        assert_eq!(store.get("inv").unwrap().id, a);
        assert!(store.get_in("libc", "inv").is_err());
    }

    #[test]
    fn test_get_missing_cell() {
        let store = CellStore::default();
        match store.get("nope") {
            Err(MockError::CellNotFound(name)) => assert_eq!(name, "nope"),
            other => panic!("expected CellNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_mutation_through_get_mut() {
        let mut store = CellStore::default();
        store
            .get_or_create("mytech", "c")
            .add_shape(Shape::rectangle("diff", 1.0, 1.0));
        store.get_mut("c").unwrap().set_cdf("w", 1.0);
        let cell = store.get("c").unwrap();
        assert_eq!(cell.shape_count(), 1);
        assert_eq!(cell.param_count(), 1);
    }

    #[test]
    fn test_insert_replaces_and_keeps_position() {
        let mut store = CellStore::default();
        store.get_or_create("mytech", "a");
        store.get_or_create("mytech", "b");
        let replaced = store.insert(Cell::new("mytech", "a"));
        assert!(replaced.is_some());
        assert_eq!(store.cell_names(), ["a", "b"]);
        assert_eq!(store.get("a").unwrap().shape_count(), 0);
    }

    #[test]
    fn test_json_snapshot() {
        let mut store = CellStore::new(KeyScope::LibraryAndName);
        let id = store.get_or_create("mytech", "c").id;
        store.get_mut("c").unwrap().set_cdf("layer", "diff");
        let json = store.to_json().unwrap();
        let restored = CellStore::from_json(&json).unwrap();
        assert_eq!(restored.scope(), KeyScope::LibraryAndName);
        assert_eq!(restored.get_in("mytech", "c").unwrap().id, id);
        assert!(restored.get_by_id(&id).is_some());
    }
}
