use std::io::{self, Write};

use pillmock_core::{Cell, CellStore, KeyScope, LayerMap, MockError, Shape, format_float};

use crate::registry::{ProcedureRegistry, PROCEDURES};
use crate::value::{Args, Value};

/// State of one mock scripting session: the layer directory, the cell
/// store and the procedure table, plus the sink `printf` writes to.
///
/// Every procedure receives the session by reference; nothing is global.
pub struct Session {
    /// Library that generated cells are tagged with.
    pub library: String,
    pub layers: LayerMap,
    pub cells: CellStore,
    registry: ProcedureRegistry,
    strict_layers: bool,
    output: Box<dyn Write>,
}

impl Session {
    pub fn new(library: &str, layers: LayerMap) -> Self {
        let mut session = Self {
            library: library.to_string(),
            layers,
            cells: CellStore::new(KeyScope::default()),
            registry: ProcedureRegistry::default(),
            strict_layers: false,
            output: Box::new(io::stdout()),
        };
        session.register_procedures();
        session
    }

    /// Replace the cell store with an empty one keyed by `scope`.
    pub fn with_key_scope(mut self, scope: KeyScope) -> Self {
        self.cells = CellStore::new(scope);
        self
    }

    pub fn with_strict_layers(mut self, strict: bool) -> Self {
        self.strict_layers = strict;
        self
    }

    pub fn with_output(mut self, output: Box<dyn Write>) -> Self {
        self.output = output;
        self
    }

    // ── Procedure table ──────────────────────────────────────────────

    /// Rebuild the procedure table from scratch.
    pub fn register_procedures(&mut self) {
        self.registry = ProcedureRegistry::register(PROCEDURES);
    }

    pub fn registry(&self) -> &ProcedureRegistry {
        &self.registry
    }

    /// Dispatch a call by procedure name.
    pub fn call(&mut self, name: &str, args: &Args) -> Result<Value, MockError> {
        let handler = self
            .registry
            .lookup(name)
            .map(|def| def.handler)
            .ok_or_else(|| MockError::UnknownProcedure(name.to_string()))?;
        log::trace!("Calling {} with {:?}", name, args);
        handler(self, args)
    }

    // ── Layout operations ────────────────────────────────────────────

    /// Get or create a cell view.
    pub fn get_or_create(&mut self, library: &str, name: &str) -> &mut Cell {
        log::info!("Getting cell: {}/{}", library, name);
        self.cells.get_or_create(library, name)
    }

    /// Create a rectangle. The shape is not attached to any cell.
    pub fn create_rectangle(&self, layer: &str, width: f64, length: f64) -> Result<Shape, MockError> {
        log::info!(
            "Creating rectangle: layer={}, width={}, length={}",
            layer,
            format_float(width),
            format_float(length)
        );
        if !self.layers.contains(layer) {
            if self.strict_layers {
                return Err(MockError::UnknownLayer(layer.to_string()));
            }
            log::warn!("Layer {} is not in the layer map", layer);
        }
        Ok(Shape::rectangle(layer, width, length))
    }

    /// Store a generated cell, replacing any earlier cell under its key,
    /// and return the stored cell.
    pub fn store_generated(&mut self, cell: Cell) -> Result<&mut Cell, MockError> {
        let (library, name) = (cell.library.clone(), cell.name.clone());
        self.cells.insert(cell);
        self.cells.get_in_mut(&library, &name)
    }

    /// Write printf output.
    pub fn print(&mut self, text: &str) -> Result<(), MockError> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }
}
