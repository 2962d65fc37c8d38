//! Name → procedure dispatch table consulted by script interpreters.

use std::fmt;

use indexmap::IndexMap;
use pillmock_core::MockError;

use crate::builtins;
use crate::pcells;
use crate::session::Session;
use crate::value::{Args, Value};

/// Signature shared by every procedure a script can call. Argument
/// checking is the procedure's own job.
pub type ProcedureHandler = fn(&mut Session, &Args) -> Result<Value, MockError>;

/// A named procedure exposed to scripts.
#[derive(Clone, Copy)]
pub struct ProcedureDef {
    pub name: &'static str,
    pub description: &'static str,
    pub handler: ProcedureHandler,
}

impl fmt::Debug for ProcedureDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcedureDef")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Every procedure of the mock library.
pub static PROCEDURES: &[ProcedureDef] = &[
    ProcedureDef {
        name: "ddGetObj",
        description: "Get or create a cell view",
        handler: builtins::dd_get_obj,
    },
    ProcedureDef {
        name: "rodCreateRect",
        description: "Create a rectangle with the given layer and dimensions",
        handler: builtins::rod_create_rect,
    },
    ProcedureDef {
        name: "pcGenCell_rect_cell",
        description: "Generate a rectangle cell with the given parameters",
        handler: pcells::gen_rect_cell,
    },
    ProcedureDef {
        name: "pcGenCell_complex_cell",
        description: "Generate a complex cell with multiple shapes",
        handler: pcells::gen_complex_cell,
    },
    ProcedureDef {
        name: "printf",
        description: "Print a formatted message",
        handler: builtins::printf,
    },
    ProcedureDef {
        name: "sprintf",
        description: "Format a message into a string",
        handler: builtins::sprintf,
    },
    ProcedureDef {
        name: "list",
        description: "Build a list from the arguments",
        handler: builtins::list,
    },
    ProcedureDef {
        name: "debug_print",
        description: "Log a debug message",
        handler: builtins::debug_print,
    },
];

/// Lookup table built from a list of procedure definitions.
#[derive(Debug, Default, Clone)]
pub struct ProcedureRegistry {
    procedures: IndexMap<&'static str, ProcedureDef>,
}

impl ProcedureRegistry {
    /// Build a table from `defs`. Later definitions replace earlier ones
    /// with the same name.
    pub fn register(defs: &[ProcedureDef]) -> Self {
        let mut procedures = IndexMap::with_capacity(defs.len());
        for def in defs {
            if procedures.insert(def.name, *def).is_some() {
                log::warn!("Procedure {} registered twice", def.name);
            }
        }
        log::debug!("Registered {} procedures", procedures.len());
        Self { procedures }
    }

    pub fn lookup(&self, name: &str) -> Option<&ProcedureDef> {
        self.procedures.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.procedures.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.procedures.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.procedures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.procedures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nil_proc(_: &mut Session, _: &Args) -> Result<Value, MockError> {
        Ok(Value::Nil)
    }

    fn true_proc(_: &mut Session, _: &Args) -> Result<Value, MockError> {
        Ok(Value::True)
    }

    #[test]
    fn test_all_procedures_registered() {
        let registry = ProcedureRegistry::register(PROCEDURES);
        assert_eq!(registry.len(), PROCEDURES.len());
        for name in [
            "ddGetObj",
            "rodCreateRect",
            "pcGenCell_rect_cell",
            "pcGenCell_complex_cell",
            "printf",
            "sprintf",
            "list",
            "debug_print",
        ] {
            assert!(registry.contains(name), "missing {name}");
        }
        assert!(registry.lookup("dbCreateRect").is_none());
    }

    #[test]
    fn test_later_definition_replaces_earlier() {
        let defs = [
            ProcedureDef {
                name: "probe",
                description: "first",
                handler: nil_proc,
            },
            ProcedureDef {
                name: "probe",
                description: "second",
                handler: true_proc,
            },
        ];
        let registry = ProcedureRegistry::register(&defs);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.lookup("probe").unwrap().description, "second");
    }
}
