//! # Pill Mock Runtime
//!
//! Stand-in for a layout-automation scripting engine's procedure library.
//! Scripts reach the mock through a [`Session`]: an interpreter resolves
//! each bare procedure name against the session's [`ProcedureRegistry`]
//! and dispatches with positional and keyword [`Args`].
//!
//! Procedures either touch the cell store directly (`ddGetObj`,
//! `rodCreateRect`) or run a parametric cell generator
//! (`pcGenCell_rect_cell`, `pcGenCell_complex_cell`).

pub mod builtins;
pub mod format;
pub mod interp;
pub mod pcells;
pub mod registry;
pub mod session;
pub mod summary;
pub mod value;

pub use interp::{CallListInterpreter, Interpreter, ScriptError};
pub use pcells::{ComplexCellParams, RectCellParams};
pub use registry::{ProcedureDef, ProcedureRegistry, PROCEDURES};
pub use session::Session;
pub use value::{Args, CellHandle, Value};
