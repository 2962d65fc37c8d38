//! # Pill Mock Core
//!
//! In-memory layout model behind the Pill mock procedure library: named
//! layers, placeholder rectangles, cells carrying CDF parameters, and the
//! cell store that owns every cell for the lifetime of a session.
//!
//! Nothing here talks to a real circuit database. Bounding boxes are
//! placeholders anchored at the origin.

pub mod error;
pub mod geometry;
pub mod layer;
pub mod cell;
pub mod store;

pub use error::MockError;
pub use geometry::{format_float, BBox, Point, Shape, ShapeKind};
pub use layer::{LayerEntry, LayerMap};
pub use cell::{CdfParameter, CdfType, CdfValue, Cell, CellId};
pub use store::{CellStore, KeyScope};
