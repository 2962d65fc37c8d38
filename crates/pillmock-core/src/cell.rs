use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::{format_float, BBox, Shape};

/// Unique cell identifier. Two lookups that return the same stored cell
/// observe the same id.
pub type CellId = Uuid;

/// Semantic type tag of a CDF parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CdfType {
    Float,
    String,
}

impl fmt::Display for CdfType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CdfType::Float => "float",
            CdfType::String => "string",
        };
        f.write_str(name)
    }
}

/// A typed CDF parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CdfValue {
    Float(f64),
    String(String),
}

impl CdfValue {
    pub fn kind(&self) -> CdfType {
        match self {
            CdfValue::Float(_) => CdfType::Float,
            CdfValue::String(_) => CdfType::String,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CdfValue::Float(v) => Some(*v),
            CdfValue::String(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CdfValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for CdfValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CdfValue::Float(v) => f.write_str(&format_float(*v)),
            CdfValue::String(s) => f.write_str(s),
        }
    }
}

impl From<f64> for CdfValue {
    fn from(v: f64) -> Self {
        CdfValue::Float(v)
    }
}

impl From<&str> for CdfValue {
    fn from(v: &str) -> Self {
        CdfValue::String(v.to_string())
    }
}

/// A named, typed parameter attached to a cell. The value may be
/// overwritten in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CdfParameter {
    pub name: String,
    pub value: CdfValue,
}

impl CdfParameter {
    pub fn new(name: &str, value: impl Into<CdfValue>) -> Self {
        Self {
            name: name.to_string(),
            value: value.into(),
        }
    }

    pub fn kind(&self) -> CdfType {
        self.value.kind()
    }
}

/// A layout cell holding CDF parameters and an ordered list of shapes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cell {
    pub id: CellId,
    pub name: String,
    pub library: String,
    /// Parameters in insertion order.
    pub cdf_params: IndexMap<String, CdfParameter>,
    /// Shapes in the order they were appended.
    pub shapes: Vec<Shape>,
}

impl Cell {
    pub fn new(library: &str, name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            library: library.to_string(),
            cdf_params: IndexMap::new(),
            shapes: Vec::new(),
        }
    }

    pub fn add_shape(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Insert or overwrite a CDF parameter. Overwriting keeps the
    /// parameter's original position.
    pub fn set_cdf(&mut self, name: &str, value: impl Into<CdfValue>) {
        let value = value.into();
        match self.cdf_params.get_mut(name) {
            Some(param) => param.value = value,
            None => {
                self.cdf_params
                    .insert(name.to_string(), CdfParameter::new(name, value));
            }
        }
    }

    pub fn cdf(&self, name: &str) -> Option<&CdfParameter> {
        self.cdf_params.get(name)
    }

    pub fn cdf_mut(&mut self, name: &str) -> Option<&mut CdfParameter> {
        self.cdf_params.get_mut(name)
    }

    /// Union of the placeholder boxes of every shape in this cell.
    pub fn local_bbox(&self) -> Option<BBox> {
        let mut boxes = self.shapes.iter().map(|s| s.bbox);
        let first = boxes.next()?;
        Some(boxes.fold(first, |acc, bb| acc.union(&bb)))
    }

    pub fn shapes_on_layer<'a>(&'a self, layer: &'a str) -> impl Iterator<Item = &'a Shape> + 'a {
        self.shapes.iter().filter(move |s| s.layer == layer)
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    pub fn param_count(&self) -> usize {
        self.cdf_params.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_order_preserved() {
        let mut cell = Cell::new("mytech", "c");
        let a = Shape::rectangle("diff", 1.0, 2.0);
        let b = Shape::rectangle("poly", 3.0, 4.0);
        cell.add_shape(a.clone());
        cell.add_shape(b.clone());
        assert_eq!(cell.shapes, vec![a, b]);
        assert_eq!(cell.shapes_on_layer("poly").count(), 1);
    }

    #[test]
    fn test_set_cdf_overwrites_in_place() {
        let mut cell = Cell::new("mytech", "c");
        cell.set_cdf("width", 1.0);
        cell.set_cdf("layer", "diff");
        cell.set_cdf("width", 2.5);
        assert_eq!(cell.param_count(), 2);
        let names: Vec<&str> = cell.cdf_params.keys().map(|k| k.as_str()).collect();
        assert_eq!(names, ["width", "layer"]);
        assert_eq!(cell.cdf("width").unwrap().value, CdfValue::Float(2.5));
        assert_eq!(cell.cdf("layer").unwrap().kind(), CdfType::String);
    }

    #[test]
    fn test_cell_bbox() {
        let mut cell = Cell::new("mytech", "c");
        assert!(cell.local_bbox().is_none());
        cell.add_shape(Shape::rectangle("diff", 2.0, 1.0));
        cell.add_shape(Shape::rectangle("poly", 0.5, 3.0));
        let bb = cell.local_bbox().unwrap();
        assert!((bb.max.x - 2.0).abs() < 1e-10);
        assert!((bb.max.y - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_cdf_value_display() {
        assert_eq!(CdfValue::Float(2.0).to_string(), "2.0");
        assert_eq!(CdfValue::from("diff").to_string(), "diff");
        assert_eq!(CdfValue::from("diff").as_f64(), None);
        assert_eq!(CdfValue::Float(1.5).as_str(), None);
        assert_eq!(CdfType::Float.to_string(), "float");
    }
}
