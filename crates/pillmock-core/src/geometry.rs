use serde::{Deserialize, Serialize};
use std::fmt;

/// A 2D point in layout coordinates (microns).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn origin() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub min: Point,
    pub max: Point,
}

impl BBox {
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn union(&self, other: &BBox) -> Self {
        Self {
            min: Point::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Point::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }
}

/// Kind of a primitive shape. Only rectangles exist today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeKind {
    Rectangle,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeKind::Rectangle => f.write_str("rect"),
        }
    }
}

/// A primitive shape record owned by exactly one cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub kind: ShapeKind,
    pub layer: String,
    pub width: f64,
    pub length: f64,
    /// Placeholder box from the origin to `(width, length)`. Placement
    /// offsets and rotation are not modelled.
    pub bbox: BBox,
}

impl Shape {
    /// Create a rectangle on `layer`. Dimensions are taken as given; a
    /// negative value produces an inverted placeholder box.
    pub fn rectangle(layer: &str, width: f64, length: f64) -> Self {
        if width < 0.0 || length < 0.0 {
            log::warn!(
                "Rectangle on layer {} has negative dimensions {}x{}",
                layer,
                format_float(width),
                format_float(length)
            );
        }
        Self {
            kind: ShapeKind::Rectangle,
            layer: layer.to_string(),
            width,
            length,
            bbox: BBox::new(Point::origin(), Point::new(width, length)),
        }
    }
}

/// Render a float the way script authors expect to read it back:
/// integral values keep one decimal (`2.0`), everything else uses the
/// shortest representation (`1.5`, `0.25`).
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}
