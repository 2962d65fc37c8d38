//! Parametric cell generators.
//!
//! Each generator has a parameter struct whose `Default` holds the
//! documented defaults. Keywords missing at the call site fall back to
//! those fields. A generator always builds a fresh cell under its fixed
//! name, replacing any earlier one.

use pillmock_core::{format_float, Cell, MockError};

use crate::session::Session;
use crate::value::{Args, CellHandle, Value};

/// Parameters of `pcGenCell_rect_cell`.
#[derive(Debug, Clone, PartialEq)]
pub struct RectCellParams {
    pub width: f64,
    pub length: f64,
    pub layer: String,
}

impl Default for RectCellParams {
    fn default() -> Self {
        Self {
            width: 1.0,
            length: 2.0,
            layer: "diff".to_string(),
        }
    }
}

impl RectCellParams {
    pub const CELL_NAME: &'static str = "rect_cell";
    pub const KEYWORDS: &'static [&'static str] = &["width", "length", "layer"];

    pub fn from_args(args: &Args) -> Result<Self, MockError> {
        let d = Self::default();
        args.note_unrecognized("pcGenCell_rect_cell", Self::KEYWORDS);
        Ok(Self {
            width: args.float_or("width", d.width)?,
            length: args.float_or("length", d.length)?,
            layer: args.string_or("layer", &d.layer)?,
        })
    }
}

/// Parameters of `pcGenCell_complex_cell`.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexCellParams {
    pub width1: f64,
    pub length1: f64,
    pub width2: f64,
    pub length2: f64,
    pub layer1: String,
    pub layer2: String,
}

impl Default for ComplexCellParams {
    fn default() -> Self {
        Self {
            width1: 1.0,
            length1: 2.0,
            width2: 0.5,
            length2: 1.0,
            layer1: "diff".to_string(),
            layer2: "poly".to_string(),
        }
    }
}

impl ComplexCellParams {
    pub const CELL_NAME: &'static str = "complex_cell";
    pub const KEYWORDS: &'static [&'static str] =
        &["width1", "length1", "width2", "length2", "layer1", "layer2"];

    pub fn from_args(args: &Args) -> Result<Self, MockError> {
        let d = Self::default();
        args.note_unrecognized("pcGenCell_complex_cell", Self::KEYWORDS);
        Ok(Self {
            width1: args.float_or("width1", d.width1)?,
            length1: args.float_or("length1", d.length1)?,
            width2: args.float_or("width2", d.width2)?,
            length2: args.float_or("length2", d.length2)?,
            layer1: args.string_or("layer1", &d.layer1)?,
            layer2: args.string_or("layer2", &d.layer2)?,
        })
    }
}

/// Build `rect_cell`: three CDF parameters and one rectangle.
pub fn rect_cell<'s>(session: &'s mut Session, params: &RectCellParams) -> Result<&'s mut Cell, MockError> {
    log::info!("Generating rectangle cell with parameters:");
    log::info!("- Width: {}", format_float(params.width));
    log::info!("- Length: {}", format_float(params.length));
    log::info!("- Layer: {}", params.layer);

    let mut cell = Cell::new(&session.library, RectCellParams::CELL_NAME);
    cell.set_cdf("width", params.width);
    cell.set_cdf("length", params.length);
    cell.set_cdf("layer", params.layer.as_str());
    cell.add_shape(session.create_rectangle(&params.layer, params.width, params.length)?);

    session.store_generated(cell)
}

/// Build `complex_cell`: six CDF parameters and two rectangles, first on
/// `layer1`, then on `layer2`.
pub fn complex_cell<'s>(
    session: &'s mut Session,
    params: &ComplexCellParams,
) -> Result<&'s mut Cell, MockError> {
    log::info!("Generating complex cell with parameters:");
    log::info!(
        "- Shape 1: Width={}, Length={}, Layer={}",
        format_float(params.width1),
        format_float(params.length1),
        params.layer1
    );
    log::info!(
        "- Shape 2: Width={}, Length={}, Layer={}",
        format_float(params.width2),
        format_float(params.length2),
        params.layer2
    );

    let mut cell = Cell::new(&session.library, ComplexCellParams::CELL_NAME);
    cell.set_cdf("width1", params.width1);
    cell.set_cdf("length1", params.length1);
    cell.set_cdf("width2", params.width2);
    cell.set_cdf("length2", params.length2);
    cell.set_cdf("layer1", params.layer1.as_str());
    cell.set_cdf("layer2", params.layer2.as_str());
    cell.add_shape(session.create_rectangle(&params.layer1, params.width1, params.length1)?);
    cell.add_shape(session.create_rectangle(&params.layer2, params.width2, params.length2)?);

    session.store_generated(cell)
}

fn handle(cell: &Cell) -> Value {
    Value::Cell(CellHandle {
        id: cell.id,
        library: cell.library.clone(),
        name: cell.name.clone(),
    })
}

pub fn gen_rect_cell(session: &mut Session, args: &Args) -> Result<Value, MockError> {
    let params = RectCellParams::from_args(args)?;
    rect_cell(session, &params).map(|cell| handle(cell))
}

pub fn gen_complex_cell(session: &mut Session, args: &Args) -> Result<Value, MockError> {
    let params = ComplexCellParams::from_args(args)?;
    complex_cell(session, &params).map(|cell| handle(cell))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::tests::test_session;
    use pillmock_core::{CdfType, CdfValue, KeyScope};

    fn cdf_pairs(cell: &Cell) -> Vec<(String, CdfType, String)> {
        cell.cdf_params
            .values()
            .map(|p| (p.name.clone(), p.kind(), p.value.to_string()))
            .collect()
    }

    #[test]
    fn test_rect_cell_parameters() {
        let mut session = test_session();
        let args = Args::new()
            .kwarg("width", 1.5)
            .kwarg("length", 2.5)
            .kwarg("layer", "diff");
        session.call("pcGenCell_rect_cell", &args).unwrap();

        let cell = session.cells.get("rect_cell").unwrap();
        assert_eq!(cell.library, "mytech");
        assert_eq!(cell.cdf("width").unwrap().value, CdfValue::Float(1.5));
        assert_eq!(cell.cdf("length").unwrap().value, CdfValue::Float(2.5));
        assert_eq!(cell.cdf("layer").unwrap().value, CdfValue::from("diff"));
        assert_eq!(cell.cdf("layer").unwrap().kind(), CdfType::String);
        assert_eq!(cell.param_count(), 3);
        assert_eq!(cell.shapes.len(), 1);
        assert!((cell.shapes[0].width - 1.5).abs() < 1e-10);
        assert!((cell.shapes[0].length - 2.5).abs() < 1e-10);
    }

    #[test]
    fn test_rect_cell_defaults() {
        let mut session = test_session();
        session
            .call("pcGenCell_rect_cell", &Args::new().kwarg("length", 4i64))
            .unwrap();
        let cell = session.cells.get("rect_cell").unwrap();
        assert_eq!(
            cdf_pairs(cell),
            vec![
                ("width".to_string(), CdfType::Float, "1.0".to_string()),
                ("length".to_string(), CdfType::Float, "4.0".to_string()),
                ("layer".to_string(), CdfType::String, "diff".to_string()),
            ]
        );
        assert_eq!(RectCellParams::from_args(&Args::new()).unwrap(), RectCellParams::default());
    }

    #[test]
    fn test_rect_cell_overwrites() {
        let mut session = test_session();
        let first = rect_cell(&mut session, &RectCellParams::default()).unwrap().id;
        let params = RectCellParams {
            width: 3.0,
            ..Default::default()
        };
        let second = rect_cell(&mut session, &params).unwrap().id;

        assert_ne!(first, second);
        assert_eq!(session.cells.cell_count(), 1);
        let cell = session.cells.get("rect_cell").unwrap();
        assert_eq!(cell.id, second);
        assert_eq!(cell.shapes.len(), 1);
        assert!((cell.shapes[0].width - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_complex_cell() {
        let mut session = test_session();
        let args = Args::new()
            .kwarg("width1", 2.0)
            .kwarg("length1", 3.0)
            .kwarg("width2", 1.0)
            .kwarg("length2", 1.5)
            .kwarg("layer1", "metal")
            .kwarg("layer2", "poly");
        session.call("pcGenCell_complex_cell", &args).unwrap();

        let cell = session.cells.get("complex_cell").unwrap();
        assert_eq!(cell.param_count(), 6);
        let names: Vec<&str> = cell.cdf_params.keys().map(|k| k.as_str()).collect();
        assert_eq!(names, ["width1", "length1", "width2", "length2", "layer1", "layer2"]);
        assert_eq!(cell.shapes.len(), 2);
        assert_eq!(cell.shapes[0].layer, "metal");
        assert!((cell.shapes[0].width - 2.0).abs() < 1e-10);
        assert!((cell.shapes[0].length - 3.0).abs() < 1e-10);
        assert_eq!(cell.shapes[1].layer, "poly");
        assert!((cell.shapes[1].width - 1.0).abs() < 1e-10);
        assert!((cell.shapes[1].length - 1.5).abs() < 1e-10);
    }

    #[test]
    fn test_complex_cell_defaults() {
        let params = ComplexCellParams::from_args(&Args::new().kwarg("layer2", "metal")).unwrap();
        assert_eq!(
            params,
            ComplexCellParams {
                layer2: "metal".to_string(),
                ..Default::default()
            }
        );
        assert!((params.width2 - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_wrong_parameter_type() {
        let mut session = test_session();
        let result = session.call("pcGenCell_rect_cell", &Args::new().kwarg("width", "wide"));
        assert!(matches!(result, Err(MockError::TypeMismatch { .. })));
        let result = session.call("pcGenCell_complex_cell", &Args::new().kwarg("layer1", 5.0));
        assert!(matches!(result, Err(MockError::TypeMismatch { .. })));
        assert!(session.cells.is_empty());
    }

    #[test]
    fn test_unrecognized_keywords_ignored() {
        let args = Args::new().arg(7i64).kwarg("w", 9.0);
        assert_eq!(RectCellParams::from_args(&args).unwrap(), RectCellParams::default());
    }

    #[test]
    fn test_strict_layers_reject_generation() {
        let mut session = test_session().with_strict_layers(true);
        let params = RectCellParams {
            layer: "nwell".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            rect_cell(&mut session, &params),
            Err(MockError::UnknownLayer(_))
        ));
        assert!(session.cells.is_empty());
    }

    #[test]
    fn test_library_scope_generated_cell() {
        let mut session = test_session().with_key_scope(KeyScope::LibraryAndName);
        session.get_or_create("otherlib", "rect_cell");
        rect_cell(&mut session, &RectCellParams::default()).unwrap();
        assert_eq!(session.cells.cell_count(), 2);
        assert_eq!(session.cells.get_in("mytech", "rect_cell").unwrap().shape_count(), 1);
        assert_eq!(session.cells.get_in("otherlib", "rect_cell").unwrap().shape_count(), 0);
    }
}
