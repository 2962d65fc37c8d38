//! Built-in procedures of the mock library.

use pillmock_core::MockError;

use crate::format;
use crate::session::Session;
use crate::value::{Args, CellHandle, Value};

/// `ddGetObj(library cellName)`: get or create a cell view.
pub fn dd_get_obj(session: &mut Session, args: &Args) -> Result<Value, MockError> {
    let library = args.require("ddGetObj", 0)?.to_str("library")?;
    let name = args.require("ddGetObj", 1)?.to_str("cellName")?;
    let cell = session.get_or_create(library, name);
    Ok(Value::Cell(CellHandle {
        id: cell.id,
        library: cell.library.clone(),
        name: cell.name.clone(),
    }))
}

/// `rodCreateRect(layer width length [?cvId cell])`: create a rectangle.
///
/// With `?cvId` the rectangle is also appended to that cell. Extra
/// positional arguments are ignored.
pub fn rod_create_rect(session: &mut Session, args: &Args) -> Result<Value, MockError> {
    let layer = args.require("rodCreateRect", 0)?.to_str("layer")?;
    let width = args.require("rodCreateRect", 1)?.to_f64("width")?;
    let length = args.require("rodCreateRect", 2)?.to_f64("length")?;
    args.note_unrecognized("rodCreateRect", &["cvId"]);

    let rect = session.create_rectangle(layer, width, length)?;
    if let Some(target) = args.keyword("cvId").filter(|v| !v.is_nil()) {
        let handle = target.to_cell("cvId")?;
        let cell = session
            .cells
            .get_by_id_mut(&handle.id)
            .ok_or_else(|| MockError::CellNotFound(handle.name.clone()))?;
        cell.add_shape(rect.clone());
    }
    Ok(Value::Shape(rect))
}

/// `printf(format args...)`: write a formatted line to the session output.
pub fn printf(session: &mut Session, args: &Args) -> Result<Value, MockError> {
    let fmt = args.require("printf", 0)?.to_str("format")?;
    let text = format::format(fmt, &args.positional[1..])?;
    session.print(&text)?;
    Ok(Value::Nil)
}

/// `sprintf(nil format args...)`: format into a string. The first
/// argument is the unused destination.
pub fn sprintf(_session: &mut Session, args: &Args) -> Result<Value, MockError> {
    let fmt = args.require("sprintf", 1)?.to_str("format")?;
    let text = format::format(fmt, &args.positional[2..])?;
    Ok(Value::Str(text))
}

/// `list(args...)`: collect the evaluated arguments into a list.
pub fn list(_session: &mut Session, args: &Args) -> Result<Value, MockError> {
    Ok(Value::List(args.positional.clone()))
}

/// `debug_print(message)`.
pub fn debug_print(_session: &mut Session, args: &Args) -> Result<Value, MockError> {
    let message = match args.require("debug_print", 0)? {
        Value::Str(s) => s.clone(),
        other => other.to_string(),
    };
    log::info!("DEBUG: {}", message);
    Ok(Value::Nil)
}
