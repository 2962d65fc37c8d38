//! Layer-map reader.
//!
//! One layer per line: `<name> <number> <datatype>`, whitespace separated.
//! Blank lines and lines starting with `#` are skipped.

use std::fs;
use std::path::Path;

use pillmock_core::{LayerEntry, LayerMap, MockError};

/// Layer map written by the mock environment setup for the `mytech`
/// technology.
pub const DEFAULT_LAYERMAP: &str = "
# Layer definition format: layer_name layer_number datatype
diff 65 20
poly 66 20
li1  67 20
met1 68 20
licon1 66 44
mcon 67 44
";

/// Parse layer-map text. Line numbers in errors are 1-based.
pub fn parse(text: &str) -> Result<LayerMap, MockError> {
    let mut map = LayerMap::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        map.insert(parse_line(idx + 1, line)?);
    }
    Ok(map)
}

fn parse_line(line_no: usize, line: &str) -> Result<LayerEntry, MockError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let [name, number, datatype] = tokens[..] else {
        return Err(MockError::Parse {
            line: line_no,
            message: format!("expected 3 fields, found {}", tokens.len()),
        });
    };
    let parse_int = |field: &str, what: &str| {
        field.parse::<i32>().map_err(|_| MockError::Parse {
            line: line_no,
            message: format!("{what} '{field}' is not an integer"),
        })
    };
    Ok(LayerEntry::new(
        name,
        parse_int(number, "layer number")?,
        parse_int(datatype, "datatype")?,
    ))
}

/// Read and parse a layer-map file.
pub fn load(path: impl AsRef<Path>) -> Result<LayerMap, MockError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let map = parse(&text)?;
    log::info!("Loaded {} layers from {}", map.len(), path.display());
    Ok(map)
}
