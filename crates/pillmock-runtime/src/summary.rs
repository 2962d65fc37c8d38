//! Human-readable dump of the cell store.

use std::io::{self, Write};

use pillmock_core::{format_float, CellStore};

/// Write every cell in store order: name, library, CDF parameters, then
/// shapes. Each cell block ends with a blank line.
pub fn write_summary(out: &mut impl Write, store: &CellStore) -> io::Result<()> {
    for cell in store.iter() {
        writeln!(out, "Cell: {}", cell.name)?;
        writeln!(out, "- Library: {}", cell.library)?;
        writeln!(out, "- CDF Parameters:")?;
        for param in cell.cdf_params.values() {
            writeln!(out, "  - {}: {} ({})", param.name, param.value, param.kind())?;
        }
        writeln!(out, "- Shapes: {}", cell.shapes.len())?;
        for (i, shape) in cell.shapes.iter().enumerate() {
            writeln!(
                out,
                "  - Shape {}: {}, layer={}, dimensions={}x{}",
                i + 1,
                shape.kind,
                shape.layer,
                format_float(shape.width),
                format_float(shape.length)
            )?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn summary(store: &CellStore) -> io::Result<String> {
    let mut buf = Vec::new();
    write_summary(&mut buf, store)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pillmock_core::Shape;

    #[test]
    fn test_summary_layout() {
        let mut store = CellStore::default();
        let cell = store.get_or_create("mytech", "rect_cell");
        cell.set_cdf("width", 1.5);
        cell.set_cdf("layer", "diff");
        cell.add_shape(Shape::rectangle("diff", 1.5, 2.0));
        store.get_or_create("mytech", "empty");

        let expected = "\
Cell: rect_cell
- Library: mytech
- CDF Parameters:
  - width: 1.5 (float)
  - layer: diff (string)
- Shapes: 1
  - Shape 1: rect, layer=diff, dimensions=1.5x2.0

Cell: empty
- Library: mytech
- CDF Parameters:
- Shapes: 0

";
        assert_eq!(summary(&store).unwrap(), expected);
    }

    #[test]
    fn test_empty_store() {
        assert_eq!(summary(&CellStore::default()).unwrap(), "");
    }
}
