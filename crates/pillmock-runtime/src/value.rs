use std::fmt;

use indexmap::IndexMap;
use pillmock_core::{format_float, CellId, MockError, Shape};

/// A reference to a stored cell, as handed back to scripts.
#[derive(Debug, Clone, PartialEq)]
pub struct CellHandle {
    pub id: CellId,
    pub library: String,
    pub name: String,
}

/// A dynamically typed value crossing the interpreter boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Nil,
    /// The script language's true value, `t`.
    True,
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Cell(CellHandle),
    Shape(Shape),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::True => "boolean",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Cell(_) => "cell",
            Value::Shape(_) => "shape",
        }
    }

    /// Numeric value for a float parameter. Integers are widened.
    pub fn to_f64(&self, parameter: &str) -> Result<f64, MockError> {
        match self {
            Value::Float(v) => Ok(*v),
            Value::Int(v) => Ok(*v as f64),
            other => Err(other.mismatch(parameter, "float")),
        }
    }

    pub fn to_str(&self, parameter: &str) -> Result<&str, MockError> {
        match self {
            Value::Str(s) => Ok(s),
            other => Err(other.mismatch(parameter, "string")),
        }
    }

    pub fn to_cell(&self, parameter: &str) -> Result<&CellHandle, MockError> {
        match self {
            Value::Cell(handle) => Ok(handle),
            other => Err(other.mismatch(parameter, "cell")),
        }
    }

    fn mismatch(&self, parameter: &str, expected: &'static str) -> MockError {
        MockError::TypeMismatch {
            parameter: parameter.to_string(),
            expected,
            found: self.type_name().to_string(),
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::True => f.write_str("t"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => f.write_str(&format_float(*v)),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::List(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str(")")
            }
            Value::Cell(c) => write!(f, "cell:{}/{}", c.library, c.name),
            Value::Shape(s) => write!(
                f,
                "{}:{} {}x{}",
                s.kind,
                s.layer,
                format_float(s.width),
                format_float(s.length)
            ),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        if v {
            Value::True
        } else {
            Value::Nil
        }
    }
}

/// Arguments of one procedure call: positional values in order, then
/// keyword values by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    pub positional: Vec<Value>,
    pub keywords: IndexMap<String, Value>,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    pub fn kwarg(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.keywords.insert(name.to_string(), value.into());
        self
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.positional.get(index)
    }

    /// Positional argument `index`, or `MissingArgument` naming the
    /// procedure.
    pub fn require(&self, procedure: &str, index: usize) -> Result<&Value, MockError> {
        self.positional
            .get(index)
            .ok_or_else(|| MockError::MissingArgument {
                procedure: procedure.to_string(),
                index,
            })
    }

    pub fn keyword(&self, name: &str) -> Option<&Value> {
        self.keywords.get(name)
    }

    pub fn float_or(&self, name: &str, default: f64) -> Result<f64, MockError> {
        match self.keyword(name) {
            Some(v) => v.to_f64(name),
            None => Ok(default),
        }
    }

    pub fn string_or(&self, name: &str, default: &str) -> Result<String, MockError> {
        match self.keyword(name) {
            Some(v) => v.to_str(name).map(str::to_string),
            None => Ok(default.to_string()),
        }
    }

    /// Log keywords a procedure does not recognise. They are otherwise
    /// ignored.
    pub fn note_unrecognized(&self, procedure: &str, known: &[&str]) {
        for name in self.keywords.keys() {
            if !known.contains(&name.as_str()) {
                log::debug!("{}: ignoring unrecognized parameter '{}'", procedure, name);
            }
        }
    }
}
