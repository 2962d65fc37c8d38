//! printf-style formatting for the `printf` and `sprintf` procedures.
//!
//! Directives: `%s`, `%d`, `%f`, `%g`, `%L`, `%n` and `%%`, each with an
//! optional `-` flag, field width and precision (`%-8s`, `%.3f`).

use pillmock_core::{format_float, MockError};

use crate::value::Value;

/// 2^63: integral floats at or beyond this do not fit an `i64`.
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

struct Spec {
    left: bool,
    width: Option<usize>,
    precision: Option<usize>,
    conversion: char,
}

/// Expand `fmt` with `args`. Every argument must be consumed.
pub fn format(fmt: &str, args: &[Value]) -> Result<String, MockError> {
    let mut out = String::with_capacity(fmt.len());
    let mut args = args.iter();
    let mut chars = fmt.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        let mut spec = Spec {
            left: false,
            width: None,
            precision: None,
            conversion: ' ',
        };
        if chars.peek() == Some(&'-') {
            spec.left = true;
            chars.next();
        }
        spec.width = read_number(&mut chars);
        if chars.peek() == Some(&'.') {
            chars.next();
            spec.precision = Some(read_number(&mut chars).unwrap_or(0));
        }
        spec.conversion = chars
            .next()
            .ok_or_else(|| MockError::Format("format string ends inside a directive".to_string()))?;

        if spec.conversion == '%' {
            out.push('%');
            continue;
        }
        let arg = args.next().ok_or_else(|| {
            MockError::Format(format!("not enough arguments for directive %{}", spec.conversion))
        })?;
        let text = convert(&spec, arg)?;
        pad(&mut out, &text, &spec);
    }

    if args.next().is_some() {
        return Err(MockError::Format(
            "not all arguments converted during formatting".to_string(),
        ));
    }
    Ok(out)
}

fn read_number(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Option<usize> {
    let mut digits = String::new();
    while let Some(d) = chars.peek().filter(|d| d.is_ascii_digit()) {
        digits.push(*d);
        chars.next();
    }
    digits.parse().ok()
}

fn convert(spec: &Spec, arg: &Value) -> Result<String, MockError> {
    let param = format!("%{}", spec.conversion);
    let text = match spec.conversion {
        's' => match arg {
            Value::Str(s) => s.clone(),
            other => other.to_string(),
        },
        'd' => match arg {
            Value::Int(v) => v.to_string(),
            Value::Float(v) if v.fract() == 0.0 && v.abs() < I64_LIMIT => format!("{}", *v as i64),
            Value::Float(v) if v.fract() == 0.0 => format!("{v:.0}"),
            other => return Err(mismatch(&param, "integer", other)),
        },
        'f' => {
            let v = arg.to_f64(&param)?;
            format!("{:.*}", spec.precision.unwrap_or(6), v)
        }
        'g' => {
            let v = arg.to_f64(&param)?;
            match spec.precision {
                Some(p) => format!("{:.*}", p, v),
                None => format!("{v}"),
            }
        }
        'n' => match arg {
            Value::Int(v) => v.to_string(),
            Value::Float(v) => format_float(*v),
            other => return Err(mismatch(&param, "number", other)),
        },
        'L' => arg.to_string(),
        other => {
            return Err(MockError::Format(format!("unsupported directive %{other}")));
        }
    };
    Ok(text)
}

fn mismatch(param: &str, expected: &'static str, found: &Value) -> MockError {
    MockError::TypeMismatch {
        parameter: param.to_string(),
        expected,
        found: found.type_name().to_string(),
    }
}

fn pad(out: &mut String, text: &str, spec: &Spec) {
    let width = spec.width.unwrap_or(0);
    let fill = width.saturating_sub(text.chars().count());
    if spec.left {
        out.push_str(text);
        out.extend(std::iter::repeat(' ').take(fill));
    } else {
        out.extend(std::iter::repeat(' ').take(fill));
        out.push_str(text);
    }
}
