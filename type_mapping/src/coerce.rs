//! Value coercion rules
//!
//! Converts arbitrary parameter values to the primitive type a default
//! declares. The rules follow loose web-form semantics: numbers parse from
//! text, booleans use truthiness and strings use their display form.

use crate::types::ParamValue;

/// Coerce to a number. Unparseable input yields NaN.
pub fn to_number(value: &ParamValue) -> f64 {
    match value {
        ParamValue::Number(n) => *n,
        ParamValue::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        ParamValue::Text(s) => parse_number(s),
        ParamValue::Null => 0.0,
        ParamValue::List(items) => match items.as_slice() {
            [] => 0.0,
            [single] => to_number(single),
            _ => f64::NAN,
        },
        ParamValue::Map(_) => f64::NAN,
    }
}

/// Coerce to a boolean using truthiness
pub fn to_bool(value: &ParamValue) -> bool {
    match value {
        ParamValue::Bool(b) => *b,
        ParamValue::Number(n) => *n != 0.0 && !n.is_nan(),
        ParamValue::Text(s) => !s.is_empty(),
        ParamValue::List(_) | ParamValue::Map(_) => true,
        ParamValue::Null => false,
    }
}

/// Coerce to a string
pub fn to_text(value: &ParamValue) -> String {
    match value {
        ParamValue::Text(s) => s.clone(),
        ParamValue::Number(n) => format_number(*n),
        ParamValue::Bool(b) => b.to_string(),
        ParamValue::List(items) => items
            .iter()
            .map(|item| match item {
                ParamValue::Null => String::new(),
                other => to_text(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        ParamValue::Map(_) => "[object Object]".to_string(),
        ParamValue::Null => "null".to_string(),
    }
}

fn parse_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    if let Some(hex) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        return u64::from_str_radix(hex, 16)
            .map(|n| n as f64)
            .unwrap_or(f64::NAN);
    }

    // Rust accepts "inf" and "nan" spellings that forms never send as numbers
    if trimmed.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
        return f64::NAN;
    }

    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if n.fract() == 0.0 && n.abs() < 1e21 {
        format!("{}", n as i128)
    } else {
        format!("{}", n)
    }
}
