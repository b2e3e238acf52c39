//! Parsing of `--where` arguments.

use stratum_core::{CompareOp, SqlValue, Where};

/// Operators accepted between column and value, longest first so that `>=`
/// wins over `>`.
const OPERATORS: [(&str, CompareOp); 8] = [
    ("!~", CompareOp::NotLike),
    ("!=", CompareOp::Ne),
    (">=", CompareOp::Ge),
    ("<=", CompareOp::Le),
    ("=", CompareOp::Eq),
    (">", CompareOp::Gt),
    ("<", CompareOp::Lt),
    ("~", CompareOp::Like),
];

/// Parses `column<op>value`, e.g. `age>=18`, `name~A%` or `id=7`.
///
/// `~` and `!~` are `LIKE` and `NOT LIKE`.
pub fn parse_condition(arg: &str) -> Result<Where, String> {
    let start = arg
        .find(['!', '<', '>', '=', '~'])
        .ok_or_else(|| format!("`{arg}` has no operator, expected e.g. `column=value`"))?;

    let column = arg[..start].trim();
    if column.is_empty() {
        return Err(format!("`{arg}` has no column name"));
    }

    let rest = &arg[start..];
    let (token, op) = OPERATORS
        .iter()
        .find(|(token, _)| rest.starts_with(token))
        .ok_or_else(|| format!("`{arg}` has an unknown operator"))?;

    Ok(Where::compare(column, *op, parse_value(&rest[token.len()..])))
}

/// Integers and finite floats become numbers, anything else text. Wrapping
/// the value in single quotes forces text.
pub fn parse_value(raw: &str) -> SqlValue {
    if let Some(quoted) = raw
        .strip_prefix('\'')
        .and_then(|r| r.strip_suffix('\''))
    {
        return SqlValue::Text(quoted.to_owned());
    }
    if let Ok(n) = raw.parse::<i64>() {
        return SqlValue::Int(n);
    }
    if raw.bytes().any(|b| b.is_ascii_digit()) {
        if let Ok(x) = raw.parse::<f64>() {
            if x.is_finite() {
                return SqlValue::Float(x);
            }
        }
    }
    SqlValue::Text(raw.to_owned())
}

/// AND-s every condition together; no conditions selects everything.
pub fn combine(conditions: Vec<Where>) -> Where {
    conditions.into_iter().reduce(Where::and).unwrap_or_default()
}
