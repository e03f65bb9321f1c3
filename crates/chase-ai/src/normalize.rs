//! Snapshot normalizer: arbitrary JSON in, well-formed [`GridConfig`] out.
//!
//! Field coercion follows the game loop's loose conventions: numbers may arrive as strings,
//! booleans or `null`; positions may be missing or malformed; direction names are
//! case-insensitive. Nothing here fails; bad input degrades to defaults.

use chase_core::{Cell, Direction, GridConfig, DEFAULT_BUDGET_MS, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use serde_json::{Map, Number, Value};

/// Normalize a snapshot. Pure; never fails.
///
/// Recognized fields: `grid.{width,height,blocked}`, `me`/`opponent`, `target`/`player`,
/// `legalActions`, `rngSeed`, `maxDecisionMs`/`decisionBudgetMs`. Unknown fields are ignored.
pub fn normalize(snapshot: &Value) -> GridConfig {
    let empty = Map::new();
    let root = snapshot.as_object().unwrap_or(&empty);
    let grid = root.get("grid").and_then(Value::as_object).unwrap_or(&empty);

    let width = to_int(grid.get("width")).unwrap_or(DEFAULT_WIDTH);
    let height = to_int(grid.get("height")).unwrap_or(DEFAULT_HEIGHT);
    let base = GridConfig::new(width, height);

    let me = point_from(either(root, "me", "opponent"), Cell::new(0, 0));
    let corner = Cell::new(base.width() - 1, base.height() - 1);
    let target = point_from(either(root, "target", "player"), corner);

    let budget_ms = ["maxDecisionMs", "decisionBudgetMs"]
        .iter()
        .filter_map(|key| to_number(root.get(*key)))
        .find(|n| n.is_finite())
        .unwrap_or(DEFAULT_BUDGET_MS);

    let seed = root
        .get("rngSeed")
        .filter(|v| !v.is_null())
        .map(js_string);

    let cfg = base
        .with_me(me)
        .with_target(target)
        .with_blocked(blocked_cells(grid.get("blocked")))
        .with_legal_actions(legal_actions(root.get("legalActions")))
        .with_seed(seed)
        .with_budget_ms(budget_ms);

    tracing::trace!(
        width = cfg.width(),
        height = cfg.height(),
        blocked = cfg.blocked().len(),
        legal = cfg.legal_actions().len(),
        budget_ms = cfg.budget_ms(),
        "normalized snapshot"
    );
    cfg
}

/// `root[primary]` when truthy, else `root[alias]`.
fn either<'a>(root: &'a Map<String, Value>, primary: &str, alias: &str) -> Option<&'a Value> {
    match root.get(primary) {
        Some(v) if truthy(v) => Some(v),
        _ => root.get(alias),
    }
}

fn point_from(value: Option<&Value>, fallback: Cell) -> Cell {
    match value {
        Some(Value::Object(obj)) => Cell::new(
            to_int(obj.get("x")).unwrap_or(fallback.x),
            to_int(obj.get("y")).unwrap_or(fallback.y),
        ),
        _ => fallback,
    }
}

/// Accepts `[x, y]` pairs and `{x, y}` objects; anything non-numeric is dropped.
fn blocked_cells(value: Option<&Value>) -> Vec<Cell> {
    let Some(Value::Array(entries)) = value else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| {
            let (x, y) = match entry {
                Value::Array(pair) if pair.len() >= 2 => (to_int(pair.first()), to_int(pair.get(1))),
                Value::Object(obj) => (to_int(obj.get("x")), to_int(obj.get("y"))),
                _ => return None,
            };
            Some(Cell::new(x?, y?))
        })
        .collect()
}

/// Non-array input means "everything is legal"; the builder handles an empty result the same way.
fn legal_actions(value: Option<&Value>) -> Vec<Direction> {
    let Some(Value::Array(entries)) = value else {
        return Direction::CANONICAL.to_vec();
    };

    entries
        .iter()
        .filter(|v| truthy(v))
        .filter_map(|v| Direction::parse(&js_string(v)))
        .collect()
}

fn to_int(value: Option<&Value>) -> Option<i64> {
    if let Some(Value::Number(n)) = value {
        if let Some(i) = n.as_i64() {
            return Some(i);
        }
    }
    to_number(value)
        .filter(|n| n.is_finite())
        .map(|n| n.trunc() as i64)
}

/// Numeric coercion of a field. A missing field yields `None`.
fn to_number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Null => Some(0.0),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_numeric_text(s),
        other => parse_numeric_text(&js_string(other)),
    }
}

fn parse_numeric_text(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return Some(0.0);
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = text.strip_prefix(prefix) {
            return u64::from_str_radix(digits, radix).ok().map(|n| n as f64);
        }
    }

    match text {
        "Infinity" | "+Infinity" => Some(f64::INFINITY),
        "-Infinity" => Some(f64::NEG_INFINITY),
        _ => text.parse::<f64>().ok().filter(|n| !n.is_nan()),
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// String form used for direction names and for hashing the seed.
///
/// Arrays join their elements with `,`; objects all render as `[object Object]`.
pub(crate) fn js_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_owned(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_text(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| if item.is_null() { String::new() } else { js_string(item) })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_owned(),
    }
}

fn number_text(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    let Some(f) = n.as_f64() else {
        return n.to_string();
    };
    if f == 0.0 {
        return "0".to_owned();
    }
    let magnitude = f.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let text = format!("{f:e}");
        return match text.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => text,
        };
    }
    f.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numeric_coercion() {
        assert_eq!(to_number(None), None);
        assert_eq!(to_number(Some(&json!(null))), Some(0.0));
        assert_eq!(to_number(Some(&json!(true))), Some(1.0));
        assert_eq!(to_number(Some(&json!(" 12 "))), Some(12.0));
        assert_eq!(to_number(Some(&json!(""))), Some(0.0));
        assert_eq!(to_number(Some(&json!("0x10"))), Some(16.0));
        assert_eq!(to_number(Some(&json!("abc"))), None);
        assert_eq!(to_number(Some(&json!([7]))), Some(7.0));
        assert_eq!(to_number(Some(&json!([1, 2]))), None);
        assert_eq!(to_number(Some(&json!({}))), None);
    }

    #[test]
    fn integers_truncate_toward_zero() {
        assert_eq!(to_int(Some(&json!(3.9))), Some(3));
        assert_eq!(to_int(Some(&json!(-3.9))), Some(-3));
        assert_eq!(to_int(Some(&json!("Infinity"))), None);
        assert_eq!(to_int(Some(&json!(i64::MAX))), Some(i64::MAX));
    }

    #[test]
    fn string_forms() {
        assert_eq!(js_string(&json!("seed")), "seed");
        assert_eq!(js_string(&json!(42)), "42");
        assert_eq!(js_string(&json!(2.0)), "2");
        assert_eq!(js_string(&json!(1.5)), "1.5");
        assert_eq!(js_string(&json!(1e21)), "1e+21");
        assert_eq!(js_string(&json!(1e-7)), "1e-7");
        assert_eq!(js_string(&json!(false)), "false");
        assert_eq!(js_string(&json!([1, null, "a"])), "1,,a");
        assert_eq!(js_string(&json!({ "k": 1 })), "[object Object]");
    }

    #[test]
    fn truthiness() {
        assert!(!truthy(&json!(null)));
        assert!(!truthy(&json!(0)));
        assert!(!truthy(&json!("")));
        assert!(truthy(&json!("0")));
        assert!(truthy(&json!([])));
        assert!(truthy(&json!({})));
    }
}
