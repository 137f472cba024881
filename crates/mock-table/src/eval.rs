//! Query evaluation against in-memory rows.

use std::cmp::Ordering;

use serde_json::Value;
use table_core::{Predicate, Query, Row};

/// Apply a query to a set of rows: filter, sort, limit, then project.
///
/// Sorting follows the database default of placing nulls last when
/// ascending and first when descending.
pub fn apply_query(rows: &[Row], query: &Query) -> Vec<Row> {
    let mut matched: Vec<Row> = rows
        .iter()
        .filter(|row| row_matches(row, query))
        .cloned()
        .collect();

    let orderings = query.orderings();
    if !orderings.is_empty() {
        matched.sort_by(|a, b| {
            for (column, ascending) in &orderings {
                let ord = compare_fields(a.get(*column), b.get(*column));
                let ord = if *ascending { ord } else { ord.reverse() };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            Ordering::Equal
        });
    }

    if let Some(limit) = query.row_limit() {
        matched.truncate(limit);
    }

    if query.columns().is_empty() {
        return matched;
    }

    matched
        .into_iter()
        .map(|row| {
            query
                .columns()
                .iter()
                .filter_map(|column| row.get(column).map(|v| (column.clone(), v.clone())))
                .collect()
        })
        .collect()
}

/// Whether a row satisfies every filter predicate of a query.
pub fn row_matches(row: &Row, query: &Query) -> bool {
    query.filters().all(|predicate| predicate_matches(row, predicate))
}

fn predicate_matches(row: &Row, predicate: &Predicate) -> bool {
    match predicate {
        Predicate::Eq { column, value } => {
            let field = row.get(column).unwrap_or(&Value::Null);
            values_equal(field, value)
        }
        Predicate::ILike { column, pattern } => match row.get(column) {
            Some(Value::String(text)) => like_match(&pattern.to_lowercase(), &text.to_lowercase()),
            _ => false,
        },
        Predicate::Limit(_) | Predicate::Order { .. } => true,
    }
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}

/// SQL `LIKE` matching: `%` matches any run of characters (including none),
/// `_` matches exactly one character. Case-sensitive.
pub fn like_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();

    let (mut p, mut t) = (0, 0);
    let mut backtrack: Option<(usize, usize)> = None;

    while t < text.len() {
        if p < pattern.len() && pattern[p] == '%' {
            backtrack = Some((p, t));
            p += 1;
        } else if p < pattern.len() && (pattern[p] == '_' || pattern[p] == text[t]) {
            p += 1;
            t += 1;
        } else if let Some((star, mark)) = backtrack {
            p = star + 1;
            t = mark + 1;
            backtrack = Some((star, mark + 1));
        } else {
            return false;
        }
    }

    pattern[p..].iter().all(|c| *c == '%')
}

fn compare_fields(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());

    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => compare_values(a, b),
    }
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => a.to_string().cmp(&b.to_string()),
    }
}
