//! Query composition.
//!
//! A [`Query`] is an ordered list of typed predicates. Predicates are kept in
//! the order they were added so callers (and tests) can see exactly what was
//! composed, and transports render them in that order.

use serde_json::Value;

/// A single query predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Column equals value. A null value matches null columns.
    Eq { column: String, value: Value },
    /// Case-insensitive pattern match. `%` matches any run of characters,
    /// `_` matches exactly one.
    ILike { column: String, pattern: String },
    /// Maximum number of rows to return.
    Limit(usize),
    /// Sort by a column.
    Order { column: String, ascending: bool },
}

impl Predicate {
    /// Whether this predicate narrows which rows match (as opposed to
    /// shaping the result).
    pub fn is_filter(&self) -> bool {
        matches!(self, Predicate::Eq { .. } | Predicate::ILike { .. })
    }
}

/// A select/delete query: projected columns plus predicates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    columns: Vec<String>,
    predicates: Vec<Predicate>,
}

impl Query {
    /// Create an empty query selecting all columns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Project only the given columns.
    pub fn select<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Add an equality predicate.
    pub fn eq(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.predicates.push(Predicate::Eq {
            column: column.into(),
            value: value.into(),
        });
        self
    }

    /// Add a case-insensitive pattern predicate.
    pub fn ilike(mut self, column: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.predicates.push(Predicate::ILike {
            column: column.into(),
            pattern: pattern.into(),
        });
        self
    }

    /// Add a case-insensitive substring predicate (`%needle%`).
    pub fn contains(self, column: impl Into<String>, needle: &str) -> Self {
        self.ilike(column, format!("%{}%", needle))
    }

    /// Limit the number of returned rows.
    pub fn limit(mut self, limit: usize) -> Self {
        self.predicates.push(Predicate::Limit(limit));
        self
    }

    /// Sort by a column.
    pub fn order(mut self, column: impl Into<String>, ascending: bool) -> Self {
        self.predicates.push(Predicate::Order {
            column: column.into(),
            ascending,
        });
        self
    }

    /// Projected columns. Empty means all columns.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// All predicates in composition order.
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// Row-narrowing predicates only.
    pub fn filters(&self) -> impl Iterator<Item = &Predicate> {
        self.predicates.iter().filter(|p| p.is_filter())
    }

    /// Effective row limit. The last limit added wins.
    pub fn row_limit(&self) -> Option<usize> {
        self.predicates.iter().rev().find_map(|p| match p {
            Predicate::Limit(n) => Some(*n),
            _ => None,
        })
    }

    /// Sort keys in the order they were added.
    pub fn orderings(&self) -> Vec<(&str, bool)> {
        self.predicates
            .iter()
            .filter_map(|p| match p {
                Predicate::Order { column, ascending } => Some((column.as_str(), *ascending)),
                _ => None,
            })
            .collect()
    }

    /// Render as PostgREST query-string pairs, including the projection.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let select = if self.columns.is_empty() {
            "*".to_string()
        } else {
            self.columns.join(",")
        };

        let mut params = vec![("select".to_string(), select)];
        params.extend(self.filter_params());
        params
    }

    /// Render as PostgREST query-string pairs without the projection.
    ///
    /// Sort keys are merged into a single `order` parameter.
    pub fn filter_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        let mut order = Vec::new();

        for predicate in &self.predicates {
            match predicate {
                Predicate::Eq { column, value } => {
                    let rendered = match value {
                        Value::Null => "is.null".to_string(),
                        other => format!("eq.{}", render_value(other)),
                    };
                    params.push((column.clone(), rendered));
                }
                Predicate::ILike { column, pattern } => {
                    params.push((column.clone(), format!("ilike.{}", pattern)));
                }
                Predicate::Limit(n) => params.push(("limit".to_string(), n.to_string())),
                Predicate::Order { column, ascending } => {
                    let direction = if *ascending { "asc" } else { "desc" };
                    order.push(format!("{}.{}", column, direction));
                }
            }
        }

        if !order.is_empty() {
            params.push(("order".to_string(), order.join(",")));
        }

        params
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}
