use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ClientError, Result};
use crate::templates::{SqlTemplates, FILTER_JOINER, WHERE_KEYWORD};

/// Semantic type of a filter value. Drives literal rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterType {
    Date,
    Int,
    Other,
}

impl FilterType {
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "DATE" => Ok(FilterType::Date),
            "INT" => Ok(FilterType::Int),
            "OTHER" => Ok(FilterType::Other),
            _ => Err(ClientError::UnsupportedFilterType(s.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterType::Date => "DATE",
            FilterType::Int => "INT",
            FilterType::Other => "OTHER",
        }
    }
}

/// One predicate condition. A sequence of specs combines with an implicit
/// AND, in the order given.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterSpec {
    /// "DATE", "INT" or "OTHER"; anything else is rejected when the
    /// predicate is built, never silently dropped.
    #[serde(rename = "type")]
    pub filter_type: String,
    pub column: String,
    pub value: Value,
    /// Comparison operator, inserted verbatim (`=`, `>=`, `<=`, `<`, `>`, `!=`).
    pub comparison: String,
}

impl FilterSpec {
    pub fn new(
        filter_type: FilterType,
        column: impl Into<String>,
        comparison: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        Self {
            filter_type: filter_type.as_str().to_string(),
            column: column.into(),
            value: value.into(),
            comparison: comparison.into(),
        }
    }
}

impl SqlTemplates {
    /// Render one filter spec as a dialect-correct predicate fragment.
    /// The fragment never includes the `WHERE` keyword.
    pub fn filter_sql(&self, spec: &FilterSpec) -> Result<String> {
        let filter_type = FilterType::parse(&spec.filter_type)?;
        let literal = render_literal(filter_type, spec)?;
        Ok(format!(
            "{} {} {}",
            self.quote_ident(&spec.column),
            spec.comparison,
            literal
        ))
    }

    /// Build the full predicate clause for a filter sequence: fragments in
    /// the given order, joined with `" AND "`, prefixed with a single
    /// `WHERE`. An empty sequence yields an empty string.
    pub fn where_clause(&self, specs: &[FilterSpec]) -> Result<String> {
        if specs.is_empty() {
            return Ok(String::new());
        }
        let fragments = specs
            .iter()
            .map(|spec| self.filter_sql(spec))
            .collect::<Result<Vec<_>>>()?;
        Ok(format!("{WHERE_KEYWORD} {}", fragments.join(FILTER_JOINER)))
    }
}

fn render_literal(filter_type: FilterType, spec: &FilterSpec) -> Result<String> {
    match filter_type {
        FilterType::Date => {
            let text = spec.value.as_str().ok_or_else(|| {
                ClientError::invalid_filter_value(&spec.column, "date value must be a string")
            })?;
            let date = NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|e| {
                ClientError::invalid_filter_value(
                    &spec.column,
                    format!("{text:?} is not a YYYY-MM-DD date: {e}"),
                )
            })?;
            Ok(format!("'{}'", date.format("%Y-%m-%d")))
        }
        FilterType::Int => match &spec.value {
            Value::Number(n) => Ok(n.to_string()),
            Value::String(s) => s
                .trim()
                .parse::<i64>()
                .map(|n| n.to_string())
                .map_err(|_| {
                    ClientError::invalid_filter_value(
                        &spec.column,
                        format!("{s:?} is not an integer"),
                    )
                }),
            other => Err(ClientError::invalid_filter_value(
                &spec.column,
                format!("expected an integer, got {other}"),
            )),
        },
        FilterType::Other => match &spec.value {
            Value::String(s) => Ok(quote_literal(s)),
            Value::Number(n) => Ok(quote_literal(&n.to_string())),
            Value::Bool(b) => Ok(quote_literal(if *b { "true" } else { "false" })),
            other => Err(ClientError::invalid_filter_value(
                &spec.column,
                format!("expected a scalar, got {other}"),
            )),
        },
    }
}

/// Single-quoted string literal with embedded quotes doubled.
fn quote_literal(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_date_and_int_filters_join_with_and() {
        let templates = SqlTemplates::default();
        let specs = vec![
            FilterSpec::new(FilterType::Date, "dt", ">=", "2023-01-01"),
            FilterSpec::new(FilterType::Int, "id", "<", 100),
        ];
        let clause = templates.where_clause(&specs).unwrap();
        assert_eq!(clause, "WHERE \"dt\" >= '2023-01-01' AND \"id\" < 100");
    }

    #[test]
    fn test_fragment_order_follows_input_order() {
        let templates = SqlTemplates::default();
        let specs = vec![
            FilterSpec::new(FilterType::Int, "id", "<", 100),
            FilterSpec::new(FilterType::Date, "dt", ">=", "2023-01-01"),
        ];
        let clause = templates.where_clause(&specs).unwrap();
        assert_eq!(clause, "WHERE \"id\" < 100 AND \"dt\" >= '2023-01-01'");
    }

    #[test]
    fn test_empty_filter_sequence_yields_empty_clause() {
        let templates = SqlTemplates::default();
        assert_eq!(templates.where_clause(&[]).unwrap(), "");
    }

    #[test]
    fn test_other_type_quotes_and_escapes() {
        let templates = SqlTemplates::default();
        let spec = FilterSpec::new(FilterType::Other, "name", "=", "O'Brien");
        let sql = templates.filter_sql(&spec).unwrap();
        assert_eq!(sql, "\"name\" = 'O''Brien'");
    }

    #[test]
    fn test_unsupported_filter_type_is_explicit() {
        let templates = SqlTemplates::default();
        let spec = FilterSpec {
            filter_type: "GEO".to_string(),
            column: "location".to_string(),
            value: json!("somewhere"),
            comparison: "=".to_string(),
        };
        match templates.filter_sql(&spec) {
            Err(ClientError::UnsupportedFilterType(t)) => assert_eq!(t, "GEO"),
            other => panic!("expected UnsupportedFilterType, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_date_value_is_rejected() {
        let templates = SqlTemplates::default();
        let spec = FilterSpec::new(FilterType::Date, "dt", "=", "01/02/2023");
        assert!(matches!(
            templates.filter_sql(&spec),
            Err(ClientError::InvalidFilterValue { .. })
        ));
    }

    #[test]
    fn test_int_accepts_numeric_strings() {
        let templates = SqlTemplates::default();
        let spec = FilterSpec::new(FilterType::Int, "id", ">", " 42 ");
        assert_eq!(templates.filter_sql(&spec).unwrap(), "\"id\" > 42");
    }

    #[test]
    fn test_filter_spec_deserializes_from_json() {
        let spec: FilterSpec = serde_json::from_value(json!({
            "type": "DATE",
            "column": "dt",
            "value": "2023-01-01",
            "comparison": ">="
        }))
        .unwrap();
        assert_eq!(spec.filter_type, "DATE");
        assert_eq!(spec.column, "dt");
    }

    #[test]
    fn test_identical_specs_render_identical_sql() {
        let templates = SqlTemplates::default();
        let specs = vec![
            FilterSpec::new(FilterType::Date, "dt", ">=", "2023-01-01"),
            FilterSpec::new(FilterType::Int, "id", "<", 100),
        ];
        let first = templates.where_clause(&specs).unwrap();
        let second = templates.where_clause(&specs).unwrap();
        assert_eq!(first, second);
    }
}
