use std::collections::BTreeMap;

/// Joiner placed between filter fragments.
pub const FILTER_JOINER: &str = " AND ";

/// Keyword prefixed (once) to a non-empty predicate.
pub const WHERE_KEYWORD: &str = "WHERE";

/// Template names recognized by the registry.
pub mod names {
    /// Base count query over a schema-qualified table.
    pub const COUNT: &str = "count";
    /// `COUNT(*)` aliased to a caller-chosen name.
    pub const COUNT_STAR: &str = "count_star";
    /// Schema-qualified table reference.
    pub const TABLE_OBJECT: &str = "table_object";
    /// Date partition expression, aliased `partition_column`.
    pub const DATE_COLUMN: &str = "date_column";
    /// Integer partition expression, aliased `partition_column`.
    pub const INT_COLUMN: &str = "int_column";
    /// Count grouped by the partition expression.
    pub const PARTITION_COUNT: &str = "partition_count";
}

const DEFAULT_QUOTE: char = '"';

const DEFAULTS: &[(&str, &str)] = &[
    (
        names::COUNT,
        "SELECT COUNT(1) {q}rows{q}{aggregate_cols} FROM {q}{schema}{q}.{q}{table}{q}{where}",
    ),
    (names::COUNT_STAR, "COUNT(*) {q}{name}{q}"),
    (names::TABLE_OBJECT, "{q}{schema}{q}.{q}{table}{q}"),
    (
        names::DATE_COLUMN,
        "DATE({q}{partition_column}{q}) {q}partition_column{q}",
    ),
    (
        names::INT_COLUMN,
        "{q}{partition_column}{q} {q}partition_column{q}",
    ),
    (
        names::PARTITION_COUNT,
        "SELECT COUNT(1) {q}rows{q}, {partition_column} FROM {q}{schema}{q}.{q}{table}{q}{where} GROUP BY {q}partition_column{q}",
    ),
];

/// Per-dialect SQL template registry.
///
/// Templates are plain format strings with named `{slot}` holes; no
/// execution happens here. A backend variant overrides individual entries
/// (or the quote character) to match its dialect without touching callers.
#[derive(Debug, Clone)]
pub struct SqlTemplates {
    quote: char,
    entries: BTreeMap<&'static str, String>,
}

impl Default for SqlTemplates {
    fn default() -> Self {
        Self::new(DEFAULT_QUOTE)
    }
}

impl SqlTemplates {
    pub fn new(quote: char) -> Self {
        let entries = DEFAULTS
            .iter()
            .map(|(name, template)| (*name, (*template).to_string()))
            .collect();
        Self { quote, entries }
    }

    /// Replace the identifier quote character.
    pub fn with_quote(mut self, quote: char) -> Self {
        self.quote = quote;
        self
    }

    /// Override a single template entry.
    pub fn with_template(mut self, name: &'static str, template: impl Into<String>) -> Self {
        self.entries.insert(name, template.into());
        self
    }

    /// Merge a set of overrides into the registry.
    pub fn with_templates<I, S>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, S)>,
        S: Into<String>,
    {
        for (name, template) in overrides {
            self.entries.insert(name, template.into());
        }
        self
    }

    pub fn quote_char(&self) -> char {
        self.quote
    }

    /// Wrap an identifier (schema, table, column, alias) in the configured
    /// quote character. Every identifier that reaches generated SQL goes
    /// through here.
    pub fn quote_ident(&self, ident: &str) -> String {
        format!("{q}{ident}{q}", q = self.quote, ident = ident)
    }

    pub fn template(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Render a template by name, substituting `{q}` plus the given slots.
    pub fn render(&self, name: &str, slots: &[(&str, &str)]) -> String {
        let template = self.template(name).unwrap_or_default();
        let quote = self.quote.to_string();
        let mut out = template.replace("{q}", &quote);
        for (slot, value) in slots {
            out = out.replace(&format!("{{{slot}}}"), value);
        }
        out
    }

    /// Schema-qualified table reference.
    pub fn table_object(&self, schema: &str, table: &str) -> String {
        self.render(names::TABLE_OBJECT, &[("schema", schema), ("table", table)])
    }

    /// `COUNT(*)` aliased to `name`.
    pub fn count_star(&self, name: &str) -> String {
        self.render(names::COUNT_STAR, &[("name", name)])
    }

    /// Base count query. `aggregate_cols` are extra aggregate expressions
    /// (already rendered, e.g. `MAX({q}id{q}) {q}max_id{q}`); `where_clause`
    /// is the full clause including the `WHERE` keyword, or empty.
    pub fn count_query(&self, schema: &str, table: &str, aggregate_cols: &str, where_clause: &str) -> String {
        let aggregate_cols = if aggregate_cols.is_empty() {
            String::new()
        } else {
            format!(", {aggregate_cols}")
        };
        let where_clause = if where_clause.is_empty() {
            String::new()
        } else {
            format!(" {where_clause}")
        };
        self.render(
            names::COUNT,
            &[
                ("schema", schema),
                ("table", table),
                ("aggregate_cols", &aggregate_cols),
                ("where", &where_clause),
            ],
        )
    }

    /// Count grouped by a pre-rendered partition expression.
    pub fn partition_count_query(
        &self,
        schema: &str,
        table: &str,
        partition_column_sql: &str,
        where_clause: &str,
    ) -> String {
        let where_clause = if where_clause.is_empty() {
            String::new()
        } else {
            format!(" {where_clause}")
        };
        self.render(
            names::PARTITION_COUNT,
            &[
                ("schema", schema),
                ("table", table),
                ("partition_column", partition_column_sql),
                ("where", &where_clause),
            ],
        )
    }
}
