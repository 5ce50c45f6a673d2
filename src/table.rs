use serde_json::Value;

/// One result row: column name → value.
pub type Record = serde_json::Map<String, Value>;

/// Minimal tabular result container: ordered column names plus row value
/// vectors. Freely convertible to and from record form; carries no
/// dependency on any external dataframe library.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataTable {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl DataTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self { columns, rows }
    }

    /// Build a table from record rows. The column set is taken from the
    /// first record; rows are expected to share it (absent keys become
    /// NULL, never an error).
    pub fn from_records(records: &[Record]) -> Self {
        let columns: Vec<String> = match records.first() {
            Some(first) => first.keys().cloned().collect(),
            None => Vec::new(),
        };
        let rows = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|col| record.get(col).cloned().unwrap_or(Value::Null))
                    .collect()
            })
            .collect();
        Self { columns, rows }
    }

    /// Convert back to record rows.
    pub fn to_records(&self) -> Vec<Record> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .cloned()
                    .zip(row.iter().cloned())
                    .collect()
            })
            .collect()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// What a backend execution yields. Backends report whichever shape their
/// driver produced naturally; the client converts after execution, so a
/// query never runs twice to satisfy both read entry points.
#[derive(Debug, Clone)]
pub enum QueryOutput {
    Records(Vec<Record>),
    Table(DataTable),
}

impl QueryOutput {
    pub fn into_records(self) -> Vec<Record> {
        match self {
            QueryOutput::Records(records) => records,
            QueryOutput::Table(table) => table.to_records(),
        }
    }

    pub fn into_table(self) -> DataTable {
        match self {
            QueryOutput::Records(records) => DataTable::from_records(&records),
            QueryOutput::Table(table) => table,
        }
    }

    pub fn num_rows(&self) -> usize {
        match self {
            QueryOutput::Records(records) => records.len(),
            QueryOutput::Table(table) => table.num_rows(),
        }
    }
}
