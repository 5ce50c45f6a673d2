use crate::error::{ClientError, Result};
use crate::templates::{names, SqlTemplates};

/// Semantic type of a partition column.
///
/// Only DATE and INT are valid here. OTHER is accepted for filters but not
/// for partitioning: a filter can compare an arbitrary scalar, while
/// bucketing needs a per-type expression template and none exists for
/// arbitrary values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartitionColumnType {
    Date,
    Int,
}

impl PartitionColumnType {
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "DATE" => Ok(PartitionColumnType::Date),
            "INT" => Ok(PartitionColumnType::Int),
            _ => Err(ClientError::UnsupportedPartitionType(s.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PartitionColumnType::Date => "DATE",
            PartitionColumnType::Int => "INT",
        }
    }

    fn template_name(&self) -> &'static str {
        match self {
            PartitionColumnType::Date => names::DATE_COLUMN,
            PartitionColumnType::Int => names::INT_COLUMN,
        }
    }
}

impl SqlTemplates {
    /// SQL expression exposing a column for grouped counting, aliased
    /// `partition_column`. DATE truncates to date granularity; INT passes
    /// the column through. Any other type is an error, never a fallback.
    pub fn partition_column_sql(&self, column: &str, column_type: &str) -> Result<String> {
        let column_type = PartitionColumnType::parse(column_type)?;
        Ok(self.render(
            column_type.template_name(),
            &[("partition_column", column)],
        ))
    }
}
