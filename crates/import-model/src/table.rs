//! In-memory grid of uploaded rows.
//!
//! A [`Table`] is the edit state of the wizard: every row carries the same
//! column set, in the order the first row declared it.

use indexmap::IndexMap;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::error::{ModelError, Result};

/// One row of cells, keyed by column name in column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Row(IndexMap<String, String>);

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.0.get(column).map(String::as_str)
    }

    /// Insert or replace a cell, returning the previous value.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(column.into(), value.into())
    }

    pub fn contains(&self, column: &str) -> bool {
        self.0.contains_key(column)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Row
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<'de> Deserialize<'de> for Row {
    /// Scalars other than strings are accepted and rendered as text; the
    /// parsing service emits numbers and nulls for untyped spreadsheet cells.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = IndexMap::<String, Value>::deserialize(deserializer)?;
        let mut cells = IndexMap::with_capacity(raw.len());
        for (column, value) in raw {
            let text = match value {
                Value::String(text) => text,
                Value::Null => String::new(),
                Value::Bool(flag) => flag.to_string(),
                Value::Number(number) => number.to_string(),
                Value::Array(_) | Value::Object(_) => {
                    return Err(de::Error::custom(format!(
                        "column '{column}' holds a nested value"
                    )));
                }
            };
            cells.insert(column, text);
        }
        Ok(Self(cells))
    }
}

/// Ordered rows sharing one column set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Build a table, checking that every row has the first row's columns.
    ///
    /// Rows are reordered to the first row's column order.
    pub fn from_rows(rows: Vec<Row>) -> Result<Self> {
        let Some(first) = rows.first() else {
            return Ok(Self::default());
        };
        let columns: Vec<String> = first.columns().map(str::to_string).collect();

        let mut ordered = Vec::with_capacity(rows.len());
        for (index, mut row) in rows.into_iter().enumerate() {
            if let Some(extra) = row.columns().find(|c| !columns.iter().any(|k| k == c)) {
                return Err(ModelError::UnexpectedColumn {
                    row: index,
                    column: extra.to_string(),
                });
            }
            let mut cells = IndexMap::with_capacity(columns.len());
            for column in &columns {
                let Some(value) = row.0.shift_remove(column) else {
                    return Err(ModelError::MissingColumn {
                        row: index,
                        column: column.clone(),
                    });
                };
                cells.insert(column.clone(), value);
            }
            ordered.push(Row(cells));
        }

        Ok(Self {
            columns,
            rows: ordered,
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Columns a user can see and map. Positional numeric keys are skipped.
    pub fn display_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .map(String::as_str)
            .filter(|c| !is_positional_key(c))
            .collect()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    /// Replace a single cell value.
    pub fn set_cell(&mut self, row: usize, column: &str, value: impl Into<String>) -> Result<()> {
        let len = self.rows.len();
        let target = self
            .rows
            .get_mut(row)
            .ok_or(ModelError::RowOutOfRange { row, len })?;
        let cell = target
            .0
            .get_mut(column)
            .ok_or_else(|| ModelError::UnknownColumn(column.to_string()))?;
        *cell = value.into();
        Ok(())
    }

    /// Keep only the listed `(source, target)` columns, renamed to `target`,
    /// in the listed order.
    pub fn project<S, T>(&self, selection: &[(S, T)]) -> Result<Self>
    where
        S: AsRef<str>,
        T: AsRef<str>,
    {
        for (source, _) in selection {
            if !self.has_column(source.as_ref()) {
                return Err(ModelError::UnknownColumn(source.as_ref().to_string()));
            }
        }
        let columns = selection
            .iter()
            .map(|(_, target)| target.as_ref().to_string())
            .collect();
        let rows = self
            .rows
            .iter()
            .map(|row| {
                selection
                    .iter()
                    .map(|(source, target)| {
                        let value = row.get(source.as_ref()).unwrap_or_default();
                        (target.as_ref().to_string(), value.to_string())
                    })
                    .collect()
            })
            .collect();
        Ok(Self { columns, rows })
    }
}

impl Serialize for Table {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.rows.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Table {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let rows = Vec::<Row>::deserialize(deserializer)?;
        Self::from_rows(rows).map_err(de::Error::custom)
    }
}

/// True for keys the parser emits for positional cells ("0", "1", "2.5").
///
/// Blank keys count as positional too.
pub fn is_positional_key(key: &str) -> bool {
    let trimmed = key.trim();
    if trimmed.is_empty() {
        return true;
    }
    // f64 parsing also accepts "inf" and "NaN", which are real column names.
    trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
        && trimmed.parse::<f64>().is_ok()
}
