//! Delimited-text observation tables.
//!
//! Format: one header row naming the columns, then one record per line.
//! Blank lines and lines starting with `#` are ignored. The delimiter is taken
//! from the header: comma, then semicolon, then tab, else runs of whitespace.

use std::fs;
use std::path::Path;

use super::{Observation, ObservationSet};
use crate::error::{Error, Result};

/// Observed-value column used by the magnetic survey files.
pub const DEFAULT_VALUE_COLUMN: &str = "t_obs";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Semicolon,
    Tab,
    Whitespace,
}

impl Delimiter {
    pub fn detect(header: &str) -> Self {
        if header.contains(',') {
            Self::Comma
        } else if header.contains(';') {
            Self::Semicolon
        } else if header.contains('\t') {
            Self::Tab
        } else {
            Self::Whitespace
        }
    }

    fn split(self, line: &str) -> Vec<&str> {
        let fields: Vec<&str> = match self {
            Self::Comma => line.split(',').collect(),
            Self::Semicolon => line.split(';').collect(),
            Self::Tab => line.split('\t').collect(),
            Self::Whitespace => line.split_whitespace().collect(),
        };
        fields.into_iter().map(unquote).collect()
    }
}

fn unquote(field: &str) -> &str {
    let field = field.trim();
    field
        .strip_prefix('"')
        .and_then(|f| f.strip_suffix('"'))
        .unwrap_or(field)
}

#[derive(Debug, Clone, PartialEq)]
struct Record {
    /// 1-based line number in the source text.
    line: usize,
    fields: Vec<String>,
}

/// Parsed table: column names plus raw records.
///
/// Cells are kept as text so that non-numeric columns (station names, dates)
/// do not prevent loading; numeric conversion and validation happen when a
/// column is requested.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationTable {
    headers: Vec<String>,
    records: Vec<Record>,
    delimiter: Delimiter,
}

impl ObservationTable {
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::read(path, e))?;
        let table = Self::parse(&text)?;
        log::info!(
            "Loaded {} records with columns [{}] from '{}'",
            table.records.len(),
            table.headers.join(", "),
            path.display()
        );
        Ok(table)
    }

    pub fn parse(src: &str) -> Result<Self> {
        let src = src.strip_prefix('\u{feff}').unwrap_or(src);
        let mut lines = src
            .lines()
            .enumerate()
            .map(|(i, raw)| (i + 1, raw.trim()))
            .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'));

        let (_, header) = lines.next().ok_or(Error::EmptyInput)?;
        let delimiter = Delimiter::detect(header);
        let headers: Vec<String> = delimiter
            .split(header)
            .into_iter()
            .map(str::to_string)
            .collect();

        let mut records = Vec::new();
        for (line, text) in lines {
            let fields = delimiter.split(text);
            if fields.len() != headers.len() {
                return Err(Error::FieldCount {
                    line,
                    expected: headers.len(),
                    found: fields.len(),
                });
            }
            records.push(Record {
                line,
                fields: fields.into_iter().map(str::to_string).collect(),
            });
        }

        Ok(Self {
            headers,
            records,
            delimiter,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn delimiter(&self) -> Delimiter {
        self.delimiter
    }

    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    fn column_index(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::MissingColumn {
                column: name.to_string(),
                available: self.headers.join(", "),
            })
    }

    /// Parses one column; every cell must be a finite number.
    pub fn numeric_column(&self, name: &str) -> Result<Vec<f64>> {
        let index = self.column_index(name)?;
        let column = &self.headers[index];

        self.records
            .iter()
            .map(|record| {
                let text = &record.fields[index];
                let value: f64 = text.parse().map_err(|_| Error::ParseNumber {
                    line: record.line,
                    column: column.clone(),
                    text: text.clone(),
                })?;
                if !value.is_finite() {
                    return Err(Error::NonFinite {
                        location: format!("Line {}, column '{}'", record.line, column),
                        value,
                    });
                }
                Ok(value)
            })
            .collect()
    }

    /// `(min, max)` of a numeric column, `None` for a table without records.
    pub fn value_range(&self, name: &str) -> Result<Option<(f64, f64)>> {
        let values = self.numeric_column(name)?;
        Ok(values
            .iter()
            .copied()
            .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            }))
    }

    /// Selects `x`, `y` and `value_column` as an observation set.
    pub fn observations(&self, value_column: &str) -> Result<ObservationSet> {
        let xs = self.numeric_column("x")?;
        let ys = self.numeric_column("y")?;
        let values = self.numeric_column(value_column)?;

        let records = xs
            .into_iter()
            .zip(ys)
            .zip(values)
            .map(|((x, y), value)| Observation::new(x, y, value))
            .collect();

        Ok(ObservationSet::from_validated(records))
    }
}
