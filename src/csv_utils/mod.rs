// src/csv_utils/mod.rs
use anyhow::{bail, Context, Result};
use csv::ReaderBuilder;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use std::sync::Arc;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s").expect("whitespace regex"));

/// A fixed-shape record derived from a CSV header row: an ordered set of named
/// string fields, one instance per data row. Values are kept as strings; no
/// coercion or validation happens here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    fields: Arc<Vec<String>>,
    values: Vec<String>,
}

impl Record {
    fn new(fields: Arc<Vec<String>>, row: Vec<String>) -> Result<Self> {
        if row.len() != fields.len() {
            bail!(
                "row has {} fields but header has {}",
                row.len(),
                fields.len()
            );
        }
        let values = row.into_iter().map(|v| v.trim().to_string()).collect();
        Ok(Record { fields, values })
    }

    /// Field names, in header order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Field values, in header order.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Look a value up by field name.
    pub fn get(&self, field: &str) -> Option<&str> {
        let idx = self.fields.iter().position(|f| f == field)?;
        Some(&self.values[idx])
    }

    /// `(name, value)` pairs in header order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .zip(&self.values)
            .map(|(f, v)| (f.as_str(), v.as_str()))
    }
}

/// Lazy, forward-only iterator that derives field names from the first row and
/// yields one [`Record`] per remaining row.
///
/// Header cells have *all* whitespace removed (`"First Name"` → `FirstName`);
/// data values are trimmed of surrounding whitespace only. Rows are never
/// cached, so a second pass needs a fresh stream. A data row whose field count
/// differs from the header yields an error for that row.
pub struct Rows<I> {
    inner: I,
    fields: Option<Arc<Vec<String>>>,
}

impl<I> Rows<I>
where
    I: Iterator<Item = Result<Vec<String>>>,
{
    pub fn new(inner: I) -> Self {
        Rows {
            inner,
            fields: None,
        }
    }
}

/// Build [`Rows`] from an infallible stream of pre-split rows, e.g. rows
/// already held in memory.
pub fn rows_from_iter<I>(rows: I) -> Rows<impl Iterator<Item = Result<Vec<String>>>>
where
    I: IntoIterator<Item = Vec<String>>,
{
    Rows::new(rows.into_iter().map(Ok))
}

impl<I> Iterator for Rows<I>
where
    I: Iterator<Item = Result<Vec<String>>>,
{
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.fields.is_none() {
            let header = match self.inner.next()? {
                Ok(h) => h,
                Err(e) => return Some(Err(e)),
            };
            let names: Vec<String> = header
                .iter()
                .map(|h| WHITESPACE.replace_all(h, "").into_owned())
                .collect();
            self.fields = Some(Arc::new(names));
        }
        let fields = Arc::clone(self.fields.as_ref().expect("header set above"));
        match self.inner.next()? {
            Ok(row) => Some(Record::new(fields, row)),
            Err(e) => Some(Err(e)),
        }
    }
}

/// Open `path` with a CSV reader and yield [`Record`]s, i.e.:
///
/// ```no_run
/// # use junkdrawer::csv_utils::read_csv_rows;
/// for row in read_csv_rows("data.csv")? {
///     println!("{:?}", row?);
/// }
/// # anyhow::Ok(())
/// ```
///
/// The CSV reader owns dialect and quoting; this only layers the header-derived
/// record shape on top.
pub fn read_csv_rows<P: AsRef<Path>>(
    path: P,
) -> Result<Rows<impl Iterator<Item = Result<Vec<String>>>>> {
    let path = path.as_ref();
    let rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("failed to open CSV file {}", path.display()))?;
    let rows = rdr.into_records().map(|rec| {
        rec.map(|r| r.iter().map(str::to_string).collect::<Vec<String>>())
            .map_err(anyhow::Error::from)
    });
    Ok(Rows::new(rows))
}
