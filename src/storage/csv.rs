use std::fs::File;
use std::io::Seek;
use std::path::Path;
use std::sync::{Arc, LazyLock};

use arrow::compute::concat_batches;
use arrow::csv::reader::Format;
use arrow::csv::ReaderBuilder;
use arrow::datatypes::{DataType, Field, Schema};
use regex::Regex;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::Table;

/// Cells read as missing: empty plus the usual NA spellings.
static NULL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(|#N/A|#N/A N/A|#NA|-1\.#IND|-1\.#QNAN|-NaN|-nan|1\.#IND|1\.#QNAN|<NA>|N/A|NA|NULL|NaN|None|n/a|nan|null)$",
    )
    .expect("null pattern is a valid regex")
});

pub struct CsvReader;

impl CsvReader {
    /// Loads the whole file, header row first, inferring column types from
    /// every row.
    pub fn read_table(path: &Path) -> Result<Table> {
        let mut file = File::open(path)?;

        let format = Format::default()
            .with_header(true)
            .with_null_regex(NULL_PATTERN.clone());
        let (inferred, records) = format.infer_schema(&mut file, None)?;
        if inferred.fields().is_empty() {
            return Err(Error::EmptyCsv(path.to_path_buf()));
        }
        file.rewind()?;

        let schema = Arc::new(numeric_or_text(&inferred));
        debug!(
            path = ?path,
            records = records,
            schema = ?schema,
            "Inferred CSV schema"
        );

        let reader = ReaderBuilder::new(schema.clone())
            .with_format(format)
            .build(file)?;
        let batches = reader.collect::<std::result::Result<Vec<_>, _>>()?;
        let batch = concat_batches(&schema, &batches)?;

        Ok(Table::new(batch))
    }
}

/// Integers and decimals keep their inferred type; every other column
/// (booleans, dates, timestamps, all-empty) is read as text.
fn numeric_or_text(inferred: &Schema) -> Schema {
    let fields: Vec<Field> = inferred
        .fields()
        .iter()
        .map(|field| match field.data_type() {
            DataType::Int64 | DataType::Float64 => {
                Field::new(field.name(), field.data_type().clone(), true)
            }
            _ => Field::new(field.name(), DataType::Utf8, true),
        })
        .collect();

    Schema::new(fields)
}
