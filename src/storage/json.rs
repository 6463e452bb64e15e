use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use arrow::json::writer::LineDelimited;
use arrow::json::WriterBuilder;
use tracing::debug;

use crate::error::Result;
use crate::models::Table;

pub struct JsonWriter;

impl JsonWriter {
    /// Writes one JSON object per row, keys in column order. Nulls are kept as
    /// explicit `null` values so every record carries every column.
    pub fn write_table(table: &Table, output_path: &Path) -> Result<()> {
        let file = File::create(output_path)?;

        let mut writer = WriterBuilder::new()
            .with_explicit_nulls(true)
            .build::<_, LineDelimited>(BufWriter::new(file));
        writer.write(table.batch())?;
        writer.finish()?;
        writer.into_inner().flush()?;

        debug!(
            path = ?output_path,
            rows = table.num_rows(),
            "Wrote JSON lines"
        );

        Ok(())
    }
}
