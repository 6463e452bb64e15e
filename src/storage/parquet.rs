use std::fs::File;
use std::path::Path;

use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;
use tracing::debug;

use crate::error::Result;
use crate::models::Table;

pub struct ParquetConverter;

impl ParquetConverter {
    /// Writes the table with its own schema as a single row group.
    pub fn write_table(table: &Table, output_path: &Path) -> Result<()> {
        let props = WriterProperties::builder()
            .set_max_row_group_size(table.num_rows().max(1))
            .build();

        let file = File::create(output_path)?;
        let mut writer = ArrowWriter::try_new(file, table.schema(), Some(props))?;
        writer.write(table.batch())?;
        let metadata = writer.close()?;

        debug!(
            path = ?output_path,
            rows = metadata.num_rows,
            row_groups = metadata.row_groups.len(),
            "Wrote Parquet file"
        );

        Ok(())
    }
}
