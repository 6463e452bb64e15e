use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{Error, Result};
use crate::storage::{CsvReader, JsonWriter, ParquetConverter};

pub const CSV_SUFFIX: &str = ".csv";
pub const OUTPUT_BASENAME: &str = "international_education_costs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedFiles {
    pub json_path: PathBuf,
    pub parquet_path: PathBuf,
    pub rows: usize,
}

/// Reads `csv_path` and writes `<OUTPUT_BASENAME>.json` (JSON lines) and
/// `<OUTPUT_BASENAME>.parquet` into `output_dir`, creating it if needed.
/// Existing files are overwritten.
pub fn convert(csv_path: &Path, output_dir: &Path) -> Result<ConvertedFiles> {
    if !output_dir.exists() {
        println!(
            "Output directory {} does not exist. Creating it.",
            output_dir.display()
        );
    }
    fs::create_dir_all(output_dir)?;

    if !csv_path.to_string_lossy().ends_with(CSV_SUFFIX) {
        return Err(Error::InvalidInputFormat(csv_path.to_path_buf()));
    }
    if !csv_path.exists() {
        return Err(Error::FileNotFound(csv_path.to_path_buf()));
    }

    println!("Reading CSV file {}", csv_path.display());
    let table = CsvReader::read_table(csv_path)?;
    info!(
        path = ?csv_path,
        rows = table.num_rows(),
        columns = table.num_columns(),
        "Loaded CSV"
    );

    let json_path = output_dir.join(format!("{OUTPUT_BASENAME}.json"));
    JsonWriter::write_table(&table, &json_path)?;

    let parquet_path = output_dir.join(format!("{OUTPUT_BASENAME}.parquet"));
    ParquetConverter::write_table(&table, &parquet_path)?;

    Ok(ConvertedFiles {
        json_path,
        parquet_path,
        rows: table.num_rows(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::datatypes::DataType;
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

    const COSTS_CSV: &str = "country,tuition_usd\nUSA,20000\nBrazil,5000\n";

    fn write_input(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_country_tuition_scenario() {
        let dir = tempfile::tempdir().unwrap();
        let csv = write_input(dir.path(), "costs.csv", COSTS_CSV);
        let output = dir.path().join("output");

        let files = convert(&csv, &output).unwrap();
        assert_eq!(files.rows, 2);
        assert_eq!(files.json_path, output.join("international_education_costs.json"));
        assert_eq!(files.parquet_path, output.join("international_education_costs.parquet"));

        let json = fs::read_to_string(&files.json_path).unwrap();
        let records: Vec<serde_json::Value> = json
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(
            records,
            vec![
                serde_json::json!({"country": "USA", "tuition_usd": 20000}),
                serde_json::json!({"country": "Brazil", "tuition_usd": 5000}),
            ]
        );

        let builder =
            ParquetRecordBatchReaderBuilder::try_new(fs::File::open(&files.parquet_path).unwrap())
                .unwrap();
        let schema = builder.schema().clone();
        assert_eq!(schema.field_with_name("country").unwrap().data_type(), &DataType::Utf8);
        assert_eq!(schema.field_with_name("tuition_usd").unwrap().data_type(), &DataType::Int64);
        assert_eq!(builder.metadata().file_metadata().num_rows(), 2);
    }

    #[test]
    fn test_json_has_n_records_of_m_fields() {
        let dir = tempfile::tempdir().unwrap();
        let csv = write_input(
            dir.path(),
            "wide.csv",
            "country,city,university,tuition_usd,rent_usd\n\
             UK,London,Imperial,35000,2200\n\
             Germany,Munich,TUM,0,1100\n\
             Japan,Tokyo,UTokyo,5200,950\n\
             Canada,Toronto,UofT,41000,1800\n",
        );

        let files = convert(&csv, &dir.path().join("out")).unwrap();

        let json = fs::read_to_string(&files.json_path).unwrap();
        let lines: Vec<&str> = json.lines().collect();
        assert_eq!(lines.len(), 4);
        for line in lines {
            let record: serde_json::Map<String, serde_json::Value> =
                serde_json::from_str(line).unwrap();
            let keys: Vec<&str> = record.keys().map(String::as_str).collect();
            assert_eq!(keys.len(), 5);
            for column in ["country", "city", "university", "tuition_usd", "rent_usd"] {
                assert!(keys.contains(&column), "missing {column}");
            }
        }
    }

    #[test]
    fn test_parquet_reads_back_as_loaded_table() {
        let dir = tempfile::tempdir().unwrap();
        let csv = write_input(
            dir.path(),
            "costs.csv",
            "Country,City,Tuition_USD,Living_Cost_Index,Rent_USD\n\
             USA,Boston,55400,83.5,2200\n\
             Brazil,Sao Paulo,0,48.2,NA\n\
             Japan,,5200,76.4,950\n",
        );

        let files = convert(&csv, &dir.path().join("out")).unwrap();
        let loaded = CsvReader::read_table(&csv).unwrap();

        let builder =
            ParquetRecordBatchReaderBuilder::try_new(fs::File::open(&files.parquet_path).unwrap())
                .unwrap();
        assert_eq!(builder.schema().fields(), loaded.schema().fields());

        let batches = builder
            .build()
            .unwrap()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap();
        let read_back = arrow::compute::concat_batches(&loaded.schema(), &batches).unwrap();

        assert_eq!(read_back.num_rows(), 3);
        assert_eq!(read_back.num_columns(), 5);
        assert_eq!(read_back.columns(), loaded.batch().columns());
    }

    #[test]
    fn test_zero_byte_csv_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let csv = write_input(dir.path(), "empty.csv", "");
        let output = dir.path().join("out");

        let err = convert(&csv, &output).unwrap_err();
        assert!(matches!(err, Error::EmptyCsv(ref p) if *p == csv));
        assert!(!output.join("international_education_costs.json").exists());
        assert!(!output.join("international_education_costs.parquet").exists());
    }

    #[test]
    fn test_txt_input_is_rejected_before_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does-not-exist.txt");

        let err = convert(&path, &dir.path().join("out")).unwrap_err();
        assert!(matches!(err, Error::InvalidInputFormat(ref p) if *p == path));
    }

    #[test]
    fn test_missing_csv_is_file_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.csv");

        let err = convert(&path, &dir.path().join("out")).unwrap_err();
        assert!(matches!(err, Error::FileNotFound(ref p) if *p == path));
    }

    #[test]
    fn test_creates_nested_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let csv = write_input(dir.path(), "costs.csv", COSTS_CSV);
        let output = dir.path().join("a").join("b").join("c");

        convert(&csv, &output).unwrap();
        assert!(output.join("international_education_costs.parquet").exists());
    }

    #[test]
    fn test_rerun_overwrites_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("output");
        let csv = write_input(dir.path(), "costs.csv", COSTS_CSV);
        convert(&csv, &output).unwrap();

        write_input(dir.path(), "costs.csv", "country,tuition_usd\nPeru,3000\n");
        let files = convert(&csv, &output).unwrap();

        assert_eq!(files.rows, 1);
        let json = fs::read_to_string(&files.json_path).unwrap();
        assert_eq!(json.lines().count(), 1);
        assert!(json.contains("Peru"));
    }
}
