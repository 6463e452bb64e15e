pub mod csv;
pub mod json;
pub mod parquet;
pub mod s3;

pub use self::csv::CsvReader;
pub use self::json::JsonWriter;
pub use self::parquet::ParquetConverter;
pub use self::s3::{build_client, list_buckets, S3Uploader};
