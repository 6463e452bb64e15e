pub mod converter;
pub mod job;

pub use converter::{convert, ConvertedFiles};
pub use job::Job;
