//! Content extraction.

pub mod sample;

pub use sample::{SAMPLE_LIMIT_BYTES, TextSample, sample_bytes, sample_file};
