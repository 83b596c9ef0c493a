use std::io;
use std::path::Path;

use csv::ReaderBuilder;
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::Sample;

/// Failure while loading a sample from CSV.
#[derive(Debug, Error)]
pub enum SampleError {
    /// The file could not be opened or read.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// A record could not be parsed.
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),
    /// Header present, but no records follow.
    #[error("CSV file contains no data records")]
    EmptyFile,
}

impl<T: DeserializeOwned> Sample<T> {
    /// Read sample data from a CSV file with a header row.
    ///
    /// Each record is deserialized into `T`; for a plain numeric sample use a
    /// single-column file and `T = f64`.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, SampleError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Same as [`Sample::read`], from any reader.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, SampleError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let data = rdr.deserialize().collect::<Result<Vec<T>, _>>()?;
        if data.is_empty() {
            return Err(SampleError::EmptyFile);
        }

        Ok(Self { data })
    }
}
