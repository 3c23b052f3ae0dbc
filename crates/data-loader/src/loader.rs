//! CSV loading for the merged ratings dataset.
//!
//! Expected header columns (by name, extra columns ignored):
//! `userId, movieId, rating, tag, genres, title`
//!
//! The `tag` column may be absent entirely; every other column is required
//! and its absence is a fatal [`DataLoadError::MissingColumn`].

use crate::error::{DataLoadError, Result};
use crate::types::RatingRecord;
use std::fs::File;
use std::io;
use std::path::Path;

/// Columns the dataset must provide. `tag` is optional (rows without tags
/// are the common case), so it is not listed here.
const REQUIRED_COLUMNS: &[&str] = &["userId", "movieId", "rating", "genres", "title"];

/// Supported rating scale, inclusive on both ends.
pub const RATING_MIN: f32 = 0.5;
pub const RATING_MAX: f32 = 5.0;

/// Load all rating records from a CSV file on disk.
///
/// This is the main entry point for loading data. Fails fast on a missing
/// file, a malformed CSV, a missing required column, or an out-of-scale
/// rating value; there is no partial result.
pub fn load_records(path: &Path) -> Result<Vec<RatingRecord>> {
    let file = File::open(path).map_err(|_| DataLoadError::FileNotFound {
        path: path.display().to_string(),
    })?;
    read_records(io::BufReader::new(file))
}

/// Load rating records from any reader producing CSV with a header row.
///
/// Split out from [`load_records`] so tests can parse in-memory data
/// without touching the filesystem.
pub fn read_records<R: io::Read>(reader: R) -> Result<Vec<RatingRecord>> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    // Validate the header up front so a schema problem is reported as a
    // missing column, not as a row-level decode failure.
    let headers = csv_reader.headers()?.clone();
    for &column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(DataLoadError::MissingColumn {
                column: column.to_string(),
            });
        }
    }

    let mut records = Vec::new();
    for (idx, result) in csv_reader.deserialize().enumerate() {
        let record: RatingRecord = result?;
        validate_record(&record, idx + 2)?; // +2: 1-based, after the header
        records.push(record);
    }
    Ok(records)
}

/// Reject ratings outside the supported scale.
///
/// The unrated cells of the user-item matrix downstream are filled with 0.0,
/// which is only unambiguous because 0.0 can never be a real rating here.
fn validate_record(record: &RatingRecord, row: usize) -> Result<()> {
    if !record.rating.is_finite() || record.rating < RATING_MIN || record.rating > RATING_MAX {
        return Err(DataLoadError::InvalidValue {
            field: "rating".to_string(),
            row,
            value: record.rating.to_string(),
        });
    }
    Ok(())
}
