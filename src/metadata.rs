//! Test details encoded in recording filenames
//!
//! Test recordings are named `{type}_{date}_{index}.{ext}`, e.g.
//! `stat_20190412_3.wav`. Calibration recordings carry the reference level
//! in their second token, e.g. `cal_94_20190412.wav` for 94 dB SPL.

use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};

/// Details of a test recording
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct TestDetails {
    pub(crate) test_type: String,
    pub(crate) date: String,
    pub(crate) index: u32,
    /// Filename without extension
    pub(crate) file_stem: String,
}

fn parse_failure(path: &Path, reason: impl Into<String>) -> Error {
    Error::MetadataParseFailure {
        file: path.display().to_string(),
        reason: reason.into(),
    }
}

fn file_stem(path: &Path) -> Result<&str> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| parse_failure(path, "no file name"))
}

/// Parse `{type}_{date}_{index}` from a test recording path
pub(crate) fn parse_test_details(path: &Path) -> Result<TestDetails> {
    let stem = file_stem(path)?;
    let tokens: Vec<&str> = stem.split('_').collect();

    let [test_type, date, index] = tokens.as_slice() else {
        return Err(parse_failure(
            path,
            format!("expected 3 '_'-separated tokens (type_date_index), got {}", tokens.len()),
        ));
    };

    if test_type.is_empty() {
        return Err(parse_failure(path, "empty test type"));
    }
    if date.is_empty() {
        return Err(parse_failure(path, "empty date"));
    }

    let index = index
        .parse::<u32>()
        .map_err(|_| parse_failure(path, format!("test index '{}' is not an integer", index)))?;

    Ok(TestDetails {
        test_type: test_type.to_string(),
        date: date.to_string(),
        index,
        file_stem: stem.to_string(),
    })
}

/// Parse the reference level (dB SPL) from a calibration recording path
pub(crate) fn parse_calibration_target(path: &Path) -> Result<i32> {
    let stem = file_stem(path)?;
    let token = stem
        .split('_')
        .nth(1)
        .ok_or_else(|| parse_failure(path, "missing calibration level token"))?;

    token
        .parse::<i32>()
        .map_err(|_| parse_failure(path, format!("calibration level '{}' is not an integer", token)))
}
