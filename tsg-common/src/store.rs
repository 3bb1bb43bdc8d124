//! Persistence for the status matrix.
//!
//! The on-disk format is a plain dense CSV: the first column is the day key
//! in `YYYY-MM-DD` form (empty header cell), followed by one column per test
//! identifier, cells `0` or `1`. Absence of the file is a valid input and
//! loads as the empty matrix.
//!
//! Saves replace the destination via a sibling temp file and rename, so a
//! crash mid-write never corrupts previously persisted state. There is no
//! cross-process locking: concurrent updaters of the same file race and the
//! last writer wins.

use std::fs;
use std::io;
use std::path::Path;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::errors::{Result, TsgError};
use crate::matrix::StatusMatrix;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Read a persisted status matrix.
///
/// A missing file yields an empty matrix (0 rows, 0 columns) rather than an
/// error; any other read failure, malformed date, or malformed cell is
/// propagated.
pub fn load(path: &Path) -> Result<StatusMatrix> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no status file, starting from empty matrix");
            return Ok(StatusMatrix::new());
        }
        Err(e) => return Err(TsgError::io(path, e)),
    };
    let matrix = parse(&text)?;
    debug!(
        path = %path.display(),
        days = matrix.n_days(),
        tests = matrix.n_tests(),
        "loaded status matrix"
    );
    Ok(matrix)
}

/// Serialize the full dense matrix to `path`.
///
/// Writes the day index as the leading key column and one column per test in
/// the matrix's current column order. All-or-nothing at the file level.
pub fn save(matrix: &StatusMatrix, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| TsgError::io(parent, e))?;
    }
    write_atomic(path, &serialize(matrix))?;
    info!(
        path = %path.display(),
        days = matrix.n_days(),
        tests = matrix.n_tests(),
        "saved status matrix"
    );
    Ok(())
}

/// Load the matrix from `path`, integrate one day's results, and save it
/// back. The common "record today's results" workflow.
///
/// Not atomic across process crashes: a crash between load and save loses
/// the update but never corrupts the previously persisted file.
pub fn apply_and_persist(
    path: &Path,
    day: NaiveDate,
    failed: &[String],
    known: &[String],
) -> Result<StatusMatrix> {
    let mut matrix = load(path)?;
    matrix.apply_day_result(day, failed, known)?;
    save(&matrix, path)?;
    Ok(matrix)
}

fn serialize(matrix: &StatusMatrix) -> String {
    let mut out = String::new();
    // Leading empty header cell for the unnamed day index. An empty matrix
    // writes a bare newline so it reloads as 0 columns, not one empty name.
    if !matrix.tests().is_empty() {
        out.push(',');
        out.push_str(&matrix.tests().join(","));
    }
    out.push('\n');
    for (day, row) in matrix.days().iter().zip(matrix.rows()) {
        out.push_str(&day.format(DATE_FORMAT).to_string());
        for cell in row {
            out.push(',');
            out.push_str(if *cell == 0 { "0" } else { "1" });
        }
        out.push('\n');
    }
    out
}

fn parse(text: &str) -> Result<StatusMatrix> {
    let mut lines = text.lines();
    let Some(header) = lines.next() else {
        return Ok(StatusMatrix::new());
    };
    // The first header field is the unnamed index column; its content is
    // ignored, matching how the file is written.
    let tests: Vec<String> = header.split(',').skip(1).map(str::to_string).collect();

    let mut days = Vec::new();
    let mut rows = Vec::new();
    for (idx, line) in lines.enumerate() {
        if line.is_empty() {
            continue;
        }
        // Header is line 1.
        let line_no = idx + 2;
        let mut fields = line.split(',');
        let key = fields.next().unwrap_or_default();
        let day = NaiveDate::parse_from_str(key, DATE_FORMAT).map_err(|source| {
            TsgError::MalformedDate {
                value: key.to_string(),
                source,
            }
        })?;

        let mut row = Vec::with_capacity(tests.len());
        for (col, field) in fields.enumerate() {
            match field {
                "0" => row.push(0),
                "1" => row.push(1),
                other => {
                    let column = tests
                        .get(col)
                        .cloned()
                        .unwrap_or_else(|| format!("#{}", col + 1));
                    return Err(TsgError::MalformedCell {
                        column,
                        value: other.to_string(),
                    });
                }
            }
        }
        if row.len() != tests.len() {
            return Err(TsgError::MalformedRow {
                line: line_no,
                expected: tests.len(),
                found: row.len(),
            });
        }
        days.push(day);
        rows.push(row);
    }
    Ok(StatusMatrix::from_parts(tests, days, rows))
}

/// Write `contents` to `path` via a sibling temp file and rename, so readers
/// never observe a half-written file.
pub(crate) fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "out".to_string());
    let tmp = path.with_file_name(format!(".{file_name}.tmp"));
    fs::write(&tmp, contents).map_err(|e| TsgError::io(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| TsgError::io(path, e))?;
    Ok(())
}
