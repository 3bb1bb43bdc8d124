//! Dense day-by-test pass/fail matrix and its update algorithm.
//!
//! The matrix is the system's sole persisted state: rows are calendar dates,
//! columns are test identifiers, and every cell is `0` (passed) or `1`
//! (failed). Column order is insertion order and is preserved so renders stay
//! stable as new tests appear. Mutation happens only through
//! [`StatusMatrix::apply_day_result`], which keeps the matrix dense: after any
//! update every (day, test) pair has a defined value.

use std::collections::HashSet;

use chrono::NaiveDate;
use tracing::debug;

use crate::errors::{Result, TsgError};

/// Cell value recorded for a failed test.
pub const FAILED: u8 = 1;
/// Cell value recorded for a passed test.
pub const PASSED: u8 = 0;

/// One day's results as reported by the caller.
///
/// `known` is the complete universe of test identifiers the caller currently
/// knows about. It may include tests never recorded before and may omit tests
/// recorded in the past; both are handled by the update algorithm. `failed`
/// must be a subset of `known`.
#[derive(Debug, Clone)]
pub struct DayResult {
    pub day: NaiveDate,
    pub failed: Vec<String>,
    pub known: Vec<String>,
}

/// Dense day-by-test boolean matrix.
///
/// Invariant: `rows.len() == days.len()` and every row has exactly
/// `tests.len()` cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusMatrix {
    tests: Vec<String>,
    days: Vec<NaiveDate>,
    rows: Vec<Vec<u8>>,
}

impl StatusMatrix {
    /// Create an empty matrix (no rows, no columns).
    pub fn new() -> Self {
        Self::default()
    }

    /// Test identifiers in column order.
    pub fn tests(&self) -> &[String] {
        &self.tests
    }

    /// Recorded days in insertion order.
    pub fn days(&self) -> &[NaiveDate] {
        &self.days
    }

    pub fn n_days(&self) -> usize {
        self.days.len()
    }

    pub fn n_tests(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty() && self.tests.is_empty()
    }

    /// Full row of cell values for a day, in column order.
    pub fn row(&self, day: NaiveDate) -> Option<&[u8]> {
        let idx = self.days.iter().position(|d| *d == day)?;
        Some(&self.rows[idx])
    }

    /// Single cell value for a (day, test) pair.
    pub fn value(&self, day: NaiveDate, test: &str) -> Option<u8> {
        let col = self.tests.iter().position(|t| t == test)?;
        self.row(day).map(|r| r[col])
    }

    /// Integrate one day's results.
    ///
    /// 1. Schema widening: every identifier in `known` not yet a column is
    ///    appended, and all pre-existing rows get [`FAILED`] for it. A test's
    ///    absence from history is treated as previously failing, never as
    ///    previously passing, so a newly introduced test does not show a
    ///    clean streak it never earned.
    /// 2. Row write: the row for `day` is created, or overwritten in place
    ///    when it exists, making repeated application with the same arguments
    ///    idempotent. Every column in `failed` gets [`FAILED`], every other
    ///    current column gets [`PASSED`].
    ///
    /// Rows stay dense by construction, so the gap-closing step of the
    /// contract has nothing left to fill.
    ///
    /// Rejects the update (leaving the matrix unchanged) when `failed` names
    /// tests absent from `known`, or when an identifier cannot be represented
    /// in the persisted table.
    pub fn apply_day_result(
        &mut self,
        day: NaiveDate,
        failed: &[String],
        known: &[String],
    ) -> Result<()> {
        // Validate everything before touching state so a rejected update
        // leaves the matrix exactly as it was.
        for name in known {
            validate_identifier(name)?;
        }
        let known_set: HashSet<&str> = known.iter().map(String::as_str).collect();
        let unknown: Vec<String> = failed
            .iter()
            .filter(|t| !known_set.contains(t.as_str()))
            .cloned()
            .collect();
        if !unknown.is_empty() {
            return Err(TsgError::UnknownFailedTests { tests: unknown });
        }

        // Schema widening with conservative back-fill.
        for name in known {
            if !self.tests.iter().any(|t| t == name) {
                self.tests.push(name.clone());
                for row in &mut self.rows {
                    row.push(FAILED);
                }
            }
        }

        // Row write, overwriting in place for an already-recorded day.
        let failed_set: HashSet<&str> = failed.iter().map(String::as_str).collect();
        let row: Vec<u8> = self
            .tests
            .iter()
            .map(|t| {
                if failed_set.contains(t.as_str()) {
                    FAILED
                } else {
                    PASSED
                }
            })
            .collect();
        match self.days.iter().position(|d| *d == day) {
            Some(idx) => self.rows[idx] = row,
            None => {
                self.days.push(day);
                self.rows.push(row);
            }
        }

        debug!(
            day = %day,
            failed = failed.len(),
            tests = self.tests.len(),
            days = self.days.len(),
            "applied day result"
        );
        Ok(())
    }

    /// Convenience form of [`apply_day_result`](Self::apply_day_result)
    /// taking a [`DayResult`].
    pub fn apply(&mut self, result: &DayResult) -> Result<()> {
        self.apply_day_result(result.day, &result.failed, &result.known)
    }

    /// Construct a matrix from already-validated parts. Used by the store
    /// after parsing a persisted file.
    pub(crate) fn from_parts(
        tests: Vec<String>,
        days: Vec<NaiveDate>,
        rows: Vec<Vec<u8>>,
    ) -> Self {
        debug_assert_eq!(days.len(), rows.len());
        debug_assert!(rows.iter().all(|r| r.len() == tests.len()));
        Self { tests, days, rows }
    }

    pub(crate) fn rows(&self) -> &[Vec<u8>] {
        &self.rows
    }
}

fn validate_identifier(name: &str) -> Result<()> {
    if name.is_empty() || name.contains(',') || name.contains('\n') || name.contains('\r') {
        return Err(TsgError::InvalidTestIdentifier {
            name: name.to_string(),
        });
    }
    Ok(())
}
