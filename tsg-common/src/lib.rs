//! Test Status Grid - shared library.
//!
//! Maintains a per-day, per-test pass/fail record persisted as a dense CSV
//! and renders it as a color-coded grid (tests as columns, days as rows) for
//! visual inspection of flakiness and regressions over time.
//!
//! The typical daily workflow is [`store::apply_and_persist`]; the typical
//! reporting workflow is [`store::load`] then [`grid::render`] then
//! [`export::export`].

#![forbid(unsafe_code)]

pub mod config;
pub mod errors;
pub mod export;
pub mod grid;
pub mod matrix;
pub mod store;

pub use config::TsgConfig;
pub use errors::{Result, TsgError};
pub use export::{ExportFormat, SUPPORTED_FORMATS, export};
pub use grid::{ColorScale, GridFigure, render};
pub use matrix::{DayResult, StatusMatrix};
pub use store::{apply_and_persist, load, save};
