//! End-to-end pipeline tests: record days into a CSV on disk, reload, render,
//! and export, exercising the same path the CLI drives.

mod common;

use std::fs;

use chrono::NaiveDate;
use tempfile::tempdir;
use tsg_common::{ColorScale, apply_and_persist, export, load, render};

use common::init_test_logging;

fn day(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_record_three_days_and_reload() {
    init_test_logging();
    let dir = tempdir().unwrap();
    let path = dir.path().join("status.csv");
    let known = names(&["Test1", "Test2", "Test3", "Test4"]);

    apply_and_persist(&path, day("2020-08-20"), &[], &known).unwrap();
    apply_and_persist(&path, day("2020-08-21"), &names(&["Test2"]), &known).unwrap();
    apply_and_persist(&path, day("2020-08-22"), &names(&["Test2", "Test4"]), &known).unwrap();

    let matrix = load(&path).unwrap();
    assert_eq!(matrix.n_days(), 3);
    assert_eq!(matrix.n_tests(), 4);
    assert_eq!(matrix.row(day("2020-08-20")).unwrap(), &[0, 0, 0, 0]);
    assert_eq!(matrix.row(day("2020-08-21")).unwrap(), &[0, 1, 0, 0]);
    assert_eq!(matrix.row(day("2020-08-22")).unwrap(), &[0, 1, 0, 1]);

    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(
        written,
        ",Test1,Test2,Test3,Test4\n\
         2020-08-20,0,0,0,0\n\
         2020-08-21,0,1,0,0\n\
         2020-08-22,0,1,0,1\n"
    );
}

#[test]
fn test_new_test_appears_mid_history_with_failed_backfill() {
    init_test_logging();
    let dir = tempdir().unwrap();
    let path = dir.path().join("status.csv");

    apply_and_persist(&path, day("2023-01-01"), &[], &names(&["suite::a"])).unwrap();
    apply_and_persist(
        &path,
        day("2023-01-02"),
        &[],
        &names(&["suite::a", "suite::b"]),
    )
    .unwrap();

    let matrix = load(&path).unwrap();
    assert_eq!(matrix.value(day("2023-01-01"), "suite::b"), Some(1));
    assert_eq!(matrix.value(day("2023-01-02"), "suite::b"), Some(0));
}

#[test]
fn test_render_and_export_html_from_disk() {
    init_test_logging();
    let dir = tempdir().unwrap();
    let stats = dir.path().join("status.csv");
    let output = dir.path().join("grid.html");
    let known = names(&["Test1", "Test2"]);

    apply_and_persist(&stats, day("2020-08-20"), &names(&["Test2"]), &known).unwrap();
    apply_and_persist(&stats, day("2020-08-21"), &[], &known).unwrap();

    let matrix = load(&stats).unwrap();
    let figure = render(&matrix, &ColorScale::default());
    export(&figure, &output, "html").unwrap();

    let html = fs::read_to_string(&output).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    // Most recent day renders first.
    let newest = html.find("2020-08-21").unwrap();
    let oldest = html.find("2020-08-20").unwrap();
    assert!(newest < oldest);
}

#[test]
fn test_export_pdf_from_disk_is_rejected() {
    init_test_logging();
    let dir = tempdir().unwrap();
    let stats = dir.path().join("status.csv");
    let output = dir.path().join("grid.pdf");

    apply_and_persist(&stats, day("2020-08-20"), &[], &names(&["Test1"])).unwrap();
    let matrix = load(&stats).unwrap();
    let figure = render(&matrix, &ColorScale::default());

    assert!(export(&figure, &output, "pdf").is_err());
    assert!(!output.exists());
}

#[test]
fn test_render_empty_history() {
    init_test_logging();
    let dir = tempdir().unwrap();
    let matrix = load(&dir.path().join("missing.csv")).unwrap();
    let figure = render(&matrix, &ColorScale::default());
    let output = dir.path().join("grid.html");
    export(&figure, &output, "html").unwrap();
    assert!(fs::read_to_string(&output).unwrap().contains("</html>"));
}
