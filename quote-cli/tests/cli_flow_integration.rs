//! Integration tests that drive the command handlers with on-disk fixtures
//! and config files, the way the `ssik` binary does.

use std::{
    fs,
    path::{Path, PathBuf},
};

use pretty_assertions::assert_eq;
use quote_cli::{app, config::AppConfig};
use quote_core::{Catalogue, CourseDuration};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_batch_fixture_quotes_every_row() {
    let text = app::batch_file(Catalogue::standard(), &fixture("enrolments.csv"))
        .expect("fixture file should load without error");

    assert!(text.contains("Row 1: Thandi Mokoena\n"));
    assert!(text.contains("R1725.00"));
    assert!(text.contains("R3881.25"));
    assert!(text.contains("R8064.38"));
    assert!(text.ends_with("Quoted 3 enrolment(s).\n"));
}

#[test]
fn test_batch_fixture_flags_bad_email() {
    let text = app::batch_file(Catalogue::standard(), &fixture("enrolments.csv")).unwrap();

    assert_eq!(text.matches("  ! ").count(), 1);
    assert!(text.contains("'lerato@example' is not a valid email address"));
}

#[test]
fn test_batch_missing_file_is_an_error() {
    let result = app::batch_file(Catalogue::standard(), &fixture("missing.csv"));

    assert!(result.is_err());
}

#[test]
fn test_config_points_at_catalogue_file() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("ssik.toml");
    let csv = fixture("catalogue.csv");
    fs::write(
        &config_path,
        format!("[catalogue]\nfile = {:?}\n", csv.display().to_string()),
    )
    .unwrap();

    let config = AppConfig::load_or_default(Some(&config_path)).unwrap();
    let catalogue = app::load_catalogue(&config.catalogue).unwrap();

    assert_eq!(catalogue.courses().len(), 2);
    assert_eq!(
        app::courses(&catalogue, Some(CourseDuration::SixWeeks)).lines().count(),
        2
    );
}

#[test]
fn test_quote_against_loaded_catalogue() {
    let config = AppConfig::from_toml(&format!(
        "[catalogue]\nfile = {:?}\n",
        fixture("catalogue.csv").display().to_string()
    ))
    .unwrap();
    let catalogue = app::load_catalogue(&config.catalogue).unwrap();

    let text = app::quote(&catalogue, &[], &[CourseDuration::SixWeeks, CourseDuration::SixMonths])
        .unwrap();

    // Plumbing has no fee in the fixture and is priced at zero.
    assert!(text.contains("Plumbing"));
    assert!(text.contains("Discount (5%)"));
    assert!(text.lines().last().unwrap().ends_with("R983.25"));
}

#[test]
fn test_unknown_course_from_loaded_catalogue() {
    let config = AppConfig::from_toml(&format!(
        "[catalogue]\nfile = {:?}\n",
        fixture("catalogue.csv").display().to_string()
    ))
    .unwrap();
    let catalogue = app::load_catalogue(&config.catalogue).unwrap();

    assert_eq!(app::course(&catalogue, "first-aid"), "Course Not Found\n");
}
