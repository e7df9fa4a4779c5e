//! Integration tests: engine output written as a text table

use std::fs;
use std::path::Path;

use approx::assert_relative_eq;
use tempfile::tempdir;
use transit_rs::output::{export_light_curve, ExportError, Exporter, TableConfig, TableExporter, TableMetadata};
use transit_rs::physics::constants::R_JUPITER;
use transit_rs::solver::{LightCurve, LightCurveEngine};

mod common;
use common::{create_architecture, create_grid, escaping_sodium, sodium_lines};

fn computed_curve() -> LightCurve {
    let arch = create_architecture(R_JUPITER);
    let grid = create_grid(0.05, 4);
    let lines = sodium_lines();
    let scenarios = vec![escaping_sodium(1e31)];
    LightCurveEngine::new(&arch, &grid, &scenarios, &lines).run().unwrap()
}

/// Data rows of a table file, parsed back into numbers
fn read_rows(path: &Path, delimiter: &str) -> Vec<Vec<f64>> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .filter(|line| !line.starts_with('#'))
        .map(|line| {
            line.split(delimiter)
                .filter(|field| !field.is_empty())
                .map(|field| field.trim().parse::<f64>().unwrap())
                .collect()
        })
        .collect()
}

#[test]
fn test_table_has_header_and_one_row_per_phase() {
    let curve = computed_curve();
    let dir = tempdir().unwrap();
    let path = dir.path().join("curve.txt");

    export_light_curve(&curve, &path, None).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let header = content.lines().next().unwrap();
    assert_eq!(
        header,
        "# Orbital phase, Light curve at 5889.95 Å, Light curve at 5895.92 Å, Light curve at 5800 Å"
    );

    let rows = read_rows(&path, " ");
    assert_eq!(rows.len(), 4);
    assert!(rows.iter().all(|row| row.len() == 4));
}

#[test]
fn test_table_values_round_trip_at_full_precision() {
    let curve = computed_curve();
    let dir = tempdir().unwrap();
    let path = dir.path().join("curve.txt");

    export_light_curve(&curve, &path, Some(&TableConfig::default().precision(17))).unwrap();

    let rows = read_rows(&path, " ");
    for (p, row) in rows.iter().enumerate() {
        assert_relative_eq!(row[0], curve.orbit_fractions()[p], max_relative = 1e-15);
        for (w, &value) in row[1..].iter().enumerate() {
            assert_relative_eq!(value, curve.depth()[[p, w]], max_relative = 1e-15);
        }
    }
}

#[test]
fn test_phase_column_is_fraction_of_orbit() {
    let curve = computed_curve();
    let dir = tempdir().unwrap();
    let path = dir.path().join("curve.txt");

    export_light_curve(&curve, &path, None).unwrap();

    let rows = read_rows(&path, " ");
    // Phase grid ±0.05 rad in four cells: first centre at −0.0375 rad
    assert_relative_eq!(rows[0][0], -0.0375 / (2.0 * std::f64::consts::PI), max_relative = 1e-12);
    assert_relative_eq!(rows[0][0], -rows[3][0], max_relative = 1e-12);
}

#[test]
fn test_metadata_block_precedes_header() {
    let curve = computed_curve();
    let dir = tempdir().unwrap();
    let path = dir.path().join("curve.txt");

    let mut metadata = TableMetadata::from_setup("wasp49b_sodium");
    metadata.scenarios = vec!["escaping".to_string()];
    metadata.add_custom("Observer".to_string(), "integration test".to_string());
    let config = TableConfig::default().precision(6).with_metadata(metadata);

    export_light_curve(&curve, &path, Some(&config)).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let comments: Vec<&str> = content.lines().take_while(|line| line.starts_with('#')).collect();
    assert!(comments[0].contains("Transit Light Curve"));
    assert!(comments.iter().any(|line| line.contains("wasp49b_sodium")));
    assert!(comments.iter().any(|line| line.contains("integration test")));
    assert!(comments.last().unwrap().starts_with("# Orbital phase"));

    // 6 digits after the decimal point in scientific notation
    let first_row = content.lines().find(|line| !line.starts_with('#')).unwrap();
    let first_field = first_row.split(' ').next().unwrap();
    let mantissa = first_field.split('e').next().unwrap();
    assert_eq!(mantissa.split('.').nth(1).unwrap().len(), 6);
}

#[test]
fn test_exporter_trait() {
    let curve = computed_curve();
    let dir = tempdir().unwrap();
    let exporter = TableExporter::new(TableConfig::default().delimiter(", "));
    let path = dir.path().join(format!("curve.{}", exporter.extension()));

    exporter.export(&curve, &path).unwrap();

    let rows = read_rows(&path, ",");
    assert_eq!(rows.len(), curve.len());
}

#[test]
fn test_export_to_missing_directory_fails() {
    let curve = computed_curve();
    let error = export_light_curve(&curve, "/nonexistent/dir/curve.txt", None).unwrap_err();
    assert!(matches!(error, ExportError::Io { .. }));
}
