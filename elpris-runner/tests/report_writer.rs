//! Report writing against a real directory: targets are replaced together or not at all.

use elpris_core::pricing::{Extrema, HourlyRow};
use elpris_core::{LocalTimestamp, PerZone};
use elpris_runner::{ReportError, ReportPaths, ReportWriter};
use std::path::Path;

fn rows() -> Vec<HourlyRow> {
    let hour: LocalTimestamp = chrono::NaiveDate::from_ymd_opt(2025, 3, 14)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap()
        .into();
    vec![HourlyRow {
        hour,
        means: PerZone { dk1: Some(0.5), dk2: None },
    }]
}

fn no_extrema() -> PerZone<Extrema> {
    PerZone {
        dk1: Extrema::Empty,
        dk2: Extrema::Empty,
    }
}

fn entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn unwritable_extrema_target_leaves_previous_hourly_report() {
    let dir = tempfile::tempdir().unwrap();
    let hourly = dir.path().join("data.csv");
    let extrema = dir.path().join("extrema.csv");
    std::fs::write(&hourly, "OLD\n").unwrap();
    std::fs::create_dir(&extrema).unwrap();

    let writer = ReportWriter::new(ReportPaths {
        hourly: hourly.clone(),
        extrema: extrema.clone(),
    });
    let err = writer.write(&rows(), &no_extrema()).unwrap_err();

    assert!(matches!(err, ReportError::Io { ref path, .. } if *path == extrema));
    assert_eq!(std::fs::read_to_string(&hourly).unwrap(), "OLD\n");
    assert_eq!(entries(dir.path()), vec!["data.csv", "extrema.csv"]);
}

#[test]
fn successful_write_replaces_both_and_leaves_no_staging_files() {
    let dir = tempfile::tempdir().unwrap();
    let paths = ReportPaths {
        hourly: dir.path().join("out").join("data.csv"),
        extrema: dir.path().join("out").join("extrema.csv"),
    };
    std::fs::create_dir(dir.path().join("out")).unwrap();
    std::fs::write(&paths.hourly, "OLD\n").unwrap();

    let written = ReportWriter::new(paths.clone())
        .write(&rows(), &no_extrema())
        .unwrap();

    assert_eq!(written, paths);
    assert_eq!(
        std::fs::read_to_string(&paths.hourly).unwrap(),
        "Time,Jylland + Fyn,Sjælland + Øer\n2025-03-14 10:00,0.500,\n"
    );
    assert!(std::fs::read_to_string(&paths.extrema)
        .unwrap()
        .starts_with(" ,Jylland + Fyn"));
    assert_eq!(entries(&dir.path().join("out")), vec!["data.csv", "extrema.csv"]);
}
