//! CSV report artifacts: the hourly price table and the extrema summary.
//!
//! Both documents are rendered to memory first, then staged next to their
//! targets. Targets are only replaced once both staged files are on disk.

use elpris_core::pricing::{Extrema, HourlyRow, SENTINEL_TIME};
use elpris_core::{PerZone, PricePoint, Zone};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use thiserror::Error;

const TIME_HEADER: &str = "Time";
const LOWEST_LABEL: &str = "Laveste pris";
const HIGHEST_LABEL: &str = "Højeste pris";
const STAGING_SUFFIX: &str = ".partial";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to flush CSV writer: {0}")]
    Flush(String),

    #[error("CSV output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Where the two artifacts go.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportPaths {
    pub hourly: PathBuf,
    pub extrema: PathBuf,
}

pub struct ReportWriter {
    paths: ReportPaths,
}

impl ReportWriter {
    pub fn new(paths: ReportPaths) -> Self {
        Self { paths }
    }

    /// Render both reports, then replace both files once both are staged.
    pub fn write(
        &self,
        rows: &[HourlyRow],
        extrema: &PerZone<Extrema>,
    ) -> Result<ReportPaths, ReportError> {
        let hourly_csv = render_hourly_csv(rows)?;
        let extrema_csv = render_extrema_csv(extrema)?;

        let hourly_staged = stage(&self.paths.hourly, &hourly_csv)?;
        let extrema_staged = match stage(&self.paths.extrema, &extrema_csv) {
            Ok(staged) => staged,
            Err(e) => {
                discard(&hourly_staged);
                return Err(e);
            }
        };

        if let Err(e) = commit(&hourly_staged, &self.paths.hourly) {
            discard(&hourly_staged);
            discard(&extrema_staged);
            return Err(e);
        }
        tracing::info!(path = %self.paths.hourly.display(), rows = rows.len(), "hourly report written");

        if let Err(e) = commit(&extrema_staged, &self.paths.extrema) {
            discard(&extrema_staged);
            return Err(e);
        }
        tracing::info!(path = %self.paths.extrema.display(), "extrema report written");

        Ok(self.paths.clone())
    }
}

fn csv_writer() -> csv::Writer<Vec<u8>> {
    csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(vec![])
}

fn finish(wtr: csv::Writer<Vec<u8>>) -> Result<String, ReportError> {
    let data = wtr
        .into_inner()
        .map_err(|e| ReportError::Flush(e.error().to_string()))?;
    Ok(String::from_utf8(data)?)
}

/// Write `contents` to a sibling of `path` and return the staged file's path.
///
/// Fails up front if `path` cannot later be replaced by a regular file.
fn stage(path: &Path, contents: &str) -> Result<PathBuf, ReportError> {
    let io_err = |source: std::io::Error| ReportError::Io {
        path: path.to_path_buf(),
        source,
    };

    let Some(file_name) = path.file_name() else {
        return Err(io_err(std::io::Error::other("report path has no file name")));
    };
    if path.is_dir() {
        return Err(io_err(std::io::Error::other("report path is a directory")));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }

    let mut staged_name = OsString::from(file_name);
    staged_name.push(STAGING_SUFFIX);
    let staged = path.with_file_name(staged_name);

    if let Err(source) = std::fs::write(&staged, contents) {
        discard(&staged);
        return Err(io_err(source));
    }
    Ok(staged)
}

fn commit(staged: &Path, path: &Path) -> Result<(), ReportError> {
    std::fs::rename(staged, path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn discard(staged: &Path) {
    if let Err(e) = std::fs::remove_file(staged) {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!(path = %staged.display(), error = %e, "could not remove staged report");
        }
    }
}

/// Fixed-point rendering in which an exact tie rounds away from zero.
///
/// `format!("{:.N}")` breaks exact ties toward the even digit; published
/// prices round 0.125 to 0.13. Values that only look like ties in decimal
/// (1.005 is stored as 1.00499…) are not ties and round normally.
pub fn to_fixed(value: f64, places: usize) -> String {
    // No negative zero in the output.
    let value = if value == 0.0 { 0.0 } else { value };

    let doubled_unit = 2.0 * 10f64.powi(places as i32);
    let magnitude = value.abs();
    let scaled = magnitude * doubled_unit;
    let product_is_exact = magnitude.mul_add(doubled_unit, -scaled) == 0.0;
    let is_tie = product_is_exact
        && scaled < 2f64.powi(53)
        && scaled.fract() == 0.0
        && scaled % 2.0 == 1.0;

    if !is_tie {
        return format!("{value:.places$}");
    }

    let digits = ((scaled + 1.0) / 2.0) as u64;
    let sign = if value < 0.0 { "-" } else { "" };
    if places == 0 {
        return format!("{sign}{digits}");
    }
    let unit = 10u64.pow(places as u32);
    format!(
        "{}{}.{:0width$}",
        sign,
        digits / unit,
        digits % unit,
        width = places
    )
}

/// Hourly table: `Time` plus one column per zone, means to 3 decimals.
///
/// A zone with no samples in an hour gets an empty cell.
pub fn render_hourly_csv(rows: &[HourlyRow]) -> Result<String, ReportError> {
    let mut wtr = csv_writer();

    let mut header = vec![TIME_HEADER];
    header.extend(Zone::ALL.iter().map(|z| z.label()));
    wtr.write_record(&header)?;

    for row in rows {
        let mut record = vec![row.hour.to_string()];
        record.extend(
            row.means
                .iter()
                .map(|(_, mean)| mean.map(|m| to_fixed(m, 3)).unwrap_or_default()),
        );
        wtr.write_record(&record)?;
    }

    finish(wtr)
}

/// Two-row summary: lowest and highest price, with a time/price column pair per zone.
pub fn render_extrema_csv(extrema: &PerZone<Extrema>) -> Result<String, ReportError> {
    let mut wtr = csv_writer();

    let mut header = vec![" "];
    for zone in Zone::ALL {
        header.push(zone.label());
        header.push(" ");
    }
    wtr.write_record(&header)?;

    wtr.write_record(&extrema_row(LOWEST_LABEL, extrema, Extrema::min))?;
    wtr.write_record(&extrema_row(HIGHEST_LABEL, extrema, Extrema::max))?;

    finish(wtr)
}

fn extrema_row(
    label: &str,
    extrema: &PerZone<Extrema>,
    pick: fn(&Extrema) -> Option<&PricePoint>,
) -> Vec<String> {
    let mut record = vec![label.to_string()];
    for (_, ext) in extrema.iter() {
        match pick(ext) {
            Some(point) => {
                record.push(point.timestamp.to_string());
                record.push(to_fixed(point.price, 2));
            }
            None => {
                record.push(SENTINEL_TIME.to_string());
                record.push(to_fixed(0.0, 2));
            }
        }
    }
    record
}
