//! Loading of the persisted query result
//!
//! The query layer writes two files into the data directory:
//! `revenue.json` and `timesheet.json`. Each half is optional — a missing
//! or unreadable file leaves that half `None` and the affected views render
//! their empty state instead of erroring.

use std::path::{Path, PathBuf};

use crate::error::CoreError;
use crate::models::{RevenueReport, Timesheet};

pub const REVENUE_FILE: &str = "revenue.json";
pub const TIMESHEET_FILE: &str = "timesheet.json";

/// In-memory snapshot of everything the dashboard renders from
#[derive(Debug, Clone, Default)]
pub struct DataSet {
    pub revenue: Option<RevenueReport>,
    pub timesheet: Option<Timesheet>,
}

impl DataSet {
    /// Load both halves, degrading gracefully: failures are logged and the
    /// corresponding half stays `None`.
    pub fn load(data_dir: &Path) -> Self {
        let revenue = match load_revenue(&data_dir.join(REVENUE_FILE)) {
            Ok(report) => Some(report),
            Err(err) => {
                tracing::warn!(%err, "Revenue data unavailable");
                None
            }
        };

        let timesheet = match load_timesheet(&data_dir.join(TIMESHEET_FILE)) {
            Ok(sheet) => Some(sheet),
            Err(err) => {
                tracing::warn!(%err, "Timesheet data unavailable");
                None
            }
        };

        Self { revenue, timesheet }
    }

    pub fn is_empty(&self) -> bool {
        self.revenue.is_none() && self.timesheet.is_none()
    }
}

/// Strict load of the revenue query result.
///
/// A file that decodes but carries no summary collections is treated as a
/// missing section rather than an empty dashboard.
pub fn load_revenue(path: &Path) -> Result<RevenueReport, CoreError> {
    let report: RevenueReport = read_json(path)?;
    if report.financial.revenue_tracking.summaries.is_empty() {
        return Err(CoreError::MissingSection {
            section: "financial.revenueTracking.summaries".to_string(),
        });
    }
    Ok(report)
}

/// Strict load of the timesheet query result
pub fn load_timesheet(path: &Path) -> Result<Timesheet, CoreError> {
    read_json(path)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CoreError> {
    if !path.exists() {
        return Err(CoreError::FileNotFound {
            path: PathBuf::from(path),
        });
    }

    let contents = std::fs::read_to_string(path).map_err(|source| CoreError::FileRead {
        path: PathBuf::from(path),
        source,
    })?;

    serde_json::from_str(&contents).map_err(|source| CoreError::JsonParse {
        path: PathBuf::from(path),
        message: source.to_string(),
        source,
    })
}
