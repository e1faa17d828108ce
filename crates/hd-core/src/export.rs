//! Ticket export files.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }

    /// Path of the export endpoint relative to the API root.
    pub fn endpoint(&self) -> String {
        format!("/api/tickets/export.{}", self.extension())
    }

    /// Download name, e.g. `tickets-2026-10-16.csv`.
    pub fn file_name(&self, date: NaiveDate) -> String {
        format!("tickets-{}.{}", date.format("%Y-%m-%d"), self.extension())
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "xlsx" => Ok(ExportFormat::Xlsx),
            other => Err(format!("unsupported export format: {other}")),
        }
    }
}

/// Raw export payload as downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub format: ExportFormat,
    pub bytes: Vec<u8>,
}
