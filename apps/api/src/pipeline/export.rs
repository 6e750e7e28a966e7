//! Export of resume summaries as CSV or JSON.

use anyhow::{anyhow, Context};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::resume::ResumeRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Json => "application/json",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// One exported line. Unknown ids export as `Unknown,0,unknown`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    pub filename: String,
    pub score: u8,
    pub status: String,
}

impl ExportRow {
    pub fn from_record(record: Option<&ResumeRecord>) -> Self {
        match record {
            Some(r) => Self {
                filename: r.filename.clone(),
                score: r.overall_score().unwrap_or(0),
                status: r.status.as_str().to_string(),
            },
            None => Self {
                filename: "Unknown".to_string(),
                score: 0,
                status: "unknown".to_string(),
            },
        }
    }
}

/// Serialized export ready to hand back to a caller.
#[derive(Debug, Clone)]
pub struct ExportBlob {
    pub content_type: &'static str,
    pub filename: String,
    pub bytes: Bytes,
}

/// Serializes `rows` in the given order. CSV has no header and no trailing
/// newline; JSON is a pretty-printed array.
pub fn render(rows: &[ExportRow], format: ExportFormat) -> Result<ExportBlob, AppError> {
    let content = match format {
        ExportFormat::Csv => write_csv(rows)?,
        ExportFormat::Json => serde_json::to_vec_pretty(rows)
            .context("failed to serialize export rows")?,
    };

    Ok(ExportBlob {
        content_type: format.content_type(),
        filename: format!("ats_analysis_export.{}", format.extension()),
        bytes: Bytes::from(content),
    })
}

fn write_csv(rows: &[ExportRow]) -> anyhow::Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    for row in rows {
        writer.serialize(row).context("failed to write export row")?;
    }
    let mut content = writer
        .into_inner()
        .map_err(|e| anyhow!("failed to flush export rows: {}", e.error()))?;
    if content.last() == Some(&b'\n') {
        content.pop();
    }
    Ok(content)
}
