//! Export of the data currently on screen

use crate::value::DecodedValue;
use crate::viewer::flatten::flatten;
use crate::viewer::ViewMode;
use color_eyre::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// A downloadable file held in memory
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    pub filename: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Table mode exports CSV, every other mode pretty JSON
pub fn export(value: &DecodedValue, mode: ViewMode) -> ExportArtifact {
    if mode == ViewMode::Table {
        match to_csv(value) {
            Ok(bytes) => {
                return ExportArtifact {
                    filename: "response.csv".to_string(),
                    mime_type: "text/csv",
                    bytes,
                }
            }
            Err(e) => tracing::warn!("CSV export failed, falling back to JSON: {}", e),
        }
    }

    ExportArtifact {
        filename: "response.json".to_string(),
        mime_type: "application/json",
        bytes: value.pretty().into_bytes(),
    }
}

fn to_csv(value: &DecodedValue) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    let flat = flatten(value);

    if flat.columns.is_empty() {
        // scalar root, or an array holding only scalars
        writer.write_record(["value"])?;
        match value {
            DecodedValue::Array(items) => {
                for item in items {
                    writer.write_record([cell_text(Some(item))])?;
                }
            }
            DecodedValue::Object(_) => {}
            scalar => writer.write_record([cell_text(Some(scalar))])?,
        }
    } else {
        writer.write_record(&flat.columns)?;
        for row in 0..flat.rows.len() {
            let record: Vec<String> = (0..flat.columns.len())
                .map(|col| cell_text(flat.cell(row, col)))
                .collect();
            writer.write_record(&record)?;
        }
    }

    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}

/// Absent cells are empty; composites are compact JSON
fn cell_text(value: Option<&DecodedValue>) -> String {
    match value {
        None => String::new(),
        Some(v) if v.is_composite() => v.literal(),
        Some(v) => v.plain_text(),
    }
}

/// Write `artifact` into `dir` as `<stem>-<unix seconds>.<ext>`
pub fn save_artifact(artifact: &ExportArtifact, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;

    let (stem, ext) = artifact
        .filename
        .rsplit_once('.')
        .unwrap_or((artifact.filename.as_str(), "txt"));
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let path = dir.join(format!("{stem}-{stamp}.{ext}"));
    fs::write(&path, &artifact.bytes)?;
    Ok(path)
}
