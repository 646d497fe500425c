//! Handles exporting the collection to a file or any writer.
//!
//! An empty collection is reported as [`EngineError::NothingToExport`] before
//! anything is written, so no empty file is ever created.

use std::{fmt, fs, io::Write, path::Path, str::FromStr};

use csv::Writer;

use crate::{EngineError, Record, ResultEngine};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    /// Same layout as the data file.
    #[default]
    Json,
    /// One row per record with an `id,date,coffee,books,trips` header.
    Csv,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }

    /// File name used when the caller gives a directory or nothing at all.
    pub fn default_file_name(self) -> String {
        format!("habits.{}", self.extension())
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(EngineError::UnknownOption(format!(
                "export format \"{other}\" (expected json or csv)"
            ))),
        }
    }
}

/// Serialize `records` in `format`.
pub fn render(records: &[Record], format: ExportFormat) -> ResultEngine<Vec<u8>> {
    if records.is_empty() {
        return Err(EngineError::NothingToExport);
    }

    match format {
        ExportFormat::Json => Ok(serde_json::to_vec_pretty(records)?),
        ExportFormat::Csv => {
            let mut writer = Writer::from_writer(vec![]);
            for record in records {
                writer.serialize(record)?;
            }
            writer
                .into_inner()
                .map_err(|err| EngineError::Io(err.into_error()))
        }
    }
}

pub fn export_to_writer<W: Write>(
    records: &[Record],
    format: ExportFormat,
    mut out: W,
) -> ResultEngine<usize> {
    let data = render(records, format)?;
    out.write_all(&data)?;
    out.flush()?;
    tracing::info!("exported {} records as {format}", records.len());
    Ok(records.len())
}

/// Write the export to `path`. When `path` is an existing directory the file
/// is named after [`ExportFormat::default_file_name`]. Returns the final path.
pub fn export_to_path(
    records: &[Record],
    format: ExportFormat,
    path: &Path,
) -> ResultEngine<std::path::PathBuf> {
    let data = render(records, format)?;
    let target = if path.is_dir() {
        path.join(format.default_file_name())
    } else {
        path.to_path_buf()
    };
    if let Some(parent) = target.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(&target, data)?;
    tracing::info!(
        "exported {} records as {format} to {}",
        records.len(),
        target.display()
    );
    Ok(target)
}
