mod human;
mod json;

pub use human::format_human;
pub use json::format_json;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::model::ReportRecord;

/// How each reported file is written to the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputMode {
    /// Coloured, human-readable line
    #[default]
    Human,
    /// One JSON object per line
    Json,
    /// Only the path of the affected file
    PathOnly,
}

impl std::str::FromStr for OutputMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" | "text" => Ok(OutputMode::Human),
            "json" => Ok(OutputMode::Json),
            "path" | "path-only" | "file-path-only" => Ok(OutputMode::PathOnly),
            _ => Err(Error::UnknownOutputMode(s.to_string())),
        }
    }
}

/// Formats `record` as a single line without the trailing newline.
///
/// Returns `None` only when a JSON record could not be serialized.
pub fn format_record(record: &ReportRecord, mode: OutputMode, color: bool) -> Option<String> {
    match mode {
        OutputMode::Json => match format_json(record) {
            Ok(line) => Some(line),
            Err(e) => {
                tracing::warn!(path = %record.file_path, error = %e, "failed to serialize report record");
                None
            }
        },
        OutputMode::PathOnly => Some(record.file_path.clone()),
        OutputMode::Human => Some(format_human(record, color)),
    }
}
