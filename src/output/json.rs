use crate::model::ReportRecord;
use anyhow::Result;

pub fn format_json(record: &ReportRecord) -> Result<String> {
    Ok(serde_json::to_string(record)?)
}
