use serde::{Deserialize, Serialize};

/// A single reported file, ready to be formatted.
///
/// Serializes to the JSON line shape consumed downstream:
/// `message`, `filePath`, `cvesDetected`, `findings`, `log4jVersions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRecord {
    pub message: String,
    pub file_path: String,
    pub cves_detected: Vec<String>,
    /// Machine keys of the detection signals, in priority order.
    pub findings: Vec<String>,
    /// Human-readable detection reasons, parallel to `findings`.
    #[serde(skip)]
    pub reasons: Vec<String>,
    #[serde(rename = "log4jVersions")]
    pub log4j_versions: Vec<String>,
}

impl ReportRecord {
    pub fn new(
        file_path: impl Into<String>,
        cves_detected: Vec<String>,
        findings: Vec<String>,
        reasons: Vec<String>,
        log4j_versions: Vec<String>,
    ) -> Self {
        Self {
            message: format!("{} detected", cves_detected.join(", ")),
            file_path: file_path.into(),
            cves_detected,
            findings,
            reasons,
            log4j_versions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ReportRecord {
        ReportRecord::new(
            "/opt/app/lib/log4j-core-2.14.1.jar",
            vec!["CVE-2021-44228".to_string(), "CVE-2021-45046".to_string()],
            vec!["jarName".to_string()],
            vec!["jar name matched".to_string()],
            vec!["2.14.1".to_string()],
        )
    }

    #[test]
    fn test_message_joins_cves() {
        assert_eq!(sample().message, "CVE-2021-44228, CVE-2021-45046 detected");
    }

    #[test]
    fn test_json_field_names() {
        let value = serde_json::to_value(sample()).unwrap();
        let obj = value.as_object().unwrap();

        let mut keys: Vec<_> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec!["cvesDetected", "filePath", "findings", "log4jVersions", "message"]
        );
        assert_eq!(obj["filePath"], "/opt/app/lib/log4j-core-2.14.1.jar");
        assert_eq!(obj["log4jVersions"][0], "2.14.1");
    }

    #[test]
    fn test_empty_lists_serialize_as_arrays() {
        let record = ReportRecord::new("a.jar", vec![], vec![], vec![], vec![]);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"message":" detected","filePath":"a.jar","cvesDetected":[],"findings":[],"log4jVersions":[]}"#
        );
    }
}
