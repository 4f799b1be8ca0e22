use crate::model::ReportRecord;

const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

pub fn format_human(record: &ReportRecord, color: bool) -> String {
    let line = format!(
        "[MATCH] {} in file {}. log4j versions: {}. Reasons: {}",
        record.message,
        record.file_path,
        record.log4j_versions.join(", "),
        record.reasons.join(", ")
    );
    if color {
        format!("{YELLOW}{line}{RESET}")
    } else {
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ReportRecord {
        ReportRecord::new(
            "/srv/app.jar",
            vec!["CVE-2021-44228".to_string(), "CVE-2021-45046".to_string()],
            vec!["jndiLookupClassName".to_string(), "jarName".to_string()],
            vec![
                "JndiLookup class name matched".to_string(),
                "jar name matched".to_string(),
            ],
            vec!["2.14.0".to_string(), "2.14.1".to_string()],
        )
    }

    #[test]
    fn test_plain_line() {
        assert_eq!(
            format_human(&record(), false),
            "[MATCH] CVE-2021-44228, CVE-2021-45046 detected in file /srv/app.jar. \
             log4j versions: 2.14.0, 2.14.1. \
             Reasons: JndiLookup class name matched, jar name matched"
        );
    }

    #[test]
    fn test_colored_line_wraps_plain_line() {
        let plain = format_human(&record(), false);
        assert_eq!(format_human(&record(), true), format!("\x1b[33m{plain}\x1b[0m"));
    }

    #[test]
    fn test_empty_reasons() {
        let record = ReportRecord::new("x.jar", vec!["CVE-2021-44228".to_string()], vec![], vec![], vec![]);
        assert_eq!(
            format_human(&record, false),
            "[MATCH] CVE-2021-44228 detected in file x.jar. log4j versions: . Reasons: "
        );
    }
}
