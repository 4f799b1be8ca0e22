use std::collections::BTreeSet;

use tracing::trace;

use super::rules::{VulnerabilityRule, CVE_RULES};
use crate::error::{Error, Result};
use crate::model::{Log4jVersion, Versions};

/// Reported in place of CVEs when a file has no version at all.
pub const UNKNOWN_VERSION_STATUS: &str = "unknown version - unknown CVE status";
/// Reported for each version string that could not be parsed.
pub const INVALID_VERSION_STATUS: &str = "invalid version - unknown CVE status";

/// Maps version strings onto the CVEs that affect them.
#[derive(Debug, Clone)]
pub struct CveMatcher {
    rules: &'static [VulnerabilityRule],
    disabled: BTreeSet<&'static str>,
}

impl CveMatcher {
    /// Creates a matcher over `rules`, filtering out the `disabled` CVEs.
    ///
    /// # Errors
    ///
    /// Fails if the table is empty, lists a CVE twice, or if a disabled
    /// CVE has no rule in the table.
    pub fn new(rules: &'static [VulnerabilityRule], disabled: &[&str]) -> Result<Self> {
        if rules.is_empty() {
            return Err(Error::EmptyRuleTable);
        }

        let mut seen = BTreeSet::new();
        for rule in rules {
            if !seen.insert(rule.cve) {
                return Err(Error::DuplicateRule {
                    cve: rule.cve.to_string(),
                });
            }
        }

        let disabled = disabled
            .iter()
            .map(|cve| {
                seen.get(*cve).copied().ok_or_else(|| Error::UnknownCve {
                    cve: cve.to_string(),
                })
            })
            .collect::<Result<_>>()?;

        Ok(Self { rules, disabled })
    }

    /// A matcher over the built-in table with nothing disabled.
    pub fn builtin() -> Self {
        Self {
            rules: CVE_RULES,
            disabled: BTreeSet::new(),
        }
    }

    pub fn rules(&self) -> &'static [VulnerabilityRule] {
        self.rules
    }

    pub fn is_disabled(&self, cve: &str) -> bool {
        self.disabled.contains(cve)
    }

    /// Returns the sorted, de-duplicated CVEs affecting any of `versions`.
    ///
    /// An empty set yields [`UNKNOWN_VERSION_STATUS`]. Every unparseable
    /// string adds [`INVALID_VERSION_STATUS`] without stopping the other
    /// versions from being matched.
    ///
    /// # Example
    ///
    /// ```
    /// use log4scan::checker::CveMatcher;
    ///
    /// let matcher = CveMatcher::builtin();
    /// let versions = ["2.12.2".to_string()].into_iter().collect();
    ///
    /// assert_eq!(
    ///     matcher.matched_cves(&versions),
    ///     vec!["CVE-2021-44832", "CVE-2021-45105"]
    /// );
    /// ```
    pub fn matched_cves(&self, versions: &Versions) -> Vec<String> {
        if versions.is_empty() {
            return vec![UNKNOWN_VERSION_STATUS.to_string()];
        }

        let mut found: BTreeSet<&str> = BTreeSet::new();
        for raw in versions {
            let Some(version) = Log4jVersion::parse(raw) else {
                trace!(version = %raw, "unparseable log4j version");
                found.insert(INVALID_VERSION_STATUS);
                continue;
            };
            found.extend(self.cves_for(version));
        }

        found.into_iter().map(str::to_string).collect()
    }

    /// CVEs affecting a single parsed version, in table order.
    pub fn cves_for(&self, version: Log4jVersion) -> impl Iterator<Item = &'static str> + '_ {
        self.rules
            .iter()
            .filter(move |rule| rule.affects(version) && !self.disabled.contains(rule.cve))
            .map(|rule| rule.cve)
    }
}

impl Default for CveMatcher {
    fn default() -> Self {
        Self::builtin()
    }
}
