//! Suppression, counting and output of matched files.
//!
//! A [`Reporter`] is built once per scan and shared by every worker that
//! inspects files. Each call to [`Reporter::collect`] decides whether the
//! file is worth reporting, counts it, and writes one line to the sink.
//!
//! # Example
//!
//! ```
//! use log4scan::{Config, Finding, Reporter, Versions};
//!
//! let reporter = Reporter::new(Config::default())?;
//! let versions: Versions = ["2.14.1".to_string()].into_iter().collect();
//!
//! reporter.collect("/opt/app/log4j-core-2.14.1.jar", Finding::JAR_NAME, &versions);
//! assert_eq!(reporter.count(), 1);
//! # Ok::<(), log4scan::Error>(())
//! ```

use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use tracing::{debug, warn};

use crate::checker::{CveMatcher, CVE_RULES};
use crate::config::Config;
use crate::error::Result;
use crate::model::{Finding, ReportRecord, Versions, UNKNOWN_VERSION};
use crate::output::format_record;

type Sink = Box<dyn Write + Send>;

/// Decides which scanned files are reported and writes them to a sink.
pub struct Reporter {
    config: Config,
    matcher: CveMatcher,
    sink: Option<Mutex<Sink>>,
    count: AtomicU64,
}

impl std::fmt::Debug for Reporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reporter")
            .field("config", &self.config)
            .field("matcher", &self.matcher)
            .field("has_sink", &self.sink.is_some())
            .field("count", &self.count)
            .finish()
    }
}

impl Reporter {
    /// Creates a reporter that counts findings without writing them anywhere.
    ///
    /// # Errors
    ///
    /// Fails if the configuration disables a CVE the rule table does not know.
    pub fn new(config: Config) -> Result<Self> {
        let matcher = CveMatcher::new(CVE_RULES, &config.disabled_cves())?;
        Ok(Self {
            config,
            matcher,
            sink: None,
            count: AtomicU64::new(0),
        })
    }

    /// Creates a reporter that writes one line per reported file to `sink`.
    pub fn with_sink<W>(config: Config, sink: W) -> Result<Self>
    where
        W: Write + Send + 'static,
    {
        let mut reporter = Self::new(config)?;
        reporter.sink = Some(Mutex::new(Box::new(sink)));
        Ok(reporter)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// CVEs matched for `versions` under this reporter's configuration.
    pub fn matched_cves(&self, versions: &Versions) -> Vec<String> {
        self.matcher.matched_cves(versions)
    }

    /// Reports a scanned file.
    ///
    /// Files are dropped silently when their version is unknown and unknown
    /// versions are suppressed, when no CVE matches, or when the only signal
    /// is a `JndiLookup` class and such matches are suppressed. Everything
    /// else is counted and, if a sink is configured, written as one line.
    pub fn collect(&self, path: &str, finding: Finding, versions: &Versions) {
        if self.config.suppress_unknown_versions && is_unknown(versions) {
            debug!(path, "skipping file with unknown log4j version");
            return;
        }

        let cves = self.matcher.matched_cves(versions);
        if cves.is_empty() {
            debug!(path, ?versions, "no CVEs match detected versions");
            return;
        }

        if self.config.suppress_jndi_lookup_only && finding.is_jndi_lookup_only() {
            debug!(path, "skipping file matched only by JndiLookup class");
            return;
        }

        self.count.fetch_add(1, Ordering::Relaxed);

        let Some(sink) = &self.sink else {
            return;
        };

        let include_jndi_lookup = !self.config.suppress_jndi_lookup_only;
        let record = ReportRecord::new(
            path,
            cves,
            to_strings(finding.keys(include_jndi_lookup)),
            to_strings(finding.reasons(include_jndi_lookup)),
            versions.iter().cloned().collect(),
        );

        let Some(line) = format_record(&record, self.config.output_mode, self.config.color) else {
            return;
        };

        let mut sink = sink.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = writeln!(sink, "{line}") {
            warn!(path, error = %e, "failed to write report");
        }
    }

    /// Number of files reported since construction.
    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }
}

fn is_unknown(versions: &Versions) -> bool {
    versions.is_empty() || (versions.len() == 1 && versions.contains(UNKNOWN_VERSION))
}

fn to_strings(values: Vec<&str>) -> Vec<String> {
    values.into_iter().map(str::to_string).collect()
}
