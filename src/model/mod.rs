//! Core data types for scanned-file facts and report records.
//!
//! - [`Log4jVersion`] - A parsed log4j version
//! - [`Versions`] - The version strings found for one file
//! - [`Finding`] - Detection signals that flagged a file
//! - [`ReportRecord`] - One formatted report entry
//!
//! # Example
//!
//! ```
//! use log4scan::{Finding, Log4jVersion, Versions};
//!
//! let versions: Versions = ["2.14.1".to_string()].into_iter().collect();
//! let finding = Finding::JAR_NAME | Finding::CLASS_FILE_MD5;
//!
//! assert_eq!(Log4jVersion::parse("2.14.1"), Some(Log4jVersion::new(2, 14, 1)));
//! assert_eq!(finding.keys(true), vec!["jarName", "classFileMd5"]);
//! assert_eq!(versions.len(), 1);
//! ```

mod finding;
mod record;
mod version;

pub use finding::*;
pub use record::*;
pub use version::*;
