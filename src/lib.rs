pub mod checker;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod output;
pub mod reporter;

pub use checker::CveMatcher;
pub use config::Config;
pub use error::{Error, Result};
pub use model::{Finding, Log4jVersion, ReportRecord, Versions, UNKNOWN_VERSION};
pub use output::OutputMode;
pub use reporter::Reporter;
