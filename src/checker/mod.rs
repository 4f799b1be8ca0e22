mod matcher;
mod rules;

pub use matcher::{CveMatcher, INVALID_VERSION_STATUS, UNKNOWN_VERSION_STATUS};
pub use rules::{
    VulnerabilityRule, CVE_2021_44228, CVE_2021_44832, CVE_2021_45046, CVE_2021_45105, CVE_RULES,
};

