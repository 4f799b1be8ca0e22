//! Detection signals attached to a scanned file.
//!
//! Crawlers describe *how* a file was flagged with a [`Finding`] value: a
//! set of independent flags, any combination of which may be present. The
//! reporter decodes these into human-readable reasons and stable machine
//! keys, always in the fixed priority order of [`FINDING_REASONS`].

use bitflags::bitflags;
use serde::de::{self, Deserializer};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

bitflags! {
    /// Heuristics that matched a scanned file.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Finding: u32 {
        /// A class named `JndiLookup` was found.
        const JNDI_LOOKUP_CLASS_NAME              = 1 << 0;
        /// `org/apache/logging/log4j/core/lookup/JndiLookup` was found.
        const JNDI_LOOKUP_CLASS_PACKAGE_AND_NAME  = 1 << 1;
        /// A class named `JndiManager` was found.
        const JNDI_MANAGER_CLASS_NAME             = 1 << 2;
        /// The jar file name looks like a log4j-core jar.
        const JAR_NAME                            = 1 << 3;
        /// A log4j-core jar name was seen inside an archive.
        const JAR_NAME_INSIDE_ARCHIVE             = 1 << 4;
        /// `org/apache/logging/log4j/core/net/JndiManager` was found.
        const JNDI_MANAGER_CLASS_PACKAGE_AND_NAME = 1 << 5;
        /// A class file hash matched a known vulnerable class.
        const CLASS_FILE_MD5                      = 1 << 6;
        /// A hash of the bytecode instructions matched a known class.
        const CLASS_BYTECODE_INSTRUCTION_MD5      = 1 << 7;
        /// The jar appeared to be obfuscated.
        const JAR_FILE_OBFUSCATED                 = 1 << 8;
        /// Bytecode partially matched a known vulnerable version.
        const CLASS_BYTECODE_PARTIAL_MATCH        = 1 << 9;
    }
}

/// One decoded detection signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reason {
    pub flag: Finding,
    /// Phrase used in human-readable output.
    pub description: &'static str,
    /// Stable key used in JSON output.
    pub key: &'static str,
}

const fn reason(flag: Finding, description: &'static str, key: &'static str) -> Reason {
    Reason {
        flag,
        description,
        key,
    }
}

/// Every known flag, in the order reasons are reported.
pub const FINDING_REASONS: [Reason; 10] = [
    reason(
        Finding::JNDI_LOOKUP_CLASS_NAME,
        "JndiLookup class name matched",
        "jndiLookupClassName",
    ),
    reason(
        Finding::JNDI_LOOKUP_CLASS_PACKAGE_AND_NAME,
        "JndiLookup class and package name matched",
        "jndiLookupClassPackageAndName",
    ),
    reason(
        Finding::JNDI_MANAGER_CLASS_NAME,
        "JndiManager class name matched",
        "jndiManagerClassName",
    ),
    reason(Finding::JAR_NAME, "jar name matched", "jarName"),
    reason(
        Finding::JAR_NAME_INSIDE_ARCHIVE,
        "jar name inside archive matched",
        "jarNameInsideArchive",
    ),
    reason(
        Finding::JNDI_MANAGER_CLASS_PACKAGE_AND_NAME,
        "JndiManager class and package name matched",
        "jndiManagerClassPackageAndName",
    ),
    reason(
        Finding::CLASS_FILE_MD5,
        "class file MD5 matched",
        "classFileMd5",
    ),
    reason(
        Finding::CLASS_BYTECODE_INSTRUCTION_MD5,
        "byte code instruction MD5 matched",
        "classBytecodeInstructionMd5",
    ),
    reason(
        Finding::JAR_FILE_OBFUSCATED,
        "jar file appeared obfuscated",
        "jarFileObfuscated",
    ),
    reason(
        Finding::CLASS_BYTECODE_PARTIAL_MATCH,
        "byte code partially matched known version",
        "classBytecodePartialMatch",
    ),
];

impl Finding {
    /// The two flags that only prove a `JndiLookup` class is present.
    pub const JNDI_LOOKUP: Finding = Finding::JNDI_LOOKUP_CLASS_NAME
        .union(Finding::JNDI_LOOKUP_CLASS_PACKAGE_AND_NAME);

    /// Decodes the set flags in priority order.
    ///
    /// When `include_jndi_lookup` is false the two `JndiLookup` flags are
    /// skipped. Bits without a known meaning decode to nothing.
    pub fn decode(self, include_jndi_lookup: bool) -> impl Iterator<Item = Reason> {
        FINDING_REASONS.into_iter().filter(move |r| {
            self.intersects(r.flag) && (include_jndi_lookup || !Finding::JNDI_LOOKUP.contains(r.flag))
        })
    }

    pub fn reasons(self, include_jndi_lookup: bool) -> Vec<&'static str> {
        self.decode(include_jndi_lookup).map(|r| r.description).collect()
    }

    pub fn keys(self, include_jndi_lookup: bool) -> Vec<&'static str> {
        self.decode(include_jndi_lookup).map(|r| r.key).collect()
    }

    /// True when exactly one of the `JndiLookup` flags is set and nothing else.
    ///
    /// Both lookup flags together do not count as lookup-only.
    ///
    /// ```
    /// use log4scan::Finding;
    ///
    /// assert!(Finding::JNDI_LOOKUP_CLASS_NAME.is_jndi_lookup_only());
    /// assert!(!(Finding::JNDI_LOOKUP_CLASS_NAME | Finding::JAR_NAME).is_jndi_lookup_only());
    /// ```
    pub fn is_jndi_lookup_only(self) -> bool {
        self == Finding::JNDI_LOOKUP_CLASS_NAME || self == Finding::JNDI_LOOKUP_CLASS_PACKAGE_AND_NAME
    }

    /// Looks up a flag by its machine key.
    pub fn from_key(key: &str) -> Result<Finding> {
        FINDING_REASONS
            .iter()
            .find(|r| r.key == key)
            .map(|r| r.flag)
            .ok_or_else(|| Error::UnknownFinding(key.to_string()))
    }
}

impl Serialize for Finding {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let keys = self.keys(true);
        let mut seq = serializer.serialize_seq(Some(keys.len()))?;
        for key in keys {
            seq.serialize_element(key)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for Finding {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let keys = Vec::<String>::deserialize(deserializer)?;
        keys.iter().try_fold(Finding::empty(), |acc, key| {
            Finding::from_key(key)
                .map(|flag| acc | flag)
                .map_err(<D::Error as de::Error>::custom)
        })
    }
}
