//! Check report schema (stable v1)
//!
//! This schema is STABLE and VERSIONED.
//! Breaking changes require a new version.

use crate::error::ErrorKind;
use crate::mapping::FieldMapping;
use serde::{Deserialize, Serialize};

/// Report schema version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportVersion {
    /// Major version (breaking changes)
    pub major: u32,

    /// Minor version (backward-compatible additions)
    pub minor: u32,
}

impl ReportVersion {
    /// Current report schema version
    pub const CURRENT: ReportVersion = ReportVersion { major: 1, minor: 0 };
}

impl std::fmt::Display for ReportVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Outcome of one check invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CheckOutcome {
    /// The mapping is consistent; the payload is complete
    Ok {
        /// Comma-joined inferred key columns, absent when keys were explicit
        #[serde(skip_serializing_if = "Option::is_none")]
        inferred_key_columns: Option<String>,

        /// One mapping per table column, in column order
        field_mappings: Vec<FieldMapping>,
    },

    /// The check failed; no partial mapping is reported
    Failed {
        /// Stable error kind code
        error_kind: ErrorKind,

        /// Operator-facing message, surfaced verbatim
        message: String,
    },
}

/// Check report (report.json v1)
///
/// One report per invocation, tagged with the identity of the member that
/// executed the check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckReport {
    /// Schema version
    pub version: ReportVersion,

    /// Timestamp (ISO 8601)
    pub timestamp: String,

    /// Identity of the executing member
    pub member: String,

    /// Check outcome
    pub outcome: CheckOutcome,
}

impl CheckReport {
    /// Create a report for a given member and outcome
    pub fn new(member: impl Into<String>, outcome: CheckOutcome) -> Self {
        Self {
            version: ReportVersion::CURRENT,
            timestamp: chrono::Utc::now().to_rfc3339(),
            member: member.into(),
            outcome,
        }
    }

    /// Whether the check succeeded
    pub fn is_ok(&self) -> bool {
        matches!(self.outcome, CheckOutcome::Ok { .. })
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Save to file
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let json = self
            .to_json()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        std::fs::write(path, json)
    }
}
