use serde::{Deserialize, Serialize};

// ── Failure code constants ──

pub const E_DUPLICATE_ID: &str = "E_DUPLICATE_ID";
pub const E_DUPLICATE_COMBINATION: &str = "E_DUPLICATE_COMBINATION";
pub const E_PARENT_NOT_FOUND: &str = "E_PARENT_NOT_FOUND";
pub const E_UNKNOWN_PROPERTY: &str = "E_UNKNOWN_PROPERTY";
pub const E_UNKNOWN_COMPARTMENT: &str = "E_UNKNOWN_COMPARTMENT";
pub const E_SAME_COMPARTMENT: &str = "E_SAME_COMPARTMENT";
pub const E_MISSING_FIELD: &str = "E_MISSING_FIELD";
pub const E_OUT_OF_RANGE: &str = "E_OUT_OF_RANGE";
pub const E_AREA_EXCEEDED: &str = "E_AREA_EXCEEDED";
pub const E_DATE_ORDER: &str = "E_DATE_ORDER";
pub const E_RESTOCKING_REQUIRED: &str = "E_RESTOCKING_REQUIRED";
pub const E_PROPOSAL_NOT_ALLOWED: &str = "E_PROPOSAL_NOT_ALLOWED";
pub const E_UNKNOWN_SPECIES: &str = "E_UNKNOWN_SPECIES";
pub const E_DUPLICATE_SPECIES: &str = "E_DUPLICATE_SPECIES";
pub const E_SPECIES_FORMAT: &str = "E_SPECIES_FORMAT";
pub const E_PERCENTAGE_SUM: &str = "E_PERCENTAGE_SUM";

/// Failure severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// The source collection a failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    Application,
    ProposedFelling,
    ProposedRestocking,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::Application => write!(f, "application"),
            RecordKind::ProposedFelling => write!(f, "proposed felling"),
            RecordKind::ProposedRestocking => write!(f, "proposed restocking"),
        }
    }
}

/// A single business-rule violation found during validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationFailure {
    /// Machine-readable stable failure code
    pub code: String,
    /// Severity level
    pub severity: Severity,
    /// Which source collection the failure belongs to
    pub record_kind: RecordKind,
    /// Identifier of the offending record; None for batch-level failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<i64>,
    /// The offending field, where one can be named
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_name: Option<String>,
    /// Human-readable failure message
    pub message: String,
}

impl ValidationFailure {
    /// Create a new error-severity failure
    pub fn error(
        code: &str,
        record_kind: RecordKind,
        record_id: Option<i64>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.to_string(),
            severity: Severity::Error,
            record_kind,
            record_id,
            field_name: None,
            message: message.into(),
        }
    }

    /// Create a warning-severity failure
    pub fn warning(
        code: &str,
        record_kind: RecordKind,
        record_id: Option<i64>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.to_string(),
            severity: Severity::Warning,
            record_kind,
            record_id,
            field_name: None,
            message: message.into(),
        }
    }

    /// Name the offending field on this failure
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field_name = Some(field.into());
        self
    }
}

/// Aggregated validation report for one import batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Whether the batch may proceed to import execution
    pub ok: bool,
    /// All collected failures, in stage then input order
    pub failures: Vec<ValidationFailure>,
}

impl ValidationReport {
    /// Create a successful (empty) report
    pub fn success() -> Self {
        Self {
            ok: true,
            failures: Vec::new(),
        }
    }

    /// Create a report from a list of failures
    pub fn from_failures(failures: Vec<ValidationFailure>) -> Self {
        let ok = !failures.iter().any(|f| f.severity == Severity::Error);
        Self { ok, failures }
    }

    /// Add a failure and update the ok flag
    pub fn push(&mut self, failure: ValidationFailure) {
        if failure.severity == Severity::Error {
            self.ok = false;
        }
        self.failures.push(failure);
    }

    /// Merge another report into this one
    pub fn merge(&mut self, other: ValidationReport) {
        for failure in other.failures {
            self.push(failure);
        }
    }

    /// Count failures of a specific severity
    pub fn count(&self, severity: Severity) -> usize {
        self.failures.iter().filter(|f| f.severity == severity).count()
    }

    /// Check if any error-severity failures exist
    pub fn has_errors(&self) -> bool {
        !self.ok
    }
}
