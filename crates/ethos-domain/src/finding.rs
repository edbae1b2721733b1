//! Validation findings - constraint violations with severity and remediation

use std::fmt;

/// How serious a constraint violation is.
///
/// Ordering matters: a validation pass's overall remediation is taken from
/// its maximum-severity finding, so `Critical > Major > Minor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Incomplete citation or missing cross-reference
    Minor,
    /// Inconsistent terminology or an unsupported-but-not-contradictory claim
    Major,
    /// Contradicts a fundamental obligation or safety constraint
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Minor => "minor",
            Severity::Major => "major",
            Severity::Critical => "critical",
        };
        write!(f, "{}", s)
    }
}

/// What the validator does about a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Remediation {
    /// Discard the artifact and regenerate with the violated constraint as a
    /// negative instruction
    Regenerate,
    /// Apply a targeted substitution/removal without full regeneration
    Correct,
    /// Annotate and pass through
    Flag,
}

impl Remediation {
    /// The fixed severity → remediation mapping
    pub fn for_severity(severity: Severity) -> Self {
        match severity {
            Severity::Critical => Remediation::Regenerate,
            Severity::Major => Remediation::Correct,
            Severity::Minor => Remediation::Flag,
        }
    }
}

impl fmt::Display for Remediation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Remediation::Regenerate => "regenerate",
            Remediation::Correct => "correct",
            Remediation::Flag => "flag",
        };
        write!(f, "{}", s)
    }
}

/// One violated constraint, produced by the validator.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationFinding {
    /// How serious the violation is
    pub severity: Severity,

    /// URI of the violated constraint or concept
    pub rule_uri: String,

    /// Human-readable description of the violation
    pub description: String,

    /// What the validator decided to do about it
    pub remediation: Remediation,
}

impl ValidationFinding {
    /// Create a finding; remediation follows the fixed severity mapping.
    pub fn new(severity: Severity, rule_uri: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            severity,
            rule_uri: rule_uri.into(),
            description: description.into(),
            remediation: Remediation::for_severity(severity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Critical > Severity::Major);
        assert!(Severity::Major > Severity::Minor);
    }

    #[test]
    fn test_severity_remediation_mapping() {
        assert_eq!(Remediation::for_severity(Severity::Critical), Remediation::Regenerate);
        assert_eq!(Remediation::for_severity(Severity::Major), Remediation::Correct);
        assert_eq!(Remediation::for_severity(Severity::Minor), Remediation::Flag);
    }

    #[test]
    fn test_finding_carries_mapped_remediation() {
        let finding = ValidationFinding::new(Severity::Critical, "ethos:rule/x", "contradiction");
        assert_eq!(finding.remediation, Remediation::Regenerate);
    }
}
