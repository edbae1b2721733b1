//! Reasoning artifacts - generated output checked by the validator

use std::fmt;

/// Unique identifier for a reasoning artifact, based on UUIDv7.
///
/// UUIDv7 keeps remediation chains chronologically sortable: a regenerated
/// artifact always has a larger id than the artifact it replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArtifactId(u128);

impl ArtifactId {
    /// Generate a new UUIDv7-based ArtifactId
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create an ArtifactId from a raw u128 value
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }

    /// Get the timestamp component (milliseconds since Unix epoch)
    pub fn timestamp(&self) -> u64 {
        // UUIDv7: top 48 bits are Unix millisecond timestamp
        (self.0 >> 80) as u64
    }
}

impl Default for ArtifactId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// Lifecycle status of a reasoning artifact.
///
/// `Pending` is the entry state of every validation attempt; the other four
/// are terminal for that attempt. `Regenerated` additionally triggers a new
/// `Pending` cycle on the replacement artifact, bounded by the retry limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactStatus {
    /// Not yet validated
    Pending,
    /// No findings; artifact passes through unchanged
    Accepted,
    /// Major findings were remediated by targeted substitution/removal
    Corrected,
    /// A critical finding discarded the artifact; a replacement was requested
    Regenerated,
    /// Annotated and passed through (minor findings, timeout, or retry exhaustion)
    Flagged,
}

impl fmt::Display for ArtifactStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ArtifactStatus::Pending => "pending",
            ArtifactStatus::Accepted => "accepted",
            ArtifactStatus::Corrected => "corrected",
            ArtifactStatus::Regenerated => "regenerated",
            ArtifactStatus::Flagged => "flagged",
        };
        write!(f, "{}", s)
    }
}

/// A structured claim asserted by a generated reasoning text:
/// "this role carries this obligation".
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactClaim {
    /// URI of the role the obligation is attributed to
    pub role_uri: String,

    /// URI of the asserted obligation
    pub obligation_uri: String,

    /// The label the generated text used for the obligation
    pub obligation_label: String,

    /// Citation supporting the claim, if any
    pub citation: Option<String>,
}

/// A generated reasoning text plus the structured claims it asserts.
///
/// Immutable except through validator correction, which produces a new
/// artifact rather than mutating in place.
#[derive(Debug, Clone, PartialEq)]
pub struct ReasoningArtifact {
    /// Unique identifier
    pub id: ArtifactId,

    /// The generated reasoning text
    pub text: String,

    /// Structured claims extracted from the text
    pub claims: Vec<ArtifactClaim>,
}

impl ReasoningArtifact {
    /// Create a new artifact with a fresh id
    pub fn new(text: impl Into<String>, claims: Vec<ArtifactClaim>) -> Self {
        Self {
            id: ArtifactId::new(),
            text: text.into(),
            claims,
        }
    }
}
