//! Constraint validation for generated reasoning artifacts.
//!
//! The validator checks each structured claim an artifact asserts against the
//! concept graph and maps every violation to a severity and a remediation:
//! critical findings discard the artifact for regeneration, major findings are
//! fixed by targeted correction, minor findings annotate and pass through.

#![warn(missing_docs)]

mod config;
mod error;
mod validator;

pub use config::ValidatorConfig;
pub use error::ValidatorError;
pub use validator::{ConstraintValidator, ValidationReport};
