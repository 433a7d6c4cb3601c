//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent structural violations in prm documents and
/// invalid flow-law lookups. They are independent of I/O concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("line {line}: malformed line: {content}")]
    MalformedLine { line: usize, content: String },

    #[error("line {line}: unbalanced section: {message}")]
    UnbalancedSection { line: usize, message: String },

    #[error("section and parameter share the same name at <{path}>")]
    KindMismatch { path: String },

    #[error("no published flow law for {material}/{source_name}/{creep}/{water}")]
    UnknownFlowLaw {
        material: String,
        source_name: String,
        creep: String,
        water: String,
    },

    #[error("unknown {kind}: {value}")]
    UnknownValue { kind: &'static str, value: String },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
