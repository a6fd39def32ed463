use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HdhError {
    /// A field name that is not part of the enriched schema.
    ///
    /// This is a caller defect (bad configuration), never a data-quality issue.
    #[error("unknown field: {name}")]
    UnknownField { name: String },
    #[error("invalid start year selection: {value}")]
    InvalidYear { value: String },
    #[error("invalid status: {value}")]
    InvalidStatus { value: String },
    #[error("unknown facet: {value}")]
    UnknownFacet { value: String },
}

pub type Result<T> = std::result::Result<T, HdhError>;
