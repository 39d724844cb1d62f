//! Error types for voucher extraction

use thiserror::Error;

/// Extraction error types
///
/// Extraction is all-or-nothing: an error never carries a partial
/// document. A missing optional field is not an error (it resolves to
/// an empty string or a zero amount in the model).
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Input is not well-formed XML, even after cleanup
    #[error("Malformed voucher XML: {0}")]
    Malformed(String),

    /// Well-formed XML without a VOUCHER element
    #[error("No VOUCHER element in document")]
    MissingVoucher,
}

/// Result type for extraction operations
pub type ExtractResult<T> = Result<T, ExtractError>;
