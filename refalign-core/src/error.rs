//! Per-sequence alignment failures

use thiserror::Error;

/// Result type for alignment operations
pub type AlignResult<T> = Result<T, AlignError>;

/// Errors raised while aligning a single query.
///
/// All variants are deterministic: re-running on the same inputs reproduces
/// the same failure, so callers record them and move on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlignError {
    #[error("Sequence is too short to align: length {length} is below the minimum of {min_length}")]
    SequenceTooShort { length: usize, min_length: usize },

    #[error("Unable to align: no seed matches")]
    NoSeedMatches,

    #[error("Unable to align: poor seed matches (band width {band_width} exceeds {max_band_width})")]
    BadSeedMatches {
        band_width: usize,
        max_band_width: usize,
    },

    #[error("Gene \"{gene}\" not found in gene map")]
    GeneNotFound { gene: String },

    #[error(
        "Gene \"{gene}\" length is not a multiple of 3 (reference: {reference_length}, query: {query_length})"
    )]
    GeneLengthInvalid {
        gene: String,
        reference_length: usize,
        query_length: usize,
    },
}

impl AlignError {
    pub fn gene_not_found<S: Into<String>>(gene: S) -> Self {
        Self::GeneNotFound { gene: gene.into() }
    }

    /// Short machine-friendly tag of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SequenceTooShort { .. } => "SequenceTooShort",
            Self::NoSeedMatches => "NoSeedMatches",
            Self::BadSeedMatches { .. } => "BadSeedMatches",
            Self::GeneNotFound { .. } => "GeneNotFound",
            Self::GeneLengthInvalid { .. } => "GeneLengthInvalid",
        }
    }
}
