//! refalign core library
//!
//! Aligns query nucleotide sequences to a fixed reference with a
//! seed-anchored banded DP, refines coding regions at the codon level and
//! reports the query in reference coordinates together with its insertions.

pub mod align;
pub mod aligner;
pub mod alphabet;
pub mod error;
pub mod io;
pub mod params;
pub mod pipeline;
pub mod strip;
pub mod translate;
pub mod types;

// Re-export commonly used types and functions
pub use align::{align_pairwise, GapOpenCost, SeedAlignment};
pub use aligner::Aligner;
pub use alphabet::{Aminoacid, Letter, Nucleotide, Sequence};
pub use error::{AlignError, AlignResult};
pub use params::{AlignmentParams, GapCosts, SeedParams};
pub use pipeline::{resolve_jobs, Pipeline, PipelineStats};
pub use strip::{strip_insertions, StrippedAlignment};
pub use types::{
    AlgorithmInput, AlgorithmOutput, AlignmentOutput, AlignmentResult, Gene, GeneMap, Insertion, Peptide, Strand,
};

/// Version information for the refalign core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
