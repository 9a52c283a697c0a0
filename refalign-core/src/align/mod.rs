//! Seed-anchored banded pairwise alignment
//!
//! The aligner is generic over the alphabet, so the same code aligns
//! nucleotides against the reference and peptides against reference peptides.

pub mod backtrace;
pub mod band;
pub mod gap_cost;
pub mod score_matrix;
pub mod seed;

pub use backtrace::back_trace;
pub use band::Band2d;
pub use gap_cost::GapOpenCost;
pub use score_matrix::{score_matrix, ForwardTrace, PathFlags};
pub use seed::{seed_alignment, seed_match, SeedAlignment, SeedMatch};

use crate::alphabet::Letter;
use crate::error::{AlignError, AlignResult};
use crate::params::AlignmentParams;
use crate::types::AlignmentResult;

/// Align `query` against `reference`.
///
/// Fails before any matrix is allocated when the query is shorter than
/// `params.min_length`, when seeding finds no anchor, or when the estimated
/// band is wider than `params.max_band_width`.
pub fn align_pairwise<L: Letter>(
    query: &[L],
    reference: &[L],
    gap_open: &GapOpenCost,
    params: &AlignmentParams,
) -> AlignResult<AlignmentResult<L>> {
    if query.len() < params.min_length {
        return Err(AlignError::SequenceTooShort {
            length: query.len(),
            min_length: params.min_length,
        });
    }

    let band = seed_alignment(query, reference, &params.seed)?;
    log::debug!(
        "Seed alignment: mean shift {}, band width {}",
        band.mean_shift,
        band.band_width
    );

    if band.band_width > params.max_band_width {
        return Err(AlignError::BadSeedMatches {
            band_width: band.band_width,
            max_band_width: params.max_band_width,
        });
    }

    let trace = score_matrix(query, reference, gap_open, &params.gap_costs, band);
    Ok(back_trace(query, reference, &trace))
}
