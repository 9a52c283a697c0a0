//! Alignment parameters

use serde::{Deserialize, Serialize};

/// Flat scoring model: match bonus plus affine gap penalties.
///
/// Penalties are stored as positive numbers and subtracted by the aligner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GapCosts {
    pub score_match: i32,
    pub penalty_mismatch: i32,
    pub penalty_gap_open: i32,
    pub penalty_gap_close: i32,
    pub penalty_gap_extend: i32,
}

impl Default for GapCosts {
    fn default() -> Self {
        Self {
            score_match: 3,
            penalty_mismatch: 1,
            penalty_gap_open: 3,
            penalty_gap_close: 3,
            penalty_gap_extend: 0,
        }
    }
}

impl GapCosts {
    /// Cost charged once when a gap is opened. The close penalty is folded in,
    /// so every completed gap pays open + close + extensions.
    pub fn open_close(&self) -> i32 {
        self.penalty_gap_open + self.penalty_gap_close
    }
}

/// Seed matcher parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedParams {
    /// K-mer length of each seed
    pub kmer_length: usize,
    /// Number of seeds spread across the query
    pub seed_count: usize,
    /// Mismatches tolerated within a seed
    pub allowed_mismatches: usize,
    /// Reference length above which the fixed margin applies
    pub margin_cutoff: usize,
    /// Fixed margin for long references
    pub margin: usize,
}

impl Default for SeedParams {
    fn default() -> Self {
        Self {
            kmer_length: 21,
            seed_count: 9,
            allowed_mismatches: 3,
            margin_cutoff: 10_000,
            margin: 100,
        }
    }
}

/// Per-call options of the nucleotide aligner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignmentParams {
    /// Queries shorter than this fail with `SequenceTooShort`
    pub min_length: usize,
    /// Band widths above this fail with `BadSeedMatches`
    pub max_band_width: usize,
    /// Gap-open cost at the first base of a codon inside a requested gene
    pub penalty_gap_open_in_frame: i32,
    /// Gap-open cost at the second and third base of a codon
    pub penalty_gap_open_out_of_frame: i32,
    pub gap_costs: GapCosts,
    pub seed: SeedParams,
}

impl Default for AlignmentParams {
    fn default() -> Self {
        Self {
            min_length: 100,
            max_band_width: 400,
            penalty_gap_open_in_frame: 7,
            penalty_gap_open_out_of_frame: 8,
            gap_costs: GapCosts::default(),
            seed: SeedParams::default(),
        }
    }
}

impl AlignmentParams {
    /// Parameters for peptide re-alignment: flat costs and no length floor.
    pub fn for_peptides(&self) -> Self {
        Self {
            min_length: 0,
            ..self.clone()
        }
    }
}
