//! Gap-open costs, flat or per reference position

use crate::params::AlignmentParams;
use crate::types::GeneMap;

/// Cost of opening a gap before a given reference column.
///
/// The close penalty is already included, so this is charged once per gap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GapOpenCost {
    Flat(i32),
    /// One entry per reference position, length `ref_len + 2`
    Positional(Vec<i32>),
}

impl GapOpenCost {
    pub fn flat(params: &AlignmentParams) -> Self {
        GapOpenCost::Flat(params.gap_costs.open_close())
    }

    /// Codon-aware costs that make gaps cheaper at codon boundaries of the
    /// requested genes.
    ///
    /// Unknown gene names are skipped here; they are reported later when the
    /// genes are translated.
    pub fn codon_aware<'a, I>(ref_len: usize, gene_map: &GeneMap, genes: I, params: &AlignmentParams) -> Self
    where
        I: IntoIterator<Item = &'a String>,
    {
        let mut costs = vec![params.gap_costs.open_close(); ref_len + 2];

        for gene in genes.into_iter().filter_map(|name| gene_map.get(name)) {
            let end = gene.end.min(ref_len);
            for codon_start in (gene.start..end).step_by(3) {
                costs[codon_start] = params.penalty_gap_open_in_frame;
                for pos in (codon_start + 1..codon_start + 3).filter(|&pos| pos < end) {
                    costs[pos] = params.penalty_gap_open_out_of_frame;
                }
            }
        }

        GapOpenCost::Positional(costs)
    }

    #[inline]
    pub fn at(&self, ref_pos: usize) -> i32 {
        match self {
            GapOpenCost::Flat(cost) => *cost,
            GapOpenCost::Positional(costs) => costs[ref_pos],
        }
    }
}
