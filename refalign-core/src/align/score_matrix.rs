//! Forward pass of the banded aligner

use std::ops::{BitOr, BitOrAssign};

use super::band::Band2d;
use super::gap_cost::GapOpenCost;
use super::seed::SeedAlignment;
use crate::alphabet::Letter;
use crate::params::GapCosts;

/// Score of a gap accumulator that has not been started.
pub const NO_ALIGN: i32 = -(1 << 28);

/// Score stored in cells past the end of the query.
pub const END_OF_SEQUENCE_SCORE: i32 = -1;

/// Winning transition of a cell plus gap continuation bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathFlags(u8);

impl PathFlags {
    pub const NONE: Self = Self(0);
    pub const MATCH: Self = Self(1);
    pub const REF_GAP: Self = Self(1 << 1);
    pub const QRY_GAP: Self = Self(1 << 2);
    pub const REF_GAP_EXTEND: Self = Self(1 << 3);
    pub const QRY_GAP_EXTEND: Self = Self(1 << 4);
    pub const END_OF_SEQUENCE: Self = Self(1 << 5);

    #[inline]
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for PathFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for PathFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Score and path matrices of one alignment call.
#[derive(Debug, Clone)]
pub struct ForwardTrace {
    pub scores: Band2d<i32>,
    pub paths: Band2d<PathFlags>,
    pub band: SeedAlignment,
}

impl ForwardTrace {
    /// Diagonal shift represented by a band row.
    #[inline]
    pub fn shift(&self, row: usize) -> i64 {
        row as i64 - self.band.band_width as i64 + self.band.mean_shift
    }
}

/// Fill the banded score and path matrices.
///
/// Row `si` holds diagonal `si - band_width + mean_shift` and column `ri + 1`
/// the state after consuming `ri + 1` reference letters. Exact ties resolve
/// in the order match, reference gap, query gap.
pub fn score_matrix<L: Letter>(
    query: &[L],
    reference: &[L],
    gap_open: &GapOpenCost,
    costs: &GapCosts,
    band: SeedAlignment,
) -> ForwardTrace {
    let n_rows = 2 * band.band_width + 1;
    let n_cols = reference.len() + 1;
    let query_len = query.len() as i64;

    log::trace!("Allocating banded matrices of {} x {}", n_rows, n_cols);

    let mut trace = ForwardTrace {
        scores: Band2d::new(n_rows, n_cols, 0),
        paths: Band2d::new(n_rows, n_cols, PathFlags::NONE),
        band,
    };
    let mut qry_gaps = vec![NO_ALIGN; n_rows];

    for (ri, &ref_letter) in reference.iter().enumerate() {
        let mut ref_gaps = NO_ALIGN;

        for si in (0..n_rows).rev() {
            let q_pos = ri as i64 - trace.shift(si);

            let (score, path) = if q_pos < 0 {
                // Left overhang of the query, not reached yet.
                ref_gaps = NO_ALIGN;
                qry_gaps[si] = NO_ALIGN;
                (0, PathFlags::QRY_GAP)
            } else if q_pos < query_len {
                let substitution = if query[q_pos as usize].lookup(ref_letter) > 0 {
                    costs.score_match
                } else {
                    -costs.penalty_mismatch
                };
                let mut score = trace.scores[(si, ri)] + substitution;
                let mut origin = PathFlags::MATCH;
                let mut path = PathFlags::NONE;

                if si + 1 < n_rows {
                    let extend = ref_gaps - costs.penalty_gap_extend;
                    let open = trace.scores[(si + 1, ri + 1)] - gap_open.at(ri + 1);
                    if extend > open {
                        ref_gaps = extend;
                        path |= PathFlags::REF_GAP_EXTEND;
                    } else {
                        ref_gaps = open;
                    }
                    if ref_gaps > score {
                        score = ref_gaps;
                        origin = PathFlags::REF_GAP;
                    }
                } else {
                    ref_gaps = NO_ALIGN;
                }

                if si > 0 {
                    let extend = qry_gaps[si - 1] - costs.penalty_gap_extend;
                    let open = trace.scores[(si - 1, ri)] - gap_open.at(ri);
                    if extend > open {
                        qry_gaps[si] = extend;
                        path |= PathFlags::QRY_GAP_EXTEND;
                    } else {
                        qry_gaps[si] = open;
                    }
                    if qry_gaps[si] > score {
                        score = qry_gaps[si];
                        origin = PathFlags::QRY_GAP;
                    }
                } else {
                    qry_gaps[si] = NO_ALIGN;
                }

                (score, path | origin)
            } else {
                ref_gaps = NO_ALIGN;
                qry_gaps[si] = NO_ALIGN;
                (END_OF_SEQUENCE_SCORE, PathFlags::END_OF_SEQUENCE)
            };

            trace.scores[(si, ri + 1)] = score;
            trace.paths[(si, ri + 1)] = path;
        }
    }

    trace
}
