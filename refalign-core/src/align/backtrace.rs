//! Backtrace through the banded path matrix

use super::score_matrix::{ForwardTrace, PathFlags};
use crate::alphabet::Letter;
use crate::types::AlignmentResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Free,
    RefGap,
    QryGap,
}

/// Recover the alignment from a filled [`ForwardTrace`].
///
/// The walk starts from the best scoring terminal cell (first maximum wins),
/// and whatever it does not cover is emitted as overhang against gaps.
pub fn back_trace<L: Letter>(query: &[L], reference: &[L], trace: &ForwardTrace) -> AlignmentResult<L> {
    let n_rows = trace.scores.rows();
    let query_len = query.len() as i64;
    let ref_len = reference.len() as i64;

    let last_column = |row: usize| (query_len + trace.shift(row)).clamp(0, ref_len) as usize;

    let mut best_score = 0;
    let mut si = 0;
    for row in 0..n_rows {
        let score = trace.scores[(row, last_column(row))];
        if score > best_score {
            best_score = score;
            si = row;
        }
    }

    let capacity = (ref_len + 3 * trace.band.band_width as i64) as usize;
    let mut aln_query = Vec::with_capacity(capacity);
    let mut aln_ref = Vec::with_capacity(capacity);

    let mut r_pos = last_column(si) as i64 - 1;
    let mut q_pos = r_pos - trace.shift(si);

    // Right overhang
    if r_pos < ref_len - 1 {
        for i in (r_pos + 1..ref_len).rev() {
            aln_query.push(L::GAP);
            aln_ref.push(reference[i as usize]);
        }
    } else if q_pos < query_len - 1 {
        for i in (q_pos + 1..query_len).rev() {
            aln_query.push(query[i as usize]);
            aln_ref.push(L::GAP);
        }
    }

    let mut mode = Mode::Free;
    while r_pos >= 0 && q_pos >= 0 {
        let origin = trace.paths[(si, (r_pos + 1) as usize)];

        if mode == Mode::Free && origin.contains(PathFlags::MATCH) {
            aln_query.push(query[q_pos as usize]);
            aln_ref.push(reference[r_pos as usize]);
            q_pos -= 1;
            r_pos -= 1;
        } else if mode == Mode::RefGap || (mode == Mode::Free && origin.contains(PathFlags::REF_GAP)) {
            if si + 1 >= n_rows {
                break;
            }
            aln_query.push(query[q_pos as usize]);
            aln_ref.push(L::GAP);
            q_pos -= 1;
            si += 1;
            mode = if origin.contains(PathFlags::REF_GAP_EXTEND) {
                Mode::RefGap
            } else {
                Mode::Free
            };
        } else if mode == Mode::QryGap || (mode == Mode::Free && origin.contains(PathFlags::QRY_GAP)) {
            let Some(next_row) = si.checked_sub(1) else {
                break;
            };
            aln_query.push(L::GAP);
            aln_ref.push(reference[r_pos as usize]);
            r_pos -= 1;
            si = next_row;
            mode = if origin.contains(PathFlags::QRY_GAP_EXTEND) {
                Mode::QryGap
            } else {
                Mode::Free
            };
        } else {
            break;
        }
    }

    // Left overhang
    if r_pos >= 0 {
        for i in (0..=r_pos).rev() {
            aln_query.push(L::GAP);
            aln_ref.push(reference[i as usize]);
        }
    } else if q_pos >= 0 {
        for i in (0..=q_pos).rev() {
            aln_query.push(query[i as usize]);
            aln_ref.push(L::GAP);
        }
    }

    aln_query.reverse();
    aln_ref.reverse();

    AlignmentResult {
        query: aln_query,
        reference: aln_ref,
        score: best_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::gap_cost::GapOpenCost;
    use crate::align::score_matrix::score_matrix;
    use crate::align::seed::SeedAlignment;
    use crate::alphabet::parse_sequence;
    use crate::alphabet::Nucleotide;
    use crate::params::GapCosts;

    #[test]
    fn test_equal_terminal_scores_keep_first_row() {
        let query = parse_sequence::<Nucleotide>("A");
        let reference = parse_sequence::<Nucleotide>("AA");
        let costs = GapCosts::default();
        let band = SeedAlignment {
            mean_shift: 0,
            band_width: 1,
        };
        let trace = score_matrix(&query, &reference, &GapOpenCost::Flat(costs.open_close()), &costs, band);

        // The single base matches either reference letter.
        assert_eq!(trace.scores[(1, 1)], 3);
        assert_eq!(trace.scores[(2, 2)], 3);

        let result = back_trace(&query, &reference, &trace);
        assert_eq!(result.query_string(), "A-");
        assert_eq!(result.reference_string(), "AA");
        assert_eq!(result.score, 3);
    }
}
