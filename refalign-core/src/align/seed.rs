//! Seed matching
//!
//! Anchors the query on the reference with a handful of near-exact k-mer
//! matches and derives the diagonal band that the DP has to cover.

use crate::alphabet::Letter;
use crate::error::{AlignError, AlignResult};
use crate::params::SeedParams;

/// Best placement of one k-mer on the reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedMatch {
    /// Reference offset of the best placement, `None` when nothing scored
    pub shift: Option<usize>,
    /// Number of matching positions
    pub score: usize,
}

/// Rough query-to-reference placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedAlignment {
    /// Typical `ref_pos - query_pos` offset
    pub mean_shift: i64,
    /// Half-width of the diagonal band around `mean_shift`
    pub band_width: usize,
}

/// Scan reference offsets `start_pos..ref_len - k` for the best placement of `kmer`.
///
/// A candidate offset is abandoned as soon as it has accumulated more than
/// `allowed_mismatches` mismatches; the first offset reaching the maximum
/// score wins and a perfect hit stops the scan.
pub fn seed_match<L: Letter>(
    kmer: &[L],
    reference: &[L],
    start_pos: usize,
    allowed_mismatches: usize,
) -> SeedMatch {
    let k = kmer.len();
    let end = reference.len().saturating_sub(k);

    let mut best = SeedMatch {
        shift: None,
        score: 0,
    };

    for shift in start_pos..end {
        let mut score = 0;
        for (pos, letter) in kmer.iter().enumerate() {
            if *letter == reference[shift + pos] {
                score += 1;
            }
            if score + allowed_mismatches < pos {
                break;
            }
        }

        if score > best.score {
            best = SeedMatch {
                shift: Some(shift),
                score,
            };
            if score == k {
                break;
            }
        }
    }

    best
}

/// Estimate mean diagonal and band width from evenly spaced query seeds.
pub fn seed_alignment<L: Letter>(
    query: &[L],
    reference: &[L],
    params: &SeedParams,
) -> AlignResult<SeedAlignment> {
    let k = params.kmer_length;
    let query_len = query.len();
    let ref_len = reference.len();

    let shortest = query_len.min(ref_len);
    if shortest < 2 * k {
        return Ok(SeedAlignment {
            mean_shift: 0,
            band_width: shortest,
        });
    }

    let margin = if ref_len > params.margin_cutoff {
        params.margin as f64
    } else {
        (ref_len as f64 / 100.0).round()
    };
    let span = query_len as f64 - k as f64 - 2.0 * margin;
    let step = span / (params.seed_count.max(2) - 1) as f64;
    let last_start = (query_len - k) as f64;
    let threshold = k.saturating_sub(params.allowed_mismatches);

    let mut start_pos = 0;
    let mut diagonals = Vec::with_capacity(params.seed_count);

    for seed_index in 0..params.seed_count {
        let query_pos = (margin + step * seed_index as f64).round().clamp(0.0, last_start) as usize;
        let kmer = &query[query_pos..query_pos + k];
        let found = seed_match(kmer, reference, start_pos, params.allowed_mismatches);

        match found.shift {
            Some(shift) if found.score >= threshold => {
                diagonals.push(shift as i64 - query_pos as i64);
                start_pos = shift;
            }
            _ => log::trace!(
                "Seed {} at query position {} rejected (score {})",
                seed_index,
                query_pos,
                found.score
            ),
        }
    }

    log::debug!(
        "Accepted {} of {} seeds",
        diagonals.len(),
        params.seed_count
    );

    let (Some(&min_diagonal), Some(&max_diagonal)) =
        (diagonals.iter().min(), diagonals.iter().max())
    else {
        return Err(AlignError::NoSeedMatches);
    };
    if diagonals.len() < 2 {
        return Err(AlignError::NoSeedMatches);
    }

    let mean_shift = (0.5 * (min_diagonal + max_diagonal) as f64).round() as i64;
    let band_width = (max_diagonal - min_diagonal) as usize + 9;

    Ok(SeedAlignment {
        mean_shift,
        band_width,
    })
}
