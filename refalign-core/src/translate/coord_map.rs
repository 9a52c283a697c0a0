use crate::alphabet::Letter;

/// Map raw reference positions to aligned reference positions.
///
/// Entry `i` is the column of the `i`-th non-gap letter of the aligned
/// reference, so the result is strictly increasing.
pub fn map_coordinates<L: Letter>(aligned_ref: &[L]) -> Vec<usize> {
    aligned_ref
        .iter()
        .enumerate()
        .filter(|(_, letter)| !letter.is_gap())
        .map(|(column, _)| column)
        .collect()
}
