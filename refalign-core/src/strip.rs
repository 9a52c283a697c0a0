//! Insertion stripping
//!
//! Removes query letters aligned against reference gaps so that the query
//! ends up in reference coordinates, and records what was removed.

use crate::alphabet::{self, Letter, Sequence};
use crate::types::Insertion;

/// Reference-length query plus the insertions cut out of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrippedAlignment<L: Letter> {
    pub query: Sequence<L>,
    pub insertions: Vec<Insertion>,
}

/// Split an alignment into the query in reference coordinates and the list
/// of insertions, with `begin..end` given in alignment columns.
///
/// Both sequences must have the same length.
pub fn strip_insertions<L: Letter>(aligned_ref: &[L], aligned_query: &[L]) -> StrippedAlignment<L> {
    debug_assert_eq!(aligned_ref.len(), aligned_query.len());

    let mut query = Vec::with_capacity(aligned_ref.len());
    let mut insertions = Vec::new();
    let mut pending: Option<(usize, Vec<L>)> = None;

    let mut flush = |pending: &mut Option<(usize, Vec<L>)>| {
        if let Some((begin, seq)) = pending.take() {
            insertions.push(Insertion {
                begin,
                end: begin + seq.len(),
                seq: alphabet::to_string(&seq),
            });
        }
    };

    for (column, (&ref_letter, &query_letter)) in aligned_ref.iter().zip(aligned_query).enumerate() {
        if ref_letter.is_gap() {
            pending
                .get_or_insert_with(|| (column, Vec::new()))
                .1
                .push(query_letter);
        } else {
            flush(&mut pending);
            query.push(query_letter);
        }
    }
    flush(&mut pending);

    StrippedAlignment { query, insertions }
}
