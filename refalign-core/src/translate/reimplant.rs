//! Write codon-level corrections back into the nucleotide alignment

use std::ops::Range;

use super::reverse::CodonAlignment;
use crate::types::NucleotideAlignment;

/// Codon alignment of one gene and the alignment columns it replaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneBlock {
    pub name: String,
    pub span: Range<usize>,
    pub codons: CodonAlignment,
}

/// Replace each gene's columns with its codon alignment.
///
/// Blocks are applied right to left so earlier spans stay valid. A block
/// that overlaps one already applied is skipped and its name returned.
pub fn reimplant(alignment: &mut NucleotideAlignment, mut blocks: Vec<GeneBlock>) -> Vec<String> {
    blocks.sort_by(|a, b| b.span.start.cmp(&a.span.start));

    let mut skipped = Vec::new();
    let mut applied_start: Option<usize> = None;

    for block in blocks {
        if applied_start.is_some_and(|start| block.span.end > start) {
            log::warn!(
                "Gene \"{}\" overlaps a gene that was already reimplanted, keeping its nucleotide alignment",
                block.name
            );
            skipped.push(block.name);
            continue;
        }

        alignment
            .reference
            .splice(block.span.clone(), block.codons.reference);
        alignment.query.splice(block.span.clone(), block.codons.query);
        applied_start = Some(block.span.start);
    }

    skipped
}
