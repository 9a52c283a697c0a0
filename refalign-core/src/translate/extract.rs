//! Gene extraction from a nucleotide alignment

use std::ops::Range;

use crate::alphabet::{remove_gaps, Nucleotide, Sequence};
use crate::error::{AlignError, AlignResult};
use crate::types::{Gene, NucleotideAlignment};

/// Gap-free gene sequences cut out of an alignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedGene {
    /// Columns of the alignment covered by the gene
    pub span: Range<usize>,
    pub reference: Sequence<Nucleotide>,
    pub query: Sequence<Nucleotide>,
}

/// Alignment columns spanned by `gene`, or `None` if the gene lies past the
/// end of the reference.
pub fn aligned_span(gene: &Gene, coord_map: &[usize]) -> Option<Range<usize>> {
    if gene.start >= gene.end || gene.end > coord_map.len() {
        return None;
    }
    Some(coord_map[gene.start]..coord_map[gene.end - 1] + 1)
}

/// Cut `gene` out of both sides of the alignment and strip gaps.
///
/// Both gap-free sequences must still be a whole number of codons.
pub fn extract_gene(
    gene: &Gene,
    coord_map: &[usize],
    alignment: &NucleotideAlignment,
) -> AlignResult<ExtractedGene> {
    let span = aligned_span(gene, coord_map).ok_or_else(|| {
        log::debug!(
            "Gene \"{}\" ({}..{}) lies outside the reference of length {}",
            gene.name,
            gene.start,
            gene.end,
            coord_map.len()
        );
        AlignError::gene_not_found(&gene.name)
    })?;

    let reference = remove_gaps(&alignment.reference[span.clone()]);
    let query = remove_gaps(&alignment.query[span.clone()]);

    if reference.len() % 3 != 0 || query.len() % 3 != 0 {
        return Err(AlignError::GeneLengthInvalid {
            gene: gene.name.clone(),
            reference_length: reference.len(),
            query_length: query.len(),
        });
    }

    Ok(ExtractedGene {
        span,
        reference,
        query,
    })
}
