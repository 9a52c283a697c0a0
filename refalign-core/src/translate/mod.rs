//! Gene translation and codon-aware refinement
//!
//! Each requested gene is cut out of the nucleotide alignment, translated on
//! both sides, re-aligned at the amino-acid level and written back as whole
//! codons, so indels in coding regions keep the reading frame.

pub mod codon;
pub mod coord_map;
pub mod extract;
pub mod reimplant;
pub mod reverse;

pub use codon::{decode, translate};
pub use coord_map::map_coordinates;
pub use extract::{aligned_span, extract_gene, ExtractedGene};
pub use reimplant::{reimplant, GeneBlock};
pub use reverse::{reverse_translate, CodonAlignment};

use std::collections::BTreeSet;

use crate::align::{align_pairwise, GapOpenCost};
use crate::alphabet::Aminoacid;
use crate::error::{AlignError, AlignResult};
use crate::params::AlignmentParams;
use crate::types::{GeneMap, NucleotideAlignment, Peptide};

/// Translate and re-align `genes`, then reimplant the codon alignments.
///
/// Genes are processed in name order. The first failing gene fails the
/// whole query.
pub fn translate_genes(
    alignment: &mut NucleotideAlignment,
    gene_map: &GeneMap,
    genes: &BTreeSet<String>,
    params: &AlignmentParams,
) -> AlignResult<Vec<Peptide>> {
    let coord_map = map_coordinates(&alignment.reference);
    let peptide_params = params.for_peptides();
    let peptide_gap_open = GapOpenCost::flat(&peptide_params);

    let mut peptides = Vec::with_capacity(genes.len());
    let mut blocks = Vec::with_capacity(genes.len());

    for name in genes {
        let gene = gene_map
            .get(name)
            .ok_or_else(|| AlignError::gene_not_found(name))?;

        let extracted = extract_gene(gene, &coord_map, alignment)?;
        let ref_peptide = translate(&extracted.reference);
        let query_peptide = translate(&extracted.query);

        let aligned = align_pairwise::<Aminoacid>(
            &query_peptide,
            &ref_peptide,
            &peptide_gap_open,
            &peptide_params,
        )?;
        log::debug!(
            "Gene \"{}\": {} reference / {} query residues, peptide score {}",
            name,
            ref_peptide.len(),
            query_peptide.len(),
            aligned.score
        );

        blocks.push(GeneBlock {
            name: name.clone(),
            span: extracted.span.clone(),
            codons: reverse_translate(&extracted, &aligned),
        });
        peptides.push(Peptide {
            name: name.clone(),
            reference: aligned.reference,
            query: aligned.query,
        });
    }

    reimplant(alignment, blocks);
    Ok(peptides)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::{parse_sequence, to_string};
    use crate::types::{AlignmentResult, Gene};

    #[test]
    fn test_unknown_gene_is_reported() {
        let mut aln = AlignmentResult {
            reference: parse_sequence("ATGAAATAA"),
            query: parse_sequence("ATGAAATAA"),
            score: 27,
        };
        let genes = BTreeSet::from(["nope".to_string()]);
        let err = translate_genes(&mut aln, &GeneMap::new(), &genes, &AlignmentParams::default()).unwrap_err();
        assert_eq!(err, AlignError::gene_not_found("nope"));
    }

    #[test]
    fn test_codon_deletion_is_moved_onto_codon_boundary() {
        // The nucleotide pass placed the deletion across two codons.
        let mut aln = AlignmentResult {
            reference: parse_sequence("ATGAAACCCGGGTAA"),
            query: parse_sequence("ATGA---CCGGGTAA"),
            score: 0,
        };
        let mut gene_map = GeneMap::new();
        gene_map.insert("g".to_string(), Gene::new("g", 0, 15));
        let genes = BTreeSet::from(["g".to_string()]);

        let peptides = translate_genes(&mut aln, &gene_map, &genes, &AlignmentParams::default()).unwrap();

        assert_eq!(peptides.len(), 1);
        assert_eq!(peptides[0].reference_string(), "MKPG*");
        assert_eq!(to_string(&aln.reference), "ATGAAACCCGGGTAA");
        assert_eq!(aln.query.len(), 15);
        assert_eq!(aln.query.iter().filter(|n| **n == crate::alphabet::Nucleotide::Gap).count(), 3);
    }
}
