//! Map a peptide alignment back onto codons

use crate::alphabet::{Aminoacid, Letter, Nucleotide, Sequence};
use crate::types::AlignmentResult;

use super::extract::ExtractedGene;

const GAP_CODON: [Nucleotide; 3] = [Nucleotide::Gap; 3];

/// Codon-level alignment columns for one gene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodonAlignment {
    pub reference: Sequence<Nucleotide>,
    pub query: Sequence<Nucleotide>,
}

/// Expand the peptide alignment into nucleotide columns, taking codons from
/// the extracted gene sequences in order.
///
/// A gap in the query peptide blanks the codon, and a gap in the reference
/// peptide keeps the query codon against a gap so that it is later reported
/// as an insertion.
pub fn reverse_translate(gene: &ExtractedGene, peptides: &AlignmentResult<Aminoacid>) -> CodonAlignment {
    let columns = 3 * peptides.reference.len();
    let mut reference = Vec::with_capacity(columns);
    let mut query = Vec::with_capacity(columns);

    let mut ref_codons = gene.reference.chunks_exact(3);
    let mut qry_codons = gene.query.chunks_exact(3);

    for (ref_aa, qry_aa) in peptides.reference.iter().zip(&peptides.query) {
        let ref_codon = if ref_aa.is_gap() {
            &GAP_CODON[..]
        } else {
            ref_codons.next().unwrap_or(&GAP_CODON)
        };
        let qry_codon = if qry_aa.is_gap() {
            &GAP_CODON[..]
        } else {
            qry_codons.next().unwrap_or(&GAP_CODON)
        };

        reference.extend_from_slice(ref_codon);
        query.extend_from_slice(qry_codon);
    }

    CodonAlignment { reference, query }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::{parse_sequence, to_string};

    #[test]
    fn test_reverse_translate_places_codon_gaps() {
        let gene = ExtractedGene {
            span: 0..9,
            reference: parse_sequence("ATGAAACCC"),
            query: parse_sequence("ATGCCCGGGTTT"),
        };
        let peptides = AlignmentResult {
            reference: parse_sequence("MKP--"),
            query: parse_sequence("M-PGF"),
            score: 0,
        };

        let codons = reverse_translate(&gene, &peptides);
        assert_eq!(to_string(&codons.reference), "ATGAAACCC------");
        assert_eq!(to_string(&codons.query), "ATG---CCCGGGTTT");
    }
}
