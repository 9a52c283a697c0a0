//! Per-sequence alignment against a fixed reference

use std::collections::BTreeSet;

use crate::align::{align_pairwise, GapOpenCost};
use crate::alphabet::{self, Letter, Nucleotide, Sequence};
use crate::error::AlignResult;
use crate::params::AlignmentParams;
use crate::strip::strip_insertions;
use crate::translate::translate_genes;
use crate::types::{AlgorithmInput, AlgorithmOutput, AlignmentOutput, GeneMap};

/// Reference, gene map and options shared read-only by every query.
#[derive(Debug, Clone)]
pub struct Aligner {
    reference: Sequence<Nucleotide>,
    gene_map: GeneMap,
    genes: BTreeSet<String>,
    params: AlignmentParams,
    gap_open: GapOpenCost,
}

impl Aligner {
    /// An empty `genes` set skips translation and uses flat gap costs.
    pub fn new<I>(reference: Sequence<Nucleotide>, gene_map: GeneMap, genes: I, params: AlignmentParams) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let genes: BTreeSet<String> = genes.into_iter().collect();
        let gap_open = if genes.is_empty() {
            GapOpenCost::flat(&params)
        } else {
            GapOpenCost::codon_aware(reference.len(), &gene_map, &genes, &params)
        };

        Self {
            reference,
            gene_map,
            genes,
            params,
            gap_open,
        }
    }

    /// Align one sanitized query: nucleotide pass, codon refinement of the
    /// requested genes, then insertion stripping.
    pub fn align(&self, query: &[Nucleotide]) -> AlignResult<AlignmentOutput> {
        let mut alignment = align_pairwise(query, &self.reference, &self.gap_open, &self.params)?;
        let score = alignment.score;

        let peptides = if self.genes.is_empty() {
            Vec::new()
        } else {
            translate_genes(&mut alignment, &self.gene_map, &self.genes, &self.params)?
        };

        let stripped = strip_insertions(&alignment.reference, &alignment.query);

        Ok(AlignmentOutput {
            query: stripped.query,
            score,
            insertions: stripped.insertions,
            peptides,
        })
    }

    /// Sanitize raw query text and align it. Gaps present in the input are dropped.
    pub fn align_raw(&self, raw: &str) -> AlignResult<AlignmentOutput> {
        let query: Sequence<Nucleotide> = alphabet::parse_sequence::<Nucleotide>(raw)
            .into_iter()
            .filter(|nuc| !nuc.is_gap())
            .collect();
        self.align(&query)
    }

    /// Worker-side entry point of the pipeline; failures stay attached to the item.
    pub fn align_input(&self, input: AlgorithmInput) -> AlgorithmOutput {
        let result = self.align_raw(&input.seq);
        if let Err(err) = &result {
            log::debug!("Sequence \"{}\" failed: {}", input.name, err);
        }

        AlgorithmOutput {
            index: input.index,
            name: input.name,
            result,
        }
    }
}
