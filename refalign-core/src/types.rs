//! Shared data types
//!
//! Gene annotations, alignment results, insertions and the per-sequence
//! records that travel through the pipeline.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::alphabet::{self, Aminoacid, Letter, Nucleotide, Sequence};
use crate::error::AlignResult;

/// Strand orientation for gene annotations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strand {
    Forward,
    Reverse,
}

impl TryFrom<char> for Strand {
    type Error = char;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '+' => Ok(Strand::Forward),
            '-' => Ok(Strand::Reverse),
            other => Err(other),
        }
    }
}

impl From<Strand> for char {
    fn from(strand: Strand) -> Self {
        match strand {
            Strand::Forward => '+',
            Strand::Reverse => '-',
        }
    }
}

/// Gene annotation on the reference; `start..end` is 0-based and half-open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gene {
    pub name: String,
    pub start: usize,
    pub end: usize,
    pub strand: Strand,
    pub frame: u8,
}

impl Gene {
    pub fn new<S: Into<String>>(name: S, start: usize, end: usize) -> Self {
        Self {
            name: name.into(),
            start,
            end,
            strand: Strand::Forward,
            frame: 0,
        }
    }

    pub fn length(&self) -> usize {
        self.end - self.start
    }

    /// Check the annotation invariants: non-empty name, `start < end`, frame in 0..=2.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.is_empty() {
            return Err("gene name is empty".to_string());
        }
        if self.start >= self.end {
            return Err(format!(
                "gene \"{}\" has start {} not below end {}",
                self.name, self.start, self.end
            ));
        }
        if self.frame > 2 {
            return Err(format!("gene \"{}\" has frame {}", self.name, self.frame));
        }
        Ok(())
    }
}

/// Gene name to annotation, read-only once built.
pub type GeneMap = BTreeMap<String, Gene>;

/// Query-relative insertion removed from an alignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insertion {
    pub begin: usize,
    pub end: usize,
    pub seq: String,
}

impl fmt::Display for Insertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.begin, self.seq)
    }
}

/// Pairwise alignment of two sequences of equal aligned length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentResult<L: Letter> {
    pub query: Sequence<L>,
    pub reference: Sequence<L>,
    pub score: i32,
}

impl<L: Letter> AlignmentResult<L> {
    pub fn query_string(&self) -> String {
        alphabet::to_string(&self.query)
    }

    pub fn reference_string(&self) -> String {
        alphabet::to_string(&self.reference)
    }
}

pub type NucleotideAlignment = AlignmentResult<Nucleotide>;

/// Translated gene, aligned between reference and query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Peptide {
    pub name: String,
    pub reference: Sequence<Aminoacid>,
    pub query: Sequence<Aminoacid>,
}

impl Peptide {
    pub fn query_string(&self) -> String {
        alphabet::to_string(&self.query)
    }

    pub fn reference_string(&self) -> String {
        alphabet::to_string(&self.reference)
    }
}

/// Final product of aligning one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentOutput {
    /// Reference-length query with insertions removed
    pub query: Sequence<Nucleotide>,
    /// Alignment score of the nucleotide pass
    pub score: i32,
    pub insertions: Vec<Insertion>,
    pub peptides: Vec<Peptide>,
}

impl AlignmentOutput {
    pub fn query_string(&self) -> String {
        alphabet::to_string(&self.query)
    }
}

/// One query entering the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmInput {
    pub index: usize,
    pub name: String,
    pub seq: String,
}

/// One query leaving the pipeline, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmOutput {
    pub index: usize,
    pub name: String,
    pub result: AlignResult<AlignmentOutput>,
}
