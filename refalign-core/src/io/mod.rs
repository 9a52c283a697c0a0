//! Sequence and annotation file formats

#[cfg(feature = "io-fasta")]
pub mod fasta;
#[cfg(feature = "io-gff")]
pub mod gff;

#[cfg(feature = "io-fasta")]
pub use fasta::{read_reference, FastaError, FastaReader};
#[cfg(feature = "io-gff")]
pub use gff::{parse_gene_map, read_gene_map, GffError};
