//! FASTA/FASTQ sequence input
//!
//! Streams records with needletail (plain or gzip-compressed) and turns them
//! into pipeline inputs with unique names.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use needletail::parser::FastxReader;
use needletail::{parse_fastx_file, parse_fastx_reader};
use thiserror::Error;

use crate::alphabet::{self, Nucleotide, Sequence};
use crate::types::AlgorithmInput;

#[derive(Debug, Error)]
pub enum FastaError {
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Empty file or no sequences found")]
    EmptyFile,
}

/// Streaming reader yielding one [`AlgorithmInput`] per record.
///
/// Records without a name are called `Untitled`; repeated names get a
/// ` (n)` suffix counting earlier occurrences.
pub struct FastaReader {
    reader: Box<dyn FastxReader>,
    seen: HashMap<String, usize>,
    index: usize,
}

impl FastaReader {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, FastaError> {
        let reader = parse_fastx_file(&path).map_err(|e| FastaError::Parse(e.to_string()))?;
        Ok(Self::with_reader(reader))
    }

    pub fn from_reader<R: Read + Send + 'static>(reader: R) -> Result<Self, FastaError> {
        let reader = parse_fastx_reader(reader).map_err(|e| FastaError::Parse(e.to_string()))?;
        Ok(Self::with_reader(reader))
    }

    fn with_reader(reader: Box<dyn FastxReader>) -> Self {
        Self {
            reader,
            seen: HashMap::new(),
            index: 0,
        }
    }

    fn unique_name(&mut self, header: &[u8]) -> String {
        let name = String::from_utf8_lossy(header).trim().to_string();
        let name = if name.is_empty() {
            "Untitled".to_string()
        } else {
            name
        };

        match self.seen.get_mut(&name) {
            Some(count) => {
                let unique = format!("{} ({})", name, count);
                *count += 1;
                unique
            }
            None => {
                self.seen.insert(name.clone(), 1);
                name
            }
        }
    }
}

impl Iterator for FastaReader {
    type Item = Result<AlgorithmInput, FastaError>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = match self.reader.next()? {
            Ok(record) => record,
            Err(e) => return Some(Err(FastaError::Parse(e.to_string()))),
        };

        let header = record.id().to_vec();
        let seq = String::from_utf8_lossy(&record.seq()).into_owned();
        let name = self.unique_name(&header);

        let input = AlgorithmInput {
            index: self.index,
            name,
            seq,
        };
        self.index += 1;
        Some(Ok(input))
    }
}

/// Load the first record of a FASTA file as the reference.
pub fn read_reference<P: AsRef<Path>>(path: P) -> Result<(String, Sequence<Nucleotide>), FastaError> {
    let mut reader = FastaReader::from_path(path)?;
    let first = reader.next().ok_or(FastaError::EmptyFile)??;
    let sequence = alphabet::remove_gaps(&alphabet::parse_sequence::<Nucleotide>(&first.seq));
    if sequence.is_empty() {
        return Err(FastaError::EmptyFile);
    }
    Ok((first.name, sequence))
}
