//! GFF3/GTF gene map input
//!
//! Only `gene` features are read. Coordinates are converted from the 1-based
//! inclusive convention of the file to 0-based half-open ranges.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

use crate::types::{Gene, GeneMap, Strand};

/// Attribute keys holding the gene name, in order of preference.
const GENE_NAME_KEYS: [&str; 3] = ["gene_name", "gene", "Name"];

const GFF_NUM_COLUMNS: usize = 9;

#[derive(Debug, Error)]
pub enum GffError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("GFF line {line}: expected 9 tab-separated columns, got {found}")]
    MissingColumns { line: usize, found: usize },

    #[error("GFF line {line}: {message}")]
    InvalidField { line: usize, message: String },

    #[error("GFF line {line}: none of the attributes gene_name, gene or Name is present")]
    MissingGeneName { line: usize },

    #[error("GFF line {line}: {message}")]
    InvalidGene { line: usize, message: String },

    #[error("GFF line {line}: gene \"{name}\" is defined more than once")]
    DuplicateGene { line: usize, name: String },
}

pub type GffResult<T> = Result<T, GffError>;

pub fn read_gene_map<P: AsRef<Path>>(path: P) -> GffResult<GeneMap> {
    let file = File::open(path)?;
    parse_gene_map(BufReader::new(file))
}

pub fn parse_gene_map<R: BufRead>(reader: R) -> GffResult<GeneMap> {
    let mut gene_map = GeneMap::new();

    for (line_index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = line_index + 1;
        let trimmed = line.trim();
        // Embedded sequences end the feature section.
        if trimmed.starts_with("##FASTA") {
            break;
        }
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let Some(gene) = parse_line(trimmed, line_number)? else {
            continue;
        };

        if gene_map.contains_key(&gene.name) {
            return Err(GffError::DuplicateGene {
                line: line_number,
                name: gene.name,
            });
        }
        gene_map.insert(gene.name.clone(), gene);
    }

    log::debug!("Loaded {} gene(s) from gene map", gene_map.len());
    Ok(gene_map)
}

fn parse_line(line: &str, line_number: usize) -> GffResult<Option<Gene>> {
    let columns: Vec<&str> = line.split('\t').map(str::trim).collect();
    if columns.len() < GFF_NUM_COLUMNS {
        return Err(GffError::MissingColumns {
            line: line_number,
            found: columns.len(),
        });
    }

    if columns[2] != "gene" {
        return Ok(None);
    }

    let invalid = |message: String| GffError::InvalidField {
        line: line_number,
        message,
    };

    let start: usize = columns[3]
        .parse()
        .map_err(|_| invalid(format!("invalid start \"{}\"", columns[3])))?;
    let end: usize = columns[4]
        .parse()
        .map_err(|_| invalid(format!("invalid end \"{}\"", columns[4])))?;

    let strand = single_char(columns[6])
        .and_then(|c| Strand::try_from(c).ok())
        .ok_or_else(|| {
            invalid(format!(
                "gene strand is invalid: \"{}\", expected \"+\" or \"-\"",
                columns[6]
            ))
        })?;

    let frame: u8 = match columns[7] {
        "." => 0,
        frame => frame
            .parse()
            .map_err(|_| invalid(format!("invalid frame \"{}\"", frame)))?,
    };

    let name = gene_name(columns[8]).ok_or(GffError::MissingGeneName { line: line_number })?;

    if start < 1 || start > end {
        return Err(GffError::InvalidGene {
            line: line_number,
            message: format!("gene \"{}\": range is invalid: ({}, {})", name, start, end),
        });
    }

    let gene = Gene {
        name,
        start: start - 1,
        end,
        strand,
        frame,
    };
    gene.validate().map_err(|message| GffError::InvalidGene {
        line: line_number,
        message,
    })?;

    Ok(Some(gene))
}

fn single_char(field: &str) -> Option<char> {
    let mut chars = field.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Split an attribute column into key/value pairs. Accepts both GFF3
/// (`key=value`) and GTF (`key "value"`) syntax.
fn parse_attributes(column: &str) -> Vec<(&str, &str)> {
    column
        .split(';')
        .map(str::trim)
        .filter(|attribute| !attribute.is_empty())
        .filter_map(|attribute| {
            attribute
                .split_once('=')
                .or_else(|| attribute.split_once(char::is_whitespace))
        })
        .map(|(key, value)| (key.trim(), value.trim().trim_matches(|c: char| c == '"' || c == '\'')))
        .filter(|(_, value)| !value.is_empty() && *value != ".")
        .collect()
}

fn gene_name(column: &str) -> Option<String> {
    let attributes = parse_attributes(column);
    GENE_NAME_KEYS.iter().find_map(|wanted| {
        attributes
            .iter()
            .find(|(key, _)| key == wanted)
            .map(|(_, value)| value.to_string())
    })
}
