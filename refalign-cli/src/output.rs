//! Output files of the run command
//!
//! Everything is written through buffered writers in the order results
//! leave the pipeline, which is the input order.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use refalign_core::alphabet::{remove_gaps, to_string};
use refalign_core::{strip_insertions, AlgorithmOutput, AlignmentOutput, Insertion, Peptide};

use crate::config::OutputConfig;
use crate::error::{CliError, CliResult};

/// Width of sequence lines in FASTA output
const FASTA_LINE_WIDTH: usize = 70;

struct PeptideFiles {
    dir: PathBuf,
    basename: String,
    query: BTreeMap<String, BufWriter<File>>,
    reference_written: bool,
}

pub struct OutputWriter {
    aligned: BufWriter<File>,
    insertions: Option<BufWriter<File>>,
    errors: Option<BufWriter<File>>,
    peptides: Option<PeptideFiles>,
}

fn create(path: &Path) -> CliResult<BufWriter<File>> {
    log::debug!("Creating output file: {}", path.display());
    let file = File::create(path)
        .map_err(|e| CliError::io(format!("cannot create {}: {}", path.display(), e)))?;
    Ok(BufWriter::new(file))
}

impl OutputWriter {
    /// Open every output file for `basename` under the configured directory.
    /// Peptide files are opened only for a non-empty `genes` list.
    pub fn create(config: &OutputConfig, basename: &str, genes: &[String]) -> CliResult<Self> {
        fs::create_dir_all(&config.dir)?;
        let path = |suffix: &str| config.dir.join(format!("{}.{}", basename, suffix));

        let aligned = create(&path("aligned.fasta"))?;

        let insertions = if config.write_insertions {
            let mut writer = create(&path("insertions.csv"))?;
            writeln!(writer, "seqName,insertions")?;
            Some(writer)
        } else {
            None
        };

        let errors = if config.write_errors {
            let mut writer = create(&path("errors.csv"))?;
            writeln!(writer, "seqName,errors")?;
            Some(writer)
        } else {
            None
        };

        let peptides = if config.write_peptides && !genes.is_empty() {
            let mut query = BTreeMap::new();
            for gene in genes {
                query.insert(gene.clone(), create(&path(&format!("gene.{}.fasta", gene)))?);
            }
            Some(PeptideFiles {
                dir: config.dir.clone(),
                basename: basename.to_string(),
                query,
                reference_written: false,
            })
        } else {
            None
        };

        Ok(Self {
            aligned,
            insertions,
            errors,
            peptides,
        })
    }

    pub fn write(&mut self, output: &AlgorithmOutput) -> CliResult<()> {
        match &output.result {
            Ok(result) => self.write_success(&output.name, result),
            Err(err) => {
                log::warn!(
                    "Sequence #{} \"{}\" failed ({}): {}; excluded from aligned output",
                    output.index,
                    output.name,
                    err.kind(),
                    err
                );
                if let Some(errors) = &mut self.errors {
                    writeln!(errors, "{},{}", csv_field(&output.name), csv_field(&err.to_string()))?;
                }
                Ok(())
            }
        }
    }

    fn write_success(&mut self, name: &str, result: &AlignmentOutput) -> CliResult<()> {
        write_fasta_record(&mut self.aligned, name, &result.query_string())?;

        if let Some(insertions) = &mut self.insertions {
            writeln!(insertions, "{},{}", csv_field(name), csv_field(&format_insertions(&result.insertions)))?;
        }

        if let Some(peptides) = &mut self.peptides {
            peptides.write(name, &result.peptides)?;
        }

        if let Some(errors) = &mut self.errors {
            writeln!(errors, "{},", csv_field(name))?;
        }
        Ok(())
    }

    /// Flush every file; buffered data is lost if this is skipped.
    pub fn finish(mut self) -> CliResult<()> {
        self.aligned.flush()?;
        if let Some(writer) = &mut self.insertions {
            writer.flush()?;
        }
        if let Some(writer) = &mut self.errors {
            writer.flush()?;
        }
        if let Some(peptides) = &mut self.peptides {
            for writer in peptides.query.values_mut() {
                writer.flush()?;
            }
        }
        Ok(())
    }
}

impl PeptideFiles {
    fn write(&mut self, name: &str, peptides: &[Peptide]) -> CliResult<()> {
        if !self.reference_written {
            for peptide in peptides {
                self.write_reference(peptide)?;
            }
            self.reference_written = true;
        }

        for peptide in peptides {
            let Some(writer) = self.query.get_mut(&peptide.name) else {
                continue;
            };
            let stripped = strip_insertions(&peptide.reference, &peptide.query);
            write_fasta_record(writer, name, &to_string(&stripped.query))?;
        }
        Ok(())
    }

    fn write_reference(&self, peptide: &Peptide) -> CliResult<()> {
        let path = self
            .dir
            .join(format!("{}.gene.{}.ref.fasta", self.basename, peptide.name));
        let mut writer = create(&path)?;
        write_fasta_record(&mut writer, &peptide.name, &to_string(&remove_gaps(&peptide.reference)))?;
        writer.flush()?;
        Ok(())
    }
}

fn write_fasta_record<W: Write>(writer: &mut W, name: &str, seq: &str) -> CliResult<()> {
    writeln!(writer, ">{}", name)?;
    for chunk in seq.as_bytes().chunks(FASTA_LINE_WIDTH) {
        writer.write_all(chunk)?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}

/// `begin:seq` pairs joined by `;`
pub fn format_insertions(insertions: &[Insertion]) -> String {
    insertions
        .iter()
        .map(|ins| ins.to_string())
        .collect::<Vec<_>>()
        .join(";")
}

/// Quote a CSV field when it contains a separator, quote or line break.
pub fn csv_field(value: &str) -> String {
    if value.contains(|c: char| matches!(c, ',' | '"' | '\n' | '\r')) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
