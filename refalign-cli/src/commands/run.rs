//! Run command implementation - align a FASTA stream against the reference

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};

use refalign_core::io::{read_gene_map, read_reference, FastaReader};
use refalign_core::{Aligner, AlignmentParams, GeneMap, Pipeline};

use crate::config::Config;
use crate::error::CliError;
use crate::output::OutputWriter;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// FASTA or FASTQ file with query sequences (plain or gzip)
    #[arg(short = 'i', long)]
    pub sequences: PathBuf,

    /// FASTA file whose first record is the reference
    #[arg(short, long)]
    pub reference: PathBuf,

    /// GFF3 or GTF gene map of the reference
    #[arg(short = 'm', long)]
    pub genemap: Option<PathBuf>,

    /// Comma-separated genes to translate; all genes of the map when omitted
    #[arg(short, long, value_delimiter = ',')]
    pub genes: Vec<String>,

    /// Output directory
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Prefix of output file names
    #[arg(short = 'n', long)]
    pub output_basename: Option<String>,

    /// Worker threads; 0 or negative uses every hardware thread
    #[arg(short, long, allow_negative_numbers = true)]
    pub jobs: Option<i64>,

    /// Override the minimum query length
    #[arg(long)]
    pub min_length: Option<usize>,

    /// Override the maximum seed band width
    #[arg(long)]
    pub max_band_width: Option<usize>,
}

pub fn execute(config: &Config, args: RunArgs, quiet: bool) -> Result<()> {
    log::info!("Starting alignment run");
    log::info!("Sequences: {}", args.sequences.display());
    log::info!("Reference: {}", args.reference.display());

    for path in [Some(&args.sequences), Some(&args.reference), args.genemap.as_ref()]
        .into_iter()
        .flatten()
    {
        if !path.exists() {
            return Err(CliError::file_not_found(path.clone()).into());
        }
    }

    let (reference_name, reference) = read_reference(&args.reference)
        .map_err(|e| CliError::parse(args.reference.display().to_string(), e.to_string()))?;
    log::info!("Reference \"{}\": {} nt", reference_name, reference.len());

    let gene_map = match &args.genemap {
        Some(path) => read_gene_map(path)
            .map_err(|e| CliError::parse(path.display().to_string(), e.to_string()))?,
        None => GeneMap::new(),
    };

    let genes = select_genes(&gene_map, args.genemap.is_some(), &args.genes, reference.len())?;
    if genes.is_empty() {
        log::info!("No genes selected, translation is skipped");
    } else {
        log::info!("Genes to translate: {}", genes.join(", "));
    }

    let params = alignment_params(config, &args);
    log::debug!(
        "Alignment parameters: {}",
        serde_json::to_string(&params).context("Failed to serialize alignment parameters")?
    );

    let mut output_config = config.output.clone();
    if let Some(dir) = &args.output_dir {
        output_config.dir = dir.clone();
    }
    let basename = args
        .output_basename
        .clone()
        .or_else(|| output_config.basename.clone())
        .unwrap_or_else(|| default_basename(&args.sequences));
    log::info!("Output: {}/{}.*", output_config.dir.display(), basename);

    let mut writer = OutputWriter::create(&output_config, &basename, &genes)?;

    let aligner = Aligner::new(reference, gene_map, genes, params);
    let jobs = args.jobs.unwrap_or(config.general.jobs);
    let pipeline = Pipeline::new(&aligner, Some(jobs)).context("Failed to build worker pool")?;

    let reader = FastaReader::from_path(&args.sequences)
        .map_err(|e| CliError::parse(args.sequences.display().to_string(), e.to_string()))?;

    let progress = progress_bar(quiet)?;

    let inputs = reader.map(|input| input.context("Failed to read query sequences"));
    let stats = pipeline.run(inputs, |output| {
        writer.write(&output)?;
        progress.inc(1);
        Ok(())
    })?;

    progress.finish_and_clear();
    writer.finish()?;

    log::info!(
        "Aligned {} of {} sequence(s)",
        stats.processed - stats.failed,
        stats.processed
    );
    if stats.failed > 0 {
        log::warn!("{} sequence(s) failed, see the errors file", stats.failed);
    }

    Ok(())
}

/// Resolve `--genes` against the gene map. An empty request means every gene
/// of the map.
fn select_genes(
    gene_map: &GeneMap,
    has_gene_map: bool,
    requested: &[String],
    reference_length: usize,
) -> Result<Vec<String>, CliError> {
    if !has_gene_map {
        if requested.is_empty() {
            return Ok(Vec::new());
        }
        return Err(CliError::validation("--genes requires a gene map (--genemap)"));
    }

    let genes: Vec<String> = if requested.is_empty() {
        gene_map.keys().cloned().collect()
    } else {
        requested.to_vec()
    };

    for name in &genes {
        let gene = gene_map
            .get(name)
            .ok_or_else(|| CliError::validation(format!("gene \"{}\" is not in the gene map", name)))?;
        if gene.end > reference_length {
            return Err(CliError::validation(format!(
                "gene \"{}\" ends at {} beyond the reference length {}",
                name, gene.end, reference_length
            )));
        }
    }

    Ok(genes)
}

fn alignment_params(config: &Config, args: &RunArgs) -> AlignmentParams {
    let mut params = config.alignment.clone();
    if let Some(min_length) = args.min_length {
        params.min_length = min_length;
    }
    if let Some(max_band_width) = args.max_band_width {
        params.max_band_width = max_band_width;
    }
    params
}

/// Sequence file name without its extensions, `queries.fasta.gz` giving `queries`.
fn default_basename(sequences: &Path) -> String {
    sequences
        .file_name()
        .map(|name| name.to_string_lossy())
        .and_then(|name| name.split('.').next().map(str::to_string))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "refalign".to_string())
}

fn progress_bar(quiet: bool) -> Result<ProgressBar> {
    if quiet {
        return Ok(ProgressBar::hidden());
    }
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {pos} sequences ({per_sec})")
            .context("Invalid progress template")?,
    );
    bar.enable_steady_tick(Duration::from_millis(120));
    Ok(bar)
}
