//! Configuration handling for the refalign CLI
//!
//! Supports loading configuration from refalign.toml files with CLI argument overrides.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use refalign_core::AlignmentParams;

use crate::error::{CliError, CliResult};

/// File looked up in the working directory when no --config is given.
pub const DEFAULT_CONFIG_FILE: &str = "refalign.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub alignment: AlignmentParams,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Worker threads; 0 or negative uses every hardware thread
    #[serde(default)]
    pub jobs: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving all output files
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,

    /// File name prefix; defaults to the sequence file stem
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basename: Option<String>,

    /// Write per-gene peptide FASTA files
    #[serde(default = "default_true")]
    pub write_peptides: bool,

    /// Write the insertions CSV
    #[serde(default = "default_true")]
    pub write_insertions: bool,

    /// Write the errors CSV
    #[serde(default = "default_true")]
    pub write_errors: bool,
}

/// Comment placed above a section header or key of the example file
const EXAMPLE_COMMENTS: &[(&str, &str)] = &[
    ("[general]", "General settings"),
    ("jobs", "Worker threads; 0 or negative uses every hardware thread"),
    ("[alignment]", "Alignment parameters shared by every query"),
    ("min_length", "Queries shorter than this fail with SequenceTooShort"),
    ("max_band_width", "Band widths above this fail with BadSeedMatches"),
    ("penalty_gap_open_in_frame", "Gap-open cost at the first base of a codon inside a requested gene"),
    ("penalty_gap_open_out_of_frame", "Gap-open cost at the second and third base of a codon"),
    ("[alignment.gap_costs]", "Scoring model; penalties are positive and subtracted"),
    ("score_match", "Bonus for a matching pair of letters"),
    ("penalty_mismatch", "Penalty for a mismatching pair of letters"),
    ("penalty_gap_open", "Paid once per gap, together with the close penalty"),
    ("penalty_gap_close", "Paid once per gap, together with the open penalty"),
    ("penalty_gap_extend", "Paid for every gap column"),
    ("[alignment.seed]", "Seed matching that places the alignment band"),
    ("kmer_length", "K-mer length of each seed"),
    ("seed_count", "Number of seeds spread across the query"),
    ("allowed_mismatches", "Mismatches tolerated within a seed"),
    ("margin_cutoff", "Reference length above which the fixed margin applies"),
    ("margin", "Seed margin for long references; shorter ones use 1% of their length"),
    ("[output]", "Output files"),
    ("dir", "Directory receiving all output files"),
    ("write_peptides", "Write per-gene peptide FASTA files"),
    ("write_insertions", "Write the insertions CSV"),
    ("write_errors", "Write the errors CSV"),
];

// Default value functions
fn default_output_dir() -> PathBuf { PathBuf::from(".") }
fn default_true() -> bool { true }

impl Default for GeneralConfig {
    fn default() -> Self {
        Self { jobs: 0 }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            basename: None,
            write_peptides: true,
            write_insertions: true,
            write_errors: true,
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(config_path: Option<&Path>) -> CliResult<Self> {
        let config = match config_path {
            Some(path) => {
                log::info!("Loading configuration from: {}", path.display());
                Self::load_from_file(path)?
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    log::info!("Loading configuration from: {}", DEFAULT_CONFIG_FILE);
                    Self::load_from_file(&default_path)?
                } else {
                    log::debug!("Using default configuration");
                    Self::default()
                }
            }
        };

        Ok(config)
    }

    /// Load configuration from a specific TOML file
    pub fn load_from_file(path: &Path) -> CliResult<Self> {
        if !path.exists() {
            return Err(CliError::file_not_found(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file(&self, path: &Path) -> CliResult<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Generate example configuration file content, every default annotated
    pub fn example_toml() -> CliResult<String> {
        let plain = toml::to_string_pretty(&Self::default())?;
        let mut annotated = String::from("# refalign configuration\n\n");

        for line in plain.lines() {
            let key = line.split('=').next().unwrap_or_default().trim();
            if let Some((_, comment)) = EXAMPLE_COMMENTS.iter().find(|(name, _)| *name == key) {
                annotated.push_str(&format!("# {}\n", comment));
            }
            annotated.push_str(line);
            annotated.push('\n');

            // Unset options are not serialized
            if key == "dir" {
                annotated.push_str("# File name prefix; defaults to the sequence file stem\n");
                annotated.push_str("# basename = \"queries\"\n");
            }
        }

        Ok(annotated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.jobs, 0);
        assert_eq!(config.alignment.min_length, 100);
        assert!(config.output.write_peptides);
        assert_eq!(config.output.dir, PathBuf::from("."));
    }

    #[test]
    fn test_config_roundtrip() -> CliResult<()> {
        let mut config = Config::default();
        config.general.jobs = 6;
        config.alignment.gap_costs.penalty_gap_extend = 1;
        config.output.basename = Some("run1".to_string());

        let temp_file = NamedTempFile::new()?;
        config.save_to_file(temp_file.path())?;
        let loaded = Config::load_from_file(temp_file.path())?;

        assert_eq!(loaded, config);
        Ok(())
    }

    #[test]
    fn test_partial_file_uses_defaults() -> CliResult<()> {
        let temp_file = NamedTempFile::new()?;
        std::fs::write(
            temp_file.path(),
            "[alignment]\nmin_length = 30\n\n[alignment.gap_costs]\npenalty_mismatch = 2\n",
        )?;

        let config = Config::load_from_file(temp_file.path())?;
        assert_eq!(config.alignment.min_length, 30);
        assert_eq!(config.alignment.gap_costs.penalty_mismatch, 2);
        assert_eq!(config.alignment.gap_costs.score_match, 3);
        assert_eq!(config.alignment.max_band_width, 400);
        assert!(config.output.write_errors);
        Ok(())
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load_from_file(Path::new("/nonexistent/refalign.toml")).unwrap_err();
        assert!(matches!(err, CliError::FileNotFound { .. }));
    }

    #[test]
    fn test_example_toml_generation() {
        let example = Config::example_toml().unwrap();
        assert!(example.contains("[general]"));
        assert!(example.contains("[alignment.gap_costs]"));
        assert!(example.contains("[output]"));
        assert!(example.contains("# Worker threads; 0 or negative uses every hardware thread\njobs = 0"));
        assert!(example.contains("# basename = \"queries\""));

        let lines: Vec<_> = example.lines().collect();
        for (i, line) in lines.iter().enumerate() {
            let setting = !line.is_empty() && !line.starts_with('#');
            if setting {
                assert!(lines[i - 1].starts_with("# "), "no comment above `{}`", line);
            }
        }

        let parsed: Config = toml::from_str(&example).unwrap();
        assert_eq!(parsed, Config::default());
    }
}
