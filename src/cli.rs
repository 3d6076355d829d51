use clap::Parser;
use std::path::PathBuf;

/// Submit the full trimming -> merging -> assembly -> quality -> visualization
/// workflow to the cluster scheduler with dependency chaining.
///
/// # Example
///
/// ```bash,no_run
/// transpipe -c config.toml /data/raw /data/results /data/logs
/// transpipe -c config.toml --draft old_assembly.fasta
/// ```
///
/// # Note
///
/// * Positional directories override the values in the config file
/// * `--draft` enables the optional draft quality branch
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(
        short = 'c',
        long = "config",
        help = "Path to the configuration file",
        value_name = "FILE",
        default_value = "config.toml"
    )]
    pub config: PathBuf,

    #[arg(
        short = 'd',
        long = "draft",
        help = "Previously assembled draft transcriptome to score alongside the new assembly",
        value_name = "FASTA"
    )]
    pub draft: Option<PathBuf>,

    #[arg(long = "dry-run", help = "Build and print the task graph without submitting")]
    pub dry_run: bool,

    #[arg(help = "Directory with raw paired-end reads", value_name = "RAW_READS_DIR")]
    pub raw_reads_dir: Option<PathBuf>,

    #[arg(help = "Base directory for results", value_name = "RESULTS_DIR")]
    pub results_dir: Option<PathBuf>,

    #[arg(help = "Base directory for per-stage logs", value_name = "LOGS_DIR")]
    pub logs_dir: Option<PathBuf>,
}

impl Args {
    /// Resolve a directory from the CLI override or the `[global]` table.
    pub fn resolve_dir(
        cli_value: &Option<PathBuf>,
        config: &crate::config::Config,
        key: &str,
    ) -> Result<PathBuf, crate::error::PipelineError> {
        cli_value
            .clone()
            .or_else(|| config.get_global_path(key))
            .ok_or_else(|| {
                crate::error::PipelineError::Config(format!(
                    "'{}' not given on the command line nor in [global]",
                    key
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::consts::RAW_READS_DIR;

    #[test]
    fn cli_override_wins_over_config() {
        let config: Config = toml::from_str("[global]\nraw_reads_dir = \"/from/config\"").unwrap();
        let cli = Some(PathBuf::from("/from/cli"));

        let resolved = Args::resolve_dir(&cli, &config, RAW_READS_DIR).unwrap();
        assert_eq!(resolved, PathBuf::from("/from/cli"));

        let resolved = Args::resolve_dir(&None, &config, RAW_READS_DIR).unwrap();
        assert_eq!(resolved, PathBuf::from("/from/config"));
    }

    #[test]
    fn missing_dir_everywhere_is_a_config_error() {
        let config = Config::default();
        assert!(Args::resolve_dir(&None, &config, RAW_READS_DIR).is_err());
    }
}
