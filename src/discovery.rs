use std::path::{Path, PathBuf};

use crate::error::{PipelineError, Result};

/// A paired-end sample found in the raw reads directory.
///
/// Both paths exist at discovery time; `name` is the filename with the
/// matched R1 suffix stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    pub name: String,
    pub read1: PathBuf,
    pub read2: PathBuf,
}

/// Scan `raw_reads_dir` for paired-end read files.
///
/// # Arguments
///
/// * `raw_reads_dir` - Directory holding the raw fastq files.
/// * `patterns` - Ordered `(r1_suffix, r2_suffix)` conventions; the first
///   pattern matching a candidate wins, which also fixes the sample name.
///
/// # Returns
///
/// Samples in sorted-filename order. Candidates with no existing R2 partner
/// under any convention are dropped silently; zero pairs overall is an
/// input error.
///
/// # Example
///
/// ``` rust, no_run
/// # use transpipe::discovery::discover;
/// # use std::path::Path;
/// # fn main() -> transpipe::error::Result<()> {
/// let samples = discover(
///     Path::new("/data/raw"),
///     &[("_R1.fastq.gz".into(), "_R2.fastq.gz".into())],
/// )?;
/// # Ok(())
/// # }
/// ```
pub fn discover(raw_reads_dir: &Path, patterns: &[(String, String)]) -> Result<Vec<Sample>> {
    if !raw_reads_dir.is_dir() {
        return Err(PipelineError::Input(format!(
            "raw reads directory does not exist: {}",
            raw_reads_dir.display()
        )));
    }

    let mut entries = std::fs::read_dir(raw_reads_dir)?
        .collect::<std::result::Result<Vec<_>, _>>()?
        .into_iter()
        .filter(|entry| entry.path().is_file())
        .map(|entry| entry.path())
        .collect::<Vec<_>>();

    if entries.is_empty() {
        return Err(PipelineError::Input(format!(
            "raw reads directory is empty: {}",
            raw_reads_dir.display()
        )));
    }

    // read_dir order is platform-dependent; sort for reproducible naming
    entries.sort();

    let mut samples = Vec::new();

    for path in &entries {
        let filename = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => continue,
        };

        for (r1_suffix, r2_suffix) in patterns {
            if let Some(name) = filename.strip_suffix(r1_suffix.as_str()) {
                if name.is_empty() {
                    continue;
                }

                let read2 = raw_reads_dir.join(format!("{}{}", name, r2_suffix));

                if read2.is_file() {
                    samples.push(Sample {
                        name: name.to_string(),
                        read1: path.clone(),
                        read2,
                    });

                    // first match wins
                    break;
                }
            }
        }
    }

    if samples.is_empty() {
        return Err(PipelineError::Input(format!(
            "no paired-end samples found in {}",
            raw_reads_dir.display()
        )));
    }

    log::info!(
        "INFO [STEP 0]: Discovered {} paired-end sample/s in {}",
        samples.len(),
        raw_reads_dir.display()
    );

    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        File::create(dir.join(name)).unwrap();
    }

    fn patterns() -> Vec<(String, String)> {
        crate::consts::DEFAULT_PATTERNS
            .iter()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect()
    }

    #[test]
    fn finds_pairs_across_conventions_in_sorted_order() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "sampleA_R1_001.fastq.gz");
        touch(dir.path(), "sampleA_R2_001.fastq.gz");
        touch(dir.path(), "sampleB_1.fastq.gz");
        touch(dir.path(), "sampleB_2.fastq.gz");

        let samples = discover(dir.path(), &patterns()).unwrap();

        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].name, "sampleA");
        assert_eq!(samples[1].name, "sampleB");
        assert!(samples.iter().all(|s| s.read1.is_file() && s.read2.is_file()));
    }

    #[test]
    fn unpaired_candidate_is_dropped_silently() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "good_R1.fastq.gz");
        touch(dir.path(), "good_R2.fastq.gz");
        touch(dir.path(), "orphan_R1.fastq.gz");

        let samples = discover(dir.path(), &patterns()).unwrap();

        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].name, "good");
    }

    #[test]
    fn first_pattern_wins_for_naming() {
        let dir = TempDir::new().unwrap();
        // "s_R1_001.fastq.gz" matches both conventions below; the first one
        // decides the sample name
        touch(dir.path(), "s_R1_001.fastq.gz");
        touch(dir.path(), "s_R2_001.fastq.gz");
        touch(dir.path(), "s_R1_002.fastq.gz");

        let overlapping = vec![
            ("_R1_001.fastq.gz".to_string(), "_R2_001.fastq.gz".to_string()),
            ("1.fastq.gz".to_string(), "2.fastq.gz".to_string()),
        ];

        let samples = discover(dir.path(), &overlapping).unwrap();

        assert_eq!(samples[0].name, "s");
        assert!(samples[0].read2.ends_with("s_R2_001.fastq.gz"));
    }

    #[test]
    fn missing_directory_is_an_input_error() {
        let err = discover(Path::new("/no/such/dir"), &patterns()).unwrap_err();
        assert!(matches!(err, PipelineError::Input(_)));
    }

    #[test]
    fn empty_directory_is_an_input_error() {
        let dir = TempDir::new().unwrap();
        let err = discover(dir.path(), &patterns()).unwrap_err();
        assert!(matches!(err, PipelineError::Input(_)));
    }

    #[test]
    fn no_pairs_at_all_is_an_input_error() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "notes.txt");
        touch(dir.path(), "lonely_R1.fastq.gz");

        let err = discover(dir.path(), &patterns()).unwrap_err();
        assert!(matches!(err, PipelineError::Input(_)));
    }

    #[test]
    fn discovery_is_deterministic() {
        let dir = TempDir::new().unwrap();
        for s in ["zeta", "alpha", "mid"] {
            touch(dir.path(), &format!("{}_R1.fastq.gz", s));
            touch(dir.path(), &format!("{}_R2.fastq.gz", s));
        }

        let first = discover(dir.path(), &patterns()).unwrap();
        let second = discover(dir.path(), &patterns()).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            first.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
            vec!["alpha", "mid", "zeta"]
        );
    }
}
