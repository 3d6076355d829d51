use crate::config::{Resources, Stage};
use crate::consts::*;
use crate::discovery::Sample;
use crate::graph::Task;
use crate::layout::DirectoryLayout;
use std::path::PathBuf;

/// Predicted trimmed output paths for a sample, shared with the merge
/// manifest writer so both sides agree before any job has run.
pub fn trimmed_outputs(sample: &Sample, layout: &DirectoryLayout) -> (PathBuf, PathBuf) {
    (
        layout.trimmed.join(format!("{}{}", sample.name, TRIMMED_SUFFIX_R1)),
        layout.trimmed.join(format!("{}{}", sample.name, TRIMMED_SUFFIX_R2)),
    )
}

/// Build the trim task for one sample.
///
/// Contract: `trim_reads.sh read1 read2 out1 out2 sample_name log_dir`
///
/// # Example
///
/// ``` rust, no_run
/// # use transpipe::config::{Config, Stage};
/// # use transpipe::core::trim;
/// # use transpipe::discovery::Sample;
/// # use transpipe::layout::DirectoryLayout;
/// # use std::path::{Path, PathBuf};
/// # let sample = Sample { name: "sampleA".into(), read1: PathBuf::new(), read2: PathBuf::new() };
/// # let layout = DirectoryLayout::provision(Path::new("results"), Path::new("logs")).unwrap();
/// # let config = Config::read(PathBuf::from("config.toml")).unwrap();
/// let task = trim::task(&sample, &layout, config.resources(Stage::Trim));
///
/// assert_eq!(task.id, "trim_sampleA");
/// ```
pub fn task(sample: &Sample, layout: &DirectoryLayout, resources: Resources) -> Task {
    let id = format!("trim_{}", sample.name);
    let (out1, out2) = trimmed_outputs(sample, layout);

    Task {
        stdout_log: layout.logs.trimmed.join(format!("{}.out", id)),
        stderr_log: layout.logs.trimmed.join(format!("{}.err", id)),
        id,
        stage: Stage::Trim,
        program: TRIM_EXE.into(),
        args: vec![
            sample.read1.display().to_string(),
            sample.read2.display().to_string(),
            out1.display().to_string(),
            out2.display().to_string(),
            sample.name.clone(),
            layout.logs.trimmed.display().to_string(),
        ],
        resources,
        depends_on: Vec::new(),
    }
}
