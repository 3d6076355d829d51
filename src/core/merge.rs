use std::fs::File;
use std::io::Write;

use crate::config::{Resources, Stage};
use crate::consts::*;
use crate::core::trim;
use crate::discovery::Sample;
use crate::error::Result;
use crate::graph::Task;
use crate::layout::DirectoryLayout;

/// Build the merge task, fan-in over every trim task.
///
/// Contract: `merge_reads.sh r1_fofn r2_fofn out1 out2 log_dir`
///
/// Writes the two file-of-filenames manifests into `layout.merged` as a side
/// effect, listing the predicted trimmed outputs per sample. The merge job
/// reads them at runtime, after all trim jobs have finished.
pub fn task(
    samples: &[Sample],
    layout: &DirectoryLayout,
    resources: Resources,
    depends_on: Vec<String>,
) -> Result<Task> {
    let r1_manifest = layout.merged.join(TRIMMED_R1_MANIFEST);
    let r2_manifest = layout.merged.join(TRIMMED_R2_MANIFEST);

    let mut r1_file = File::create(&r1_manifest)?;
    let mut r2_file = File::create(&r2_manifest)?;

    for sample in samples {
        let (out1, out2) = trim::trimmed_outputs(sample, layout);
        writeln!(r1_file, "{}", out1.display())?;
        writeln!(r2_file, "{}", out2.display())?;
    }

    let id = Stage::Merge.as_str().to_string();

    Ok(Task {
        stdout_log: layout.logs.merged.join(format!("{}.out", id)),
        stderr_log: layout.logs.merged.join(format!("{}.err", id)),
        id,
        stage: Stage::Merge,
        program: MERGE_EXE.into(),
        args: vec![
            r1_manifest.display().to_string(),
            r2_manifest.display().to_string(),
            layout.merged.join(MERGED_R1).display().to_string(),
            layout.merged.join(MERGED_R2).display().to_string(),
            layout.logs.merged.display().to_string(),
        ],
        resources,
        depends_on,
    })
}
