use std::path::Path;

use crate::config::{Resources, Stage};
use crate::consts::*;
use crate::graph::Task;
use crate::layout::DirectoryLayout;

/// Build an rnaquast read-remapping quality task, for either the fresh
/// assembly or the user-supplied draft.
///
/// Contract: `run_rnaquast.sh assembly_fasta out_dir read1 read2 extra_opts log_dir`
///
/// Both variants remap the merged reads; the draft variant carries no
/// dependency and simply expects them on disk by the time it runs.
pub fn task(
    stage: Stage,
    fasta: &Path,
    out_dir: &Path,
    log_dir: &Path,
    layout: &DirectoryLayout,
    resources: Resources,
    depends_on: Vec<String>,
) -> Task {
    let id = stage.as_str().to_string();
    let extra = if resources.extra.is_empty() {
        String::from("\"\"")
    } else {
        format!("\"{}\"", resources.extra)
    };

    Task {
        stdout_log: log_dir.join(format!("{}.out", id)),
        stderr_log: log_dir.join(format!("{}.err", id)),
        id,
        stage,
        program: RNAQUAST_EXE.into(),
        args: vec![
            fasta.display().to_string(),
            out_dir.display().to_string(),
            layout.merged.join(MERGED_R1).display().to_string(),
            layout.merged.join(MERGED_R2).display().to_string(),
            extra,
            log_dir.display().to_string(),
        ],
        resources,
        depends_on,
    }
}
