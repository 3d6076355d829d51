use std::path::Path;

use crate::config::{Resources, Stage};
use crate::consts::*;
use crate::graph::Task;

/// Build a busco completeness task, for either the fresh assembly or the
/// user-supplied draft.
///
/// Contract: `run_busco.sh assembly_fasta out_dir reference_db_dir run_label log_dir`
pub fn task(
    stage: Stage,
    fasta: &Path,
    out_dir: &Path,
    log_dir: &Path,
    reference_db: &Path,
    resources: Resources,
    depends_on: Vec<String>,
) -> Task {
    let id = stage.as_str().to_string();
    let label = match stage {
        Stage::DraftBusco => "draft",
        _ => "assembly",
    };

    Task {
        stdout_log: log_dir.join(format!("{}.out", id)),
        stderr_log: log_dir.join(format!("{}.err", id)),
        id,
        stage,
        program: BUSCO_EXE.into(),
        args: vec![
            fasta.display().to_string(),
            out_dir.display().to_string(),
            reference_db.display().to_string(),
            label.to_string(),
            log_dir.display().to_string(),
        ],
        resources,
        depends_on,
    }
}
