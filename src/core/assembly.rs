use crate::config::{Resources, Stage};
use crate::consts::*;
use crate::graph::Task;
use crate::layout::DirectoryLayout;

/// Build the assembly task.
///
/// Contract: `assemble_transcriptome.sh merged1 merged2 out_dir extra_opts log_dir`
///
/// The assembler writes a fixed-name `transcripts.fasta` into `out_dir`,
/// which both quality stages consume.
pub fn task(layout: &DirectoryLayout, resources: Resources, depends_on: Vec<String>) -> Task {
    let id = Stage::Assembly.as_str().to_string();
    let extra = if resources.extra.is_empty() {
        String::from("\"\"")
    } else {
        format!("\"{}\"", resources.extra)
    };

    Task {
        stdout_log: layout.logs.assembly.join(format!("{}.out", id)),
        stderr_log: layout.logs.assembly.join(format!("{}.err", id)),
        id,
        stage: Stage::Assembly,
        program: ASSEMBLY_EXE.into(),
        args: vec![
            layout.merged.join(MERGED_R1).display().to_string(),
            layout.merged.join(MERGED_R2).display().to_string(),
            layout.assembly.display().to_string(),
            extra,
            layout.logs.assembly.display().to_string(),
        ],
        resources,
        depends_on,
    }
}
