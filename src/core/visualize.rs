use crate::config::{Resources, Stage};
use crate::consts::*;
use crate::graph::Task;
use crate::layout::DirectoryLayout;

/// Build the final visualization task joining every quality branch.
///
/// Contract: `visualize_quality.sh busco_dir rnaquast_dir out_dir
/// draft_busco_dir_or_empty draft_rnaquast_dir_or_empty log_dir`
///
/// Without a draft branch the two draft directory arguments are passed as
/// empty strings so the script's positional contract stays fixed.
pub fn task(
    layout: &DirectoryLayout,
    with_draft: bool,
    resources: Resources,
    depends_on: Vec<String>,
) -> Task {
    let id = Stage::Visualize.as_str().to_string();

    let (draft_busco, draft_rnaquast) = if with_draft {
        (
            layout.draft_busco.display().to_string(),
            layout.draft_rnaquast.display().to_string(),
        )
    } else {
        (String::from("\"\""), String::from("\"\""))
    };

    Task {
        stdout_log: layout.logs.visualization.join(format!("{}.out", id)),
        stderr_log: layout.logs.visualization.join(format!("{}.err", id)),
        id,
        stage: Stage::Visualize,
        program: VISUALIZE_EXE.into(),
        args: vec![
            layout.busco.display().to_string(),
            layout.rnaquast.display().to_string(),
            layout.visualization.display().to_string(),
            draft_busco,
            draft_rnaquast,
            layout.logs.visualization.display().to_string(),
        ],
        resources,
        depends_on,
    }
}
