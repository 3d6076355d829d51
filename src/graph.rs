use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::config::{Config, Resources, Stage};
use crate::consts::*;
use crate::core::{assembly, busco, merge, rnaquast, trim, visualize};
use crate::discovery::Sample;
use crate::error::{PipelineError, Result};
use crate::layout::DirectoryLayout;

/// A single schedulable unit of work.
///
/// Immutable once submitted; `depends_on` holds task ids, which the driver
/// translates to scheduler job ids at submission time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub stage: Stage,
    pub program: String,
    pub args: Vec<String>,
    pub resources: Resources,
    pub depends_on: Vec<String>,
    pub stdout_log: PathBuf,
    pub stderr_log: PathBuf,
}

impl Task {
    /// Shell command line handed to the scheduler's wrap option.
    pub fn command_line(&self) -> String {
        let mut cmd = self.program.clone();
        for arg in &self.args {
            cmd.push(' ');
            cmd.push_str(arg);
        }
        cmd
    }
}

/// Tasks in topological (build) order with id lookup.
///
/// Acyclic by construction: a task may only depend on tasks pushed before
/// it, which `push` enforces.
#[derive(Debug, Default)]
pub struct TaskGraph {
    tasks: Vec<Task>,
    index: HashMap<String, usize>,
}

impl TaskGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a task. Its dependencies must already be in the graph and its
    /// id must be fresh.
    pub fn push(&mut self, task: Task) -> Result<()> {
        if self.index.contains_key(&task.id) {
            return Err(PipelineError::Config(format!(
                "duplicate task id '{}'",
                task.id
            )));
        }

        for dep in &task.depends_on {
            if !self.index.contains_key(dep) {
                return Err(PipelineError::Config(format!(
                    "task '{}' depends on unknown task '{}'",
                    task.id, dep
                )));
            }
        }

        self.index.insert(task.id.clone(), self.tasks.len());
        self.tasks.push(task);

        Ok(())
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.index.get(id).map(|&i| &self.tasks[i])
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// Build the full task graph for one pipeline run.
///
/// Topology: per-sample trim fan-out, merge fan-in, assembly, then the
/// busco/rnaquast quality fan-out feeding visualization. When `draft` names
/// an existing fasta, an independent draft quality branch is added and
/// visualization waits on it as well; a draft path that does not exist is
/// logged and ignored, yielding a graph identical to the no-draft case.
///
/// # Arguments
///
/// * `samples` - Discovered paired-end samples.
/// * `layout` - Provisioned directory tree; the merge manifests are written
///   into `layout.merged` as a side effect.
/// * `config` - Per-stage resources and the busco reference db path.
/// * `draft` - Optional previously assembled transcriptome.
pub fn build(
    samples: &[Sample],
    layout: &DirectoryLayout,
    config: &Config,
    draft: Option<&Path>,
) -> Result<TaskGraph> {
    let busco_db = config
        .get_global_path(BUSCO_DB)
        .ok_or_else(|| PipelineError::Config(format!("'{}' missing from [global]", BUSCO_DB)))?;

    let mut graph = TaskGraph::new();

    // STEP 1: one trim task per sample, no dependencies
    let mut trim_ids = Vec::with_capacity(samples.len());
    for sample in samples {
        let task = trim::task(sample, layout, config.resources(Stage::Trim));
        trim_ids.push(task.id.clone());
        graph.push(task)?;
    }

    // STEP 2: merge waits on every trim job
    let merge_task = merge::task(
        samples,
        layout,
        config.resources(Stage::Merge),
        trim_ids.clone(),
    )?;
    let merge_id = merge_task.id.clone();
    graph.push(merge_task)?;

    // STEP 3: assembly
    let assembly_task = assembly::task(
        layout,
        config.resources(Stage::Assembly),
        vec![merge_id.clone()],
    );
    let assembly_id = assembly_task.id.clone();
    let transcripts = layout.assembly.join(TRANSCRIPTS_FA);
    graph.push(assembly_task)?;

    // STEP 4: quality fan-out on the fresh assembly
    graph.push(busco::task(
        Stage::Busco,
        &transcripts,
        &layout.busco,
        &layout.logs.busco,
        &busco_db,
        config.resources(Stage::Busco),
        vec![assembly_id.clone()],
    ))?;
    graph.push(rnaquast::task(
        Stage::Rnaquast,
        &transcripts,
        &layout.rnaquast,
        &layout.logs.rnaquast,
        layout,
        config.resources(Stage::Rnaquast),
        vec![assembly_id],
    ))?;

    // STEP 5: optional draft branch, independent of the main chain
    let draft = match draft {
        Some(path) if path.exists() => Some(path),
        Some(path) => {
            log::warn!(
                "WARN: draft transcriptome {} does not exist, skipping draft branch",
                path.display()
            );
            None
        }
        None => None,
    };

    if let Some(draft_fasta) = draft {
        graph.push(busco::task(
            Stage::DraftBusco,
            draft_fasta,
            &layout.draft_busco,
            &layout.logs.draft_busco,
            &busco_db,
            config.resources(Stage::DraftBusco),
            Vec::new(),
        ))?;
        graph.push(rnaquast::task(
            Stage::DraftRnaquast,
            draft_fasta,
            &layout.draft_rnaquast,
            &layout.logs.draft_rnaquast,
            layout,
            config.resources(Stage::DraftRnaquast),
            Vec::new(),
        ))?;
    }

    // STEP 6: visualization joins every quality task that exists
    let mut viz_deps = vec![
        Stage::Busco.as_str().to_string(),
        Stage::Rnaquast.as_str().to_string(),
    ];
    if draft.is_some() {
        viz_deps.push(Stage::DraftBusco.as_str().to_string());
        viz_deps.push(Stage::DraftRnaquast.as_str().to_string());
    }

    graph.push(visualize::task(
        layout,
        draft.is_some(),
        config.resources(Stage::Visualize),
        viz_deps,
    ))?;

    log::info!(
        "INFO [STEP 0]: Built task graph with {} task/s for {} sample/s",
        graph.len(),
        samples.len()
    );

    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    fn fixture(n_samples: usize) -> (TempDir, Vec<Sample>, DirectoryLayout, Config) {
        let base = TempDir::new().unwrap();
        let raw = base.path().join("raw");
        std::fs::create_dir_all(&raw).unwrap();

        let samples = (0..n_samples)
            .map(|i| {
                let r1 = raw.join(format!("s{}_R1.fastq.gz", i));
                let r2 = raw.join(format!("s{}_R2.fastq.gz", i));
                File::create(&r1).unwrap();
                File::create(&r2).unwrap();
                Sample {
                    name: format!("s{}", i),
                    read1: r1,
                    read2: r2,
                }
            })
            .collect();

        let layout = DirectoryLayout::provision(
            &base.path().join("results"),
            &base.path().join("logs"),
        )
        .unwrap();

        let config: Config = toml::from_str("[global]\nbusco_db = \"/db/odb10\"").unwrap();

        (base, samples, layout, config)
    }

    fn shape(graph: &TaskGraph) -> Vec<(String, Vec<String>)> {
        graph
            .tasks()
            .iter()
            .map(|t| (t.id.clone(), t.depends_on.clone()))
            .collect()
    }

    #[test]
    fn no_draft_topology() {
        let (_base, samples, layout, config) = fixture(3);
        let graph = build(&samples, &layout, &config, None).unwrap();

        // 3 trims + merge + assembly + busco + rnaquast + visualize
        assert_eq!(graph.len(), 8);

        let merge = graph.get("merge").unwrap();
        assert_eq!(merge.depends_on.len(), 3);
        assert!(merge.depends_on.iter().all(|d| d.starts_with("trim_")));

        let assembly = graph.get("assembly").unwrap();
        assert_eq!(assembly.depends_on, vec!["merge"]);

        let viz = graph.get("visualize").unwrap();
        assert_eq!(viz.depends_on.len(), 2);
        // placeholders for the absent draft branch
        assert!(viz.args.contains(&String::from("\"\"")));
    }

    #[test]
    fn draft_branch_is_independent_and_joins_visualization() {
        let (base, samples, layout, config) = fixture(2);
        let draft = base.path().join("draft.fasta");
        File::create(&draft).unwrap();

        let graph = build(&samples, &layout, &config, Some(&draft)).unwrap();

        assert_eq!(graph.len(), 9);
        assert!(graph.get("draft-busco").unwrap().depends_on.is_empty());
        assert!(graph.get("draft-rnaquast").unwrap().depends_on.is_empty());

        let viz = graph.get("visualize").unwrap();
        assert_eq!(viz.depends_on.len(), 4);
    }

    #[test]
    fn missing_draft_equals_no_draft() {
        let (base, samples, layout, config) = fixture(2);
        let missing = base.path().join("never_written.fasta");

        let without = build(&samples, &layout, &config, None).unwrap();
        let with_missing = build(&samples, &layout, &config, Some(&missing)).unwrap();

        assert_eq!(shape(&without), shape(&with_missing));
    }

    #[test]
    fn merge_manifests_list_predicted_trimmed_paths() {
        let (_base, samples, layout, config) = fixture(2);
        build(&samples, &layout, &config, None).unwrap();

        let r1 = std::fs::read_to_string(layout.merged.join(TRIMMED_R1_MANIFEST)).unwrap();
        let r2 = std::fs::read_to_string(layout.merged.join(TRIMMED_R2_MANIFEST)).unwrap();

        assert_eq!(r1.lines().count(), 2);
        assert_eq!(r2.lines().count(), 2);
        assert!(r1.contains("s0_R1.trimmed.fastq.gz"));
        assert!(r2.contains("s1_R2.trimmed.fastq.gz"));
    }

    #[test]
    fn dependencies_reference_earlier_tasks_only() {
        let (_base, samples, layout, config) = fixture(2);
        let graph = build(&samples, &layout, &config, None).unwrap();

        let mut seen = std::collections::HashSet::new();
        for task in graph.tasks() {
            for dep in &task.depends_on {
                assert!(seen.contains(dep.as_str()), "forward edge to {}", dep);
            }
            seen.insert(task.id.as_str());
        }
    }

    #[test]
    fn push_rejects_unknown_dependency_and_duplicate_id() {
        let (_base, samples, layout, config) = fixture(1);
        let graph = build(&samples, &layout, &config, None).unwrap();
        let template = graph.get("assembly").unwrap().clone();

        let mut fresh = TaskGraph::new();
        assert!(fresh.push(template.clone()).is_err()); // dep on absent merge

        let mut orphan = template.clone();
        orphan.depends_on.clear();
        fresh.push(orphan.clone()).unwrap();
        assert!(fresh.push(orphan).is_err()); // duplicate id
    }

    #[test]
    fn missing_busco_db_is_a_config_error() {
        let (_base, samples, layout, _config) = fixture(1);
        let empty = Config::default();

        let err = build(&samples, &layout, &empty, None).unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
    }
}
