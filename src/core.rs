pub mod assembly;
pub mod busco;
pub mod merge;
pub mod rnaquast;
pub mod trim;
pub mod visualize;

use std::collections::{HashMap, HashSet};
use std::io::Write;
use std::path::PathBuf;

use crate::cli::Args;
use crate::config::Config;
use crate::consts::*;
use crate::discovery;
use crate::error::{PipelineError, Result};
use crate::graph::{self, TaskGraph};
use crate::layout::DirectoryLayout;
use crate::scheduler::job::JobHandle;
use crate::scheduler::slurm::SlurmScheduler;
use crate::scheduler::{self, Scheduler};

/// Outcome of a completed submission walk.
///
/// `warnings` collects every soft failure (draft submissions, verification)
/// so callers and tests can assert on them instead of grepping logs.
#[derive(Debug)]
pub struct RunSummary {
    pub handles: Vec<JobHandle>,
    pub warnings: Vec<String>,
    pub cancel_script: PathBuf,
}

/// Top-level entry: discover, provision, build, submit.
pub fn orchestrate(args: Args, config: Config) -> Result<()> {
    let raw_reads = Args::resolve_dir(&args.raw_reads_dir, &config, RAW_READS_DIR)?;
    let results = Args::resolve_dir(&args.results_dir, &config, RESULTS_DIR)?;
    let logs = Args::resolve_dir(&args.logs_dir, &config, LOGS_DIR)?;

    let samples = discovery::discover(&raw_reads, &config.pair_patterns())?;
    let layout = DirectoryLayout::provision(&results, &logs)?;
    let graph = graph::build(&samples, &layout, &config, args.draft.as_deref())?;

    if args.dry_run {
        print_graph(&graph);
        return Ok(());
    }

    let scheduler = SlurmScheduler::from_config(&config);
    let summary = run(&graph, &scheduler, &layout, &config)?;

    log::info!(
        "INFO [STEP 7]: Submitted {} job/s ({} warning/s), cancel script at {}",
        summary.handles.len(),
        summary.warnings.len(),
        summary.cancel_script.display()
    );

    Ok(())
}

/// Walk the graph in dependency order and submit every task exactly once.
///
/// Required-stage submission failures stop the walk and propagate after the
/// cancellation script covering everything submitted so far has been
/// written. Draft-stage failures degrade to warnings, and downstream
/// dependency lists silently omit the failed task's id — keeping it would
/// leave the dependent job waiting forever on a job the scheduler never
/// issued.
pub fn run(
    graph: &TaskGraph,
    scheduler: &dyn Scheduler,
    layout: &DirectoryLayout,
    config: &Config,
) -> Result<RunSummary> {
    let mut handles: Vec<JobHandle> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();
    let mut job_ids: HashMap<String, String> = HashMap::new();
    let mut skipped: HashSet<String> = HashSet::new();

    for task in graph.tasks() {
        let mut dep_job_ids = Vec::with_capacity(task.depends_on.len());
        for dep in &task.depends_on {
            if let Some(job_id) = job_ids.get(dep) {
                dep_job_ids.push(job_id.clone());
            } else if !skipped.contains(dep) {
                // a required prerequisite without a handle would have
                // aborted the walk already
                return Err(PipelineError::Config(format!(
                    "task '{}' scheduled before its dependency '{}'",
                    task.id, dep
                )));
            }
        }

        match scheduler.submit(task, &dep_job_ids) {
            Ok(handle) => {
                log::info!(
                    "INFO [SUBMIT]: {} -> job {} ({} dependency/ies)",
                    handle.task_id,
                    handle.job_id,
                    dep_job_ids.len()
                );

                if let Err(e) = scheduler::verify(scheduler, &handle) {
                    log::warn!("WARN: {}", e);
                    warnings.push(e.to_string());
                }

                job_ids.insert(handle.task_id.clone(), handle.job_id.clone());
                handles.push(handle);
            }
            Err(e) if task.stage.required() => {
                let script = write_cancel_script(&handles, layout, config)?;
                log::error!(
                    "ERROR: required stage '{}' failed, {} prior job/s listed in {}",
                    task.stage,
                    handles.len(),
                    script.display()
                );
                return Err(e);
            }
            Err(e) => {
                log::warn!("WARN: optional stage '{}' skipped -> {}", task.stage, e);
                warnings.push(e.to_string());
                skipped.insert(task.id.clone());
            }
        }
    }

    let cancel_script = write_cancel_script(&handles, layout, config)?;

    for handle in &handles {
        log::info!("INFO [SUMMARY]: {:<20} {}", handle.task_id, handle.job_id);
    }

    Ok(RunSummary {
        handles,
        warnings,
        cancel_script,
    })
}

/// Log the graph without touching the scheduler.
pub fn print_graph(graph: &TaskGraph) {
    log::info!("INFO [DRY-RUN]: {} task/s", graph.len());

    for task in graph.tasks() {
        log::info!(
            "INFO [DRY-RUN]: {:<20} deps={:?} cmd='{}'",
            task.id,
            task.depends_on,
            task.command_line()
        );
    }
}

/// Write the idempotent cleanup affordance: one cancel command per handle
/// collected so far, newest last. The script is the run's only durable
/// artifact.
fn write_cancel_script(
    handles: &[JobHandle],
    layout: &DirectoryLayout,
    config: &Config,
) -> Result<PathBuf> {
    let scancel = config.scheduler_bin(SCANCEL, SCANCEL);
    let path = layout.results_base.join(CANCEL_SCRIPT);

    let mut file = std::fs::File::create(&path)?;
    writeln!(file, "#!/usr/bin/env bash")?;
    writeln!(
        file,
        "# generated by {} on {}",
        TRANSPIPE,
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    )?;

    for handle in handles {
        writeln!(file, "{} {}  # {}", scancel, handle.job_id, handle.task_id)?;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))?;
    }

    Ok(path)
}
