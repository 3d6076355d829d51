use std::process::Command;

use crate::config::Config;
use crate::consts::*;
use crate::error::{PipelineError, Result};
use crate::graph::Task;
use crate::scheduler::job::{dependency_expression, JobHandle, JobState};
use crate::scheduler::Scheduler;

/// Client for a Slurm cluster, shelling out to sbatch and squeue.
#[derive(Debug, Clone)]
pub struct SlurmScheduler {
    sbatch: String,
    squeue: String,
}

impl SlurmScheduler {
    /// Binary names come from `[global]`, falling back to the bare
    /// `sbatch`/`squeue` on PATH.
    pub fn from_config(config: &Config) -> Self {
        Self {
            sbatch: config.scheduler_bin(SBATCH, SBATCH),
            squeue: config.scheduler_bin(SQUEUE, SQUEUE),
        }
    }

    /// Translate a task plus resolved prerequisite job ids into sbatch
    /// arguments. `--parsable` keeps stdout down to the bare job id.
    fn sbatch_args(task: &Task, dep_job_ids: &[String]) -> Vec<String> {
        let mut args = vec![
            "--parsable".to_string(),
            format!("--partition={}", task.resources.partition),
            format!("--time={}", task.resources.time),
            format!("--nodes={}", task.resources.nodes),
            format!("--cpus-per-task={}", task.resources.cpus),
            format!("--mem={}", task.resources.memory),
            format!("--job-name={}", task.id),
            format!("--output={}", task.stdout_log.display()),
            format!("--error={}", task.stderr_log.display()),
        ];

        if let Some(expr) = dependency_expression(dep_job_ids) {
            args.push(format!("--dependency={}", expr));
        }

        args.push("--wrap".to_string());
        args.push(task.command_line());

        args
    }
}

impl Scheduler for SlurmScheduler {
    fn submit(&self, task: &Task, dep_job_ids: &[String]) -> Result<JobHandle> {
        let output = Command::new(&self.sbatch)
            .args(Self::sbatch_args(task, dep_job_ids))
            .output()
            .map_err(|e| PipelineError::Submission {
                stage: task.stage,
                msg: format!("could not run {}: {}", self.sbatch, e),
            })?;

        if !output.status.success() {
            return Err(PipelineError::Submission {
                stage: task.stage,
                msg: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        // --parsable prints "<jobid>" or "<jobid>;<cluster>"
        let stdout = String::from_utf8_lossy(&output.stdout);
        let job_id = stdout
            .trim()
            .split(';')
            .next()
            .unwrap_or("")
            .to_string();

        if job_id.is_empty() || !job_id.chars().all(|c| c.is_ascii_digit()) {
            return Err(PipelineError::Submission {
                stage: task.stage,
                msg: format!("no job id in sbatch output: '{}'", stdout.trim()),
            });
        }

        Ok(JobHandle {
            task_id: task.id.clone(),
            job_id,
        })
    }

    fn query(&self, job_id: &str) -> Result<Option<JobState>> {
        let output = Command::new(&self.squeue)
            .args(["-h", "-j", job_id, "-o", "%T"])
            .output()
            .map_err(|e| PipelineError::Verification {
                job_id: job_id.to_string(),
                msg: format!("could not run {}: {}", self.squeue, e),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let state = stdout.lines().next().unwrap_or("").trim().to_string();

        if state.is_empty() {
            return Ok(None);
        }

        Ok(Some(JobState::parse(&state)))
    }

    fn verify_delay(&self) -> std::time::Duration {
        std::time::Duration::from_secs(VERIFY_DELAY_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Resources, Stage};
    use std::path::PathBuf;

    fn task() -> Task {
        Task {
            id: "merge".into(),
            stage: Stage::Merge,
            program: MERGE_EXE.into(),
            args: vec!["a.fofn".into(), "b.fofn".into()],
            resources: Resources {
                partition: "short".into(),
                time: "02:00:00".into(),
                nodes: 1,
                cpus: 8,
                memory: "32G".into(),
                extra: String::new(),
            },
            depends_on: vec!["trim_s0".into(), "trim_s1".into()],
            stdout_log: PathBuf::from("/logs/merge.out"),
            stderr_log: PathBuf::from("/logs/merge.err"),
        }
    }

    #[test]
    fn sbatch_args_carry_resources_and_dependencies() {
        let args = SlurmScheduler::sbatch_args(&task(), &["101".into(), "102".into()]);

        assert!(args.contains(&"--partition=short".to_string()));
        assert!(args.contains(&"--cpus-per-task=8".to_string()));
        assert!(args.contains(&"--mem=32G".to_string()));
        assert!(args.contains(&"--dependency=afterok:101:102".to_string()));
        assert_eq!(args[args.len() - 2], "--wrap");
        assert_eq!(args.last().unwrap(), "merge_reads.sh a.fofn b.fofn");
    }

    #[test]
    fn no_dependency_flag_without_prerequisites() {
        let args = SlurmScheduler::sbatch_args(&task(), &[]);
        assert!(!args.iter().any(|a| a.starts_with("--dependency")));
    }
}
