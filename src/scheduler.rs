pub mod job;
pub mod slurm;

use crate::error::{PipelineError, Result};
use crate::graph::Task;
use crate::scheduler::job::{JobHandle, JobState};

/// Boundary to the external cluster scheduler.
///
/// The driver only ever submits and queries through this trait, which keeps
/// the submission walk testable without a cluster.
pub trait Scheduler {
    /// Submit a task whose prerequisites have already been translated to
    /// scheduler job ids. Join semantics are all-must-succeed.
    fn submit(&self, task: &Task, dep_job_ids: &[String]) -> Result<JobHandle>;

    /// Ask the scheduler about a job. `None` means the job is not visible
    /// in scheduler state.
    fn query(&self, job_id: &str) -> Result<Option<JobState>>;

    /// How long to wait before the post-submission check; fresh jobs take a
    /// moment to show up in squeue.
    fn verify_delay(&self) -> std::time::Duration {
        std::time::Duration::from_secs(crate::consts::VERIFY_DELAY_SECS)
    }
}

/// Post-submission check: the job must be visible and not already dead.
///
/// The caller decides what a failure means; the driver always downgrades it
/// to a warning since a job may simply not be registered yet.
pub fn verify(scheduler: &dyn Scheduler, handle: &JobHandle) -> Result<()> {
    std::thread::sleep(scheduler.verify_delay());

    match scheduler.query(&handle.job_id)? {
        None => Err(PipelineError::Verification {
            job_id: handle.job_id.clone(),
            msg: "job not found in scheduler state".into(),
        }),
        Some(state) if state.is_failed() => Err(PipelineError::Verification {
            job_id: handle.job_id.clone(),
            msg: format!("job already in state {:?}", state),
        }),
        Some(_) => Ok(()),
    }
}
