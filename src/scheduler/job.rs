/// Opaque handle returned by the scheduler for a submitted task.
///
/// Only produced on successful submission, so the cancellation list never
/// contains ids the scheduler does not know about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobHandle {
    pub task_id: String,
    pub job_id: String,
}

/// Scheduler-reported job state, parsed from squeue output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobState {
    Pending,
    Running,
    Completed,
    Failed,
    Cancelled,
    Timeout,
    OutOfMemory,
    Unknown(String),
}

impl JobState {
    /// Parse a Slurm state string like `PENDING` or `FAILED`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "PENDING" | "PD" => Self::Pending,
            "RUNNING" | "R" => Self::Running,
            "COMPLETED" | "CD" => Self::Completed,
            "FAILED" | "F" => Self::Failed,
            "CANCELLED" | "CA" => Self::Cancelled,
            "TIMEOUT" | "TO" => Self::Timeout,
            "OUT_OF_MEMORY" | "OOM" => Self::OutOfMemory,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// A state that means the job will never produce output.
    pub fn is_failed(&self) -> bool {
        matches!(
            self,
            Self::Failed | Self::Cancelled | Self::Timeout | Self::OutOfMemory
        )
    }
}

/// Join a set of prerequisite job ids into Slurm's all-must-succeed
/// dependency expression.
///
/// # Example
///
/// ``` rust, no_run
/// # use transpipe::scheduler::job::dependency_expression;
/// let expr = dependency_expression(&["11".into(), "12".into()]);
///
/// assert_eq!(expr, Some("afterok:11:12".to_string()));
/// ```
pub fn dependency_expression(job_ids: &[String]) -> Option<String> {
    if job_ids.is_empty() {
        return None;
    }

    Some(format!("afterok:{}", job_ids.join(":")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_states() {
        assert_eq!(JobState::parse("PENDING"), JobState::Pending);
        assert_eq!(JobState::parse("r"), JobState::Running);
        assert_eq!(JobState::parse("OUT_OF_MEMORY"), JobState::OutOfMemory);
        assert_eq!(
            JobState::parse("REQUEUED"),
            JobState::Unknown("REQUEUED".into())
        );
    }

    #[test]
    fn failed_states_are_terminal() {
        assert!(JobState::Failed.is_failed());
        assert!(JobState::Timeout.is_failed());
        assert!(!JobState::Pending.is_failed());
        assert!(!JobState::Completed.is_failed());
    }

    #[test]
    fn dependency_expression_joins_all_ids() {
        assert_eq!(dependency_expression(&[]), None);
        assert_eq!(
            dependency_expression(&["7".into()]),
            Some("afterok:7".into())
        );
        assert_eq!(
            dependency_expression(&["7".into(), "8".into(), "9".into()]),
            Some("afterok:7:8:9".into())
        );
    }
}
