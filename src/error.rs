use crate::config::Stage;

/// Pipeline-wide error taxonomy.
///
/// Required-stage submission failures and I/O failures abort the run;
/// verification failures are always downgraded to warnings by the driver,
/// and draft-stage submission failures degrade to warnings as well.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("ERROR: invalid input -> {0}")]
    Input(String),

    #[error("ERROR: submission of stage '{stage}' rejected -> {msg}")]
    Submission { stage: Stage, msg: String },

    #[error("ERROR: could not verify job {job_id} -> {msg}")]
    Verification { job_id: String, msg: String },

    #[error("ERROR: configuration -> {0}")]
    Config(String),

    #[error("ERROR: I/O failure -> {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
