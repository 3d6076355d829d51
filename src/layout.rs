use std::fs;
use std::path::{Path, PathBuf};

use crate::consts::*;
use crate::error::Result;

/// The fixed on-disk tree every downstream stage expects.
///
/// Provisioning is idempotent: re-running over an existing layout is not an
/// error, which keeps pipeline re-invocations safe after a partial failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryLayout {
    pub trimmed: PathBuf,
    pub merged: PathBuf,
    pub assembly: PathBuf,
    pub busco: PathBuf,
    pub rnaquast: PathBuf,
    pub draft_busco: PathBuf,
    pub draft_rnaquast: PathBuf,
    pub visualization: PathBuf,
    pub logs: StageLogs,
    pub results_base: PathBuf,
}

/// Mirrored per-stage log directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageLogs {
    pub trimmed: PathBuf,
    pub merged: PathBuf,
    pub assembly: PathBuf,
    pub busco: PathBuf,
    pub rnaquast: PathBuf,
    pub draft_busco: PathBuf,
    pub draft_rnaquast: PathBuf,
    pub visualization: PathBuf,
}

impl DirectoryLayout {
    /// Create the full result and log directory tree.
    ///
    /// # Arguments
    ///
    /// * `results_base` - Base directory for stage outputs.
    /// * `logs_base` - Base directory for stage stdout/stderr logs.
    ///
    /// # Example
    ///
    /// ``` rust, no_run
    /// # use transpipe::layout::DirectoryLayout;
    /// # use std::path::Path;
    /// # fn main() -> transpipe::error::Result<()> {
    /// let layout = DirectoryLayout::provision(
    ///     Path::new("/data/results"),
    ///     Path::new("/data/logs"),
    /// )?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn provision(results_base: &Path, logs_base: &Path) -> Result<Self> {
        let quality = results_base.join(QUALITY);
        let log_quality = logs_base.join(QUALITY);

        let layout = Self {
            trimmed: results_base.join(TRIMMED),
            merged: results_base.join(MERGED),
            assembly: results_base.join(ASSEMBLY_DIR),
            busco: quality.join(BUSCO_DIR),
            rnaquast: quality.join(RNAQUAST_DIR),
            draft_busco: quality.join(DRAFT_BUSCO_DIR),
            draft_rnaquast: quality.join(DRAFT_RNAQUAST_DIR),
            visualization: results_base.join(VISUALIZATION),
            logs: StageLogs {
                trimmed: logs_base.join(TRIMMED),
                merged: logs_base.join(MERGED),
                assembly: logs_base.join(ASSEMBLY_DIR),
                busco: log_quality.join(BUSCO_DIR),
                rnaquast: log_quality.join(RNAQUAST_DIR),
                draft_busco: log_quality.join(DRAFT_BUSCO_DIR),
                draft_rnaquast: log_quality.join(DRAFT_RNAQUAST_DIR),
                visualization: logs_base.join(VISUALIZATION),
            },
            results_base: results_base.to_path_buf(),
        };

        for dir in layout.all_dirs() {
            fs::create_dir_all(dir)?;
        }

        log::info!(
            "INFO [STEP 0]: Provisioned result tree under {}",
            results_base.display()
        );

        Ok(layout)
    }

    fn all_dirs(&self) -> [&PathBuf; 16] {
        [
            &self.trimmed,
            &self.merged,
            &self.assembly,
            &self.busco,
            &self.rnaquast,
            &self.draft_busco,
            &self.draft_rnaquast,
            &self.visualization,
            &self.logs.trimmed,
            &self.logs.merged,
            &self.logs.assembly,
            &self.logs.busco,
            &self.logs.rnaquast,
            &self.logs.draft_busco,
            &self.logs.draft_rnaquast,
            &self.logs.visualization,
        ]
    }
}
