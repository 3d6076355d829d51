// project-wide names
pub const TRANSPIPE: &str = "transpipe";

// stage program names (fixed external-tool contracts)
pub const TRIM_EXE: &str = "trim_reads.sh";
pub const MERGE_EXE: &str = "merge_reads.sh";
pub const ASSEMBLY_EXE: &str = "assemble_transcriptome.sh";
pub const BUSCO_EXE: &str = "run_busco.sh";
pub const RNAQUAST_EXE: &str = "run_rnaquast.sh";
pub const VISUALIZE_EXE: &str = "visualize_quality.sh";

// scheduler binaries (overridable through [global])
pub const SBATCH: &str = "sbatch";
pub const SQUEUE: &str = "squeue";
pub const SCANCEL: &str = "scancel";

// config keys
pub const RAW_READS_DIR: &str = "raw_reads_dir";
pub const RESULTS_DIR: &str = "results_dir";
pub const LOGS_DIR: &str = "logs_dir";
pub const BUSCO_DB: &str = "busco_db";

// result subdirectories
pub const TRIMMED: &str = "trimmed";
pub const MERGED: &str = "merged";
pub const ASSEMBLY_DIR: &str = "assembly";
pub const QUALITY: &str = "quality";
pub const BUSCO_DIR: &str = "busco";
pub const RNAQUAST_DIR: &str = "rnaquast";
pub const DRAFT_BUSCO_DIR: &str = "draft_busco";
pub const DRAFT_RNAQUAST_DIR: &str = "draft_rnaquast";
pub const VISUALIZATION: &str = "visualization";

// filenames
pub const TRIMMED_R1_MANIFEST: &str = "trimmed_r1.fofn";
pub const TRIMMED_R2_MANIFEST: &str = "trimmed_r2.fofn";
pub const MERGED_R1: &str = "merged_R1.fastq.gz";
pub const MERGED_R2: &str = "merged_R2.fastq.gz";
pub const TRANSCRIPTS_FA: &str = "transcripts.fasta";
pub const CANCEL_SCRIPT: &str = "cancel_run.sh";
pub const TRIMMED_SUFFIX_R1: &str = "_R1.trimmed.fastq.gz";
pub const TRIMMED_SUFFIX_R2: &str = "_R2.trimmed.fastq.gz";

// seconds to wait before asking the scheduler about a fresh submission
pub const VERIFY_DELAY_SECS: u64 = 5;

// default paired-end suffix conventions, tried in order (first match wins)
pub const DEFAULT_PATTERNS: &[(&str, &str)] = &[
    ("_R1_001.fastq.gz", "_R2_001.fastq.gz"),
    ("_R1.fastq.gz", "_R2.fastq.gz"),
    ("_1.fastq.gz", "_2.fastq.gz"),
];
