use serde::Deserialize;

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use crate::consts::*;

/// A struct representing a pipeline configuration file.
///
/// # Fields
///
/// * `global` - A HashMap of global key-value pairs (paths, scheduler binaries).
/// * `patterns` - Ordered paired-end suffix conventions; first match wins.
/// * `params` - Per-stage resource requests keyed by stage name.
///
/// # Example
///
/// ``` toml
/// patterns = [
///     ["_R1_001.fastq.gz", "_R2_001.fastq.gz"],
///     ["_1.fastq.gz", "_2.fastq.gz"],
/// ]
///
/// [global]
/// raw_reads_dir = "/data/raw"
/// results_dir = "/data/results"
/// logs_dir = "/data/logs"
/// busco_db = "/db/busco/eudicots_odb10"
///
/// [params.trim]
/// partition = "short"
/// time = "04:00:00"
/// cpus = 8
/// memory = "16G"
/// ```
#[derive(Deserialize, Debug, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub global: HashMap<String, ParamValue>,
    #[serde(default)]
    pub patterns: Vec<(String, String)>,
    #[serde(default, deserialize_with = "deserialize_to_hash")]
    pub params: HashMap<Stage, Resources>,
}

impl Config {
    /// Read a configuration file and return a Config struct.
    ///
    /// # Example
    ///
    /// ``` rust, no_run
    /// # use transpipe::config::Config;
    /// # use std::path::PathBuf;
    /// let config = Config::read(PathBuf::from("config.toml"));
    /// ```
    pub fn read(config: PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let mut file = File::open(config)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config: Config = toml::from_str(&contents)?;

        Ok(config)
    }

    /// Get a global parameter value from the Config.
    pub fn get_global(&self, key: &str) -> Option<&ParamValue> {
        self.global.get(key)
    }

    /// Get a global parameter as a path, if present.
    pub fn get_global_path(&self, key: &str) -> Option<PathBuf> {
        self.global.get(key).map(|v| v.to_path_buf())
    }

    /// Resolved suffix-pair conventions: configured list, or the built-in
    /// defaults when the config carries none. Order is significant.
    pub fn pair_patterns(&self) -> Vec<(String, String)> {
        if self.patterns.is_empty() {
            DEFAULT_PATTERNS
                .iter()
                .map(|(r1, r2)| (r1.to_string(), r2.to_string()))
                .collect()
        } else {
            self.patterns.clone()
        }
    }

    /// Resource request for a stage, falling back to defaults for stages
    /// absent from `[params]`.
    pub fn resources(&self, stage: Stage) -> Resources {
        self.params.get(&stage).cloned().unwrap_or_default()
    }

    /// Scheduler binary name from `[global]`, or the given default.
    pub fn scheduler_bin(&self, key: &str, default: &str) -> String {
        self.global
            .get(key)
            .map(|v| v.to_string())
            .unwrap_or_else(|| default.to_string())
    }
}

/// An enum representing pipeline stages.
///
/// Draft stages evaluate a user-supplied draft transcriptome and are
/// optional: their submission failures never abort the run.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Trim,
    Merge,
    Assembly,
    Busco,
    Rnaquast,
    DraftBusco,
    DraftRnaquast,
    Visualize,
}

impl Stage {
    /// Create a Stage from a config-file stage name.
    ///
    /// # Example
    ///
    /// ``` rust, no_run
    /// # use transpipe::config::Stage;
    /// let stage = Stage::from_str("trim");
    ///
    /// assert_eq!(stage, Ok(Stage::Trim));
    /// ```
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s {
            "trim" => Ok(Self::Trim),
            "merge" => Ok(Self::Merge),
            "assembly" => Ok(Self::Assembly),
            "busco" => Ok(Self::Busco),
            "rnaquast" => Ok(Self::Rnaquast),
            "draft-busco" => Ok(Self::DraftBusco),
            "draft-rnaquast" => Ok(Self::DraftRnaquast),
            "visualize" => Ok(Self::Visualize),
            _ => Err(format!("ERROR: Invalid pipeline stage: {}", s)),
        }
    }

    /// Convert a Stage to its config-file name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trim => "trim",
            Self::Merge => "merge",
            Self::Assembly => "assembly",
            Self::Busco => "busco",
            Self::Rnaquast => "rnaquast",
            Self::DraftBusco => "draft-busco",
            Self::DraftRnaquast => "draft-rnaquast",
            Self::Visualize => "visualize",
        }
    }

    /// Whether a submission failure for this stage aborts the whole run.
    pub fn required(&self) -> bool {
        !matches!(self, Self::DraftBusco | Self::DraftRnaquast)
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-stage resource request passed to the scheduler.
///
/// Every field has a default so a config may specify only what differs
/// from the site-wide baseline.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Resources {
    pub partition: String,
    pub time: String,
    pub nodes: u32,
    pub cpus: u32,
    pub memory: String,
    pub extra: String,
}

impl Default for Resources {
    fn default() -> Self {
        Self {
            partition: "batch".into(),
            time: "12:00:00".into(),
            nodes: 1,
            cpus: 4,
            memory: "16G".into(),
            extra: String::new(),
        }
    }
}

/// Represents a global parameter value
///
/// # Example
///
/// ``` rust, no_run
/// # use transpipe::config::ParamValue;
/// let value = ParamValue::Int(1);
///
/// assert_eq!(value.to_int(), 1);
/// ```
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Bool(bool),
    Str(String),
}

impl ParamValue {
    /// Convert a ParamValue to a PathBuf.
    pub fn to_path_buf(&self) -> PathBuf {
        match self {
            ParamValue::Str(s) => PathBuf::from(s),
            _ => PathBuf::new(),
        }
    }

    /// Convert a ParamValue to an integer.
    pub fn to_int(&self) -> i64 {
        match self {
            ParamValue::Int(i) => *i,
            _ => 0,
        }
    }
}

impl std::fmt::Display for ParamValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamValue::Int(i) => write!(f, "{}", i),
            ParamValue::Bool(b) => write!(f, "{}", b),
            ParamValue::Str(s) => write!(f, "{}", s),
        }
    }
}

/// Deserialize a HashMap of Stage enums and Resources.
///
/// TOML table keys arrive as strings; map them through `Stage::from_str`
/// so an unknown stage name is a parse error, not a silent drop.
fn deserialize_to_hash<'de, D>(deserializer: D) -> Result<HashMap<Stage, Resources>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: HashMap<String, Resources> = HashMap::deserialize(deserializer)?;

    raw.into_iter()
        .map(|(key, value)| Stage::from_str(&key).map(|stage| (stage, value)))
        .collect::<Result<HashMap<_, _>, _>>()
        .map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOML: &str = r#"
        patterns = [
            ["_R1_001.fastq.gz", "_R2_001.fastq.gz"],
            ["_1.fastq.gz", "_2.fastq.gz"],
        ]

        [global]
        raw_reads_dir = "/data/raw"
        results_dir = "/data/results"
        logs_dir = "/data/logs"

        [params.trim]
        partition = "short"
        time = "04:00:00"
        cpus = 8

        [params.assembly]
        memory = "200G"
        cpus = 32
    "#;

    #[test]
    fn parses_global_and_stage_params() {
        let config: Config = toml::from_str(TOML).unwrap();

        assert_eq!(
            config.get_global_path(RAW_READS_DIR),
            Some(PathBuf::from("/data/raw"))
        );

        let trim = config.resources(Stage::Trim);
        assert_eq!(trim.partition, "short");
        assert_eq!(trim.cpus, 8);
        // unspecified fields fall back to defaults
        assert_eq!(trim.memory, "16G");

        let assembly = config.resources(Stage::Assembly);
        assert_eq!(assembly.memory, "200G");
        assert_eq!(assembly.nodes, 1);
    }

    #[test]
    fn pattern_order_is_preserved() {
        let config: Config = toml::from_str(TOML).unwrap();
        let patterns = config.pair_patterns();

        assert_eq!(patterns.len(), 2);
        assert_eq!(patterns[0].0, "_R1_001.fastq.gz");
        assert_eq!(patterns[1].1, "_2.fastq.gz");
    }

    #[test]
    fn defaults_cover_missing_stages() {
        let config: Config = toml::from_str("").unwrap();

        assert_eq!(config.resources(Stage::Merge), Resources::default());
        assert_eq!(config.pair_patterns().len(), DEFAULT_PATTERNS.len());
    }

    #[test]
    fn unknown_stage_name_is_an_error() {
        let bad = "[params.polish]\ncpus = 4\n";
        assert!(toml::from_str::<Config>(bad).is_err());
    }

    #[test]
    fn draft_stages_are_optional() {
        assert!(Stage::Trim.required());
        assert!(Stage::Visualize.required());
        assert!(!Stage::DraftBusco.required());
        assert!(!Stage::DraftRnaquast.required());
    }
}
