use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use phonegrouper_core::{
    validate_country_code, validate_min_group_size, validate_minimum_digit_count,
    validate_suffix_digits, EquivalenceRule, GroupOrder, PipelineConfig, UnclassifiedPolicy,
    DEFAULT_MIN_GROUP_SIZE, DEFAULT_SUFFIX_DIGITS,
};
use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "phonegrouper";
const CONFIG_FILENAME: &str = "config.toml";

pub const DEFAULT_DELIMITER: char = ';';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub pipeline: PipelineConfig,
    /// Digit count used whenever the suffix rule is selected, by the file or the command line.
    pub suffix_digits: usize,
    pub output: OutputConfig,
    pub input: InputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    pub order: GroupOrder,
    pub min_group_size: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputConfig {
    pub format: InputFormat,
    pub delimiter: char,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    Plain,
    Columns,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    Exact,
    Suffix,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            pipeline: PipelineConfig::default(),
            suffix_digits: DEFAULT_SUFFIX_DIGITS,
            output: OutputConfig {
                order: GroupOrder::FirstSeen,
                min_group_size: DEFAULT_MIN_GROUP_SIZE,
            },
            input: InputConfig {
                format: InputFormat::Plain,
                delimiter: DEFAULT_DELIMITER,
            },
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("invalid minimum_digit_count value: {0}")]
    InvalidMinimumDigitCount(i64),
    #[error("invalid default_country_code value: {0}")]
    InvalidCountryCode(String),
    #[error("invalid suffix_digits value: {0}")]
    InvalidSuffixDigits(i64),
    #[error("invalid min_group_size value: {0}")]
    InvalidMinGroupSize(i64),
    #[error("invalid delimiter value: {0:?}")]
    InvalidDelimiter(String),
    #[error("invalid parallel threshold value: {0}")]
    InvalidParallelThreshold(i64),
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    normalize: Option<NormalizeFile>,
    grouping: Option<GroupingFile>,
    output: Option<OutputFile>,
    input: Option<InputFile>,
    parallel: Option<ParallelFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct NormalizeFile {
    strip_leading_zero: Option<bool>,
    default_country_code: Option<String>,
    minimum_digit_count: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct GroupingFile {
    rule: Option<RuleKind>,
    suffix_digits: Option<i64>,
    unclassified: Option<UnclassifiedPolicy>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct OutputFile {
    order: Option<GroupOrder>,
    min_group_size: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct InputFile {
    format: Option<InputFormat>,
    delimiter: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ParallelFile {
    enabled: Option<bool>,
    threshold: Option<i64>,
}

pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

/// Accepts a single character that cannot appear inside a number.
pub fn parse_delimiter(raw: &str) -> Result<char> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) if !ch.is_ascii_digit() && ch != '"' && ch != '+' => Ok(ch),
        _ => Err(ConfigError::InvalidDelimiter(raw.to_string())),
    }
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(merge_config(parsed)?))
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(normalize) = parsed.normalize {
        let normalizer = &mut config.pipeline.normalizer;
        if let Some(strip) = normalize.strip_leading_zero {
            normalizer.strip_leading_zero = strip;
        }
        if let Some(code) = normalize.default_country_code {
            normalizer.default_country_code = if code.trim().is_empty() {
                None
            } else {
                Some(
                    validate_country_code(&code)
                        .map_err(|_| ConfigError::InvalidCountryCode(code.clone()))?,
                )
            };
        }
        if let Some(minimum) = normalize.minimum_digit_count {
            normalizer.minimum_digit_count = validate_minimum_digit_count(minimum)
                .map_err(|_| ConfigError::InvalidMinimumDigitCount(minimum))?;
        }
    }

    if let Some(grouping) = parsed.grouping {
        if let Some(digits) = grouping.suffix_digits {
            config.suffix_digits = validate_suffix_digits(digits)
                .map_err(|_| ConfigError::InvalidSuffixDigits(digits))?;
        }
        if let Some(rule) = grouping.rule {
            config.pipeline.rule = match rule {
                RuleKind::Exact => EquivalenceRule::Exact,
                RuleKind::Suffix => EquivalenceRule::Suffix(config.suffix_digits),
            };
        }
        if let Some(unclassified) = grouping.unclassified {
            config.pipeline.unclassified = unclassified;
        }
    }

    if let Some(output) = parsed.output {
        if let Some(order) = output.order {
            config.output.order = order;
        }
        if let Some(size) = output.min_group_size {
            config.output.min_group_size =
                validate_min_group_size(size).map_err(|_| ConfigError::InvalidMinGroupSize(size))?;
        }
    }

    if let Some(input) = parsed.input {
        if let Some(format) = input.format {
            config.input.format = format;
        }
        if let Some(delimiter) = input.delimiter {
            config.input.delimiter = parse_delimiter(&delimiter)?;
        }
    }

    if let Some(parallel) = parsed.parallel {
        if let Some(threshold) = parallel.threshold {
            let value = usize::try_from(threshold)
                .ok()
                .filter(|value| *value > 0)
                .ok_or(ConfigError::InvalidParallelThreshold(threshold))?;
            config.pipeline.parallel_threshold = Some(value);
        }
        if parallel.enabled == Some(false) {
            config.pipeline.parallel_threshold = None;
        }
    }

    Ok(config)
}
