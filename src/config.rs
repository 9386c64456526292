use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{fmt::Debug, fs, ops::RangeBounds, path::Path};

/// Analysis configuration.
///
/// Loaded from a TOML file and validated before use.
/// See [`Config::from_file`] for loading.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Input data parameters.
    pub input: InputParams,

    /// Analysis parameters.
    pub analysis: AnalysisParams,
}

/// Input data parameters.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct InputParams {
    /// Glob pattern of the data files, relative to the data directory.
    pub pattern: String,
}

/// Analysis parameters.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct AnalysisParams {
    /// Inflammation threshold counted per patient.
    pub threshold: f64,

    /// Include the normalised table in each report.
    #[serde(default)]
    pub normalise: bool,
}

impl Config {
    /// Load a [`Config`] from a file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, deserialized,
    /// or if the configuration values are invalid.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let contents = fs::read_to_string(file).with_context(|| format!("failed to read {file:?}"))?;

        let config: Config = toml::from_str(&contents).context("failed to deserialize config")?;

        config.validate().context("failed to validate config")?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.input.pattern.trim().is_empty() {
            bail!("invalid input pattern: pattern must not be empty");
        }
        check_num(self.analysis.threshold, 0.0..f64::INFINITY).context("invalid threshold")?;
        Ok(())
    }
}

fn check_num<T, R>(num: T, range: R) -> Result<()>
where
    T: PartialOrd + Debug,
    R: RangeBounds<T> + Debug,
{
    if !range.contains(&num) {
        bail!("number must be in the range {range:?}, but is {num:?}");
    }
    Ok(())
}
