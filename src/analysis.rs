use crate::config::Config;
use crate::stats;
use crate::table::load_csv;
use anyhow::{Context, Result};
use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Summary of a single inflammation table.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub file: String,
    pub n_patients: usize,
    pub n_days: usize,

    pub daily_mean: Vec<f64>,
    pub daily_max: Vec<f64>,
    pub daily_min: Vec<f64>,
    pub daily_std: Vec<f64>,

    /// Number of days above the configured threshold, per patient.
    pub days_above_threshold: Vec<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalised: Option<Vec<Vec<f64>>>,
}

impl Report {
    pub fn new(file: String, data: ArrayView2<f64>, cfg: &Config) -> Result<Self> {
        let (n_patients, n_days) = data.dim();

        let days_above_threshold = (0..n_patients)
            .map(|i_patient| stats::patient_above_threshold(i_patient, data, cfg.analysis.threshold))
            .collect::<Result<Vec<_>, _>>()
            .context("failed to count days above threshold")?;

        let normalised = if cfg.analysis.normalise {
            let normalised =
                stats::normalise(data.into_dyn()).context("failed to normalise table")?;
            Some(normalised.rows().into_iter().map(|row| row.to_vec()).collect())
        } else {
            None
        };

        Ok(Self {
            file,
            n_patients,
            n_days,
            daily_mean: stats::daily_mean(data).to_vec(),
            daily_max: stats::daily_max(data).to_vec(),
            daily_min: stats::daily_min(data).to_vec(),
            daily_std: stats::daily_std(data).to_vec(),
            days_above_threshold,
            normalised,
        })
    }
}

#[derive(Serialize)]
struct Results<'a> {
    report: &'a [Report],
}

pub struct Analyzer {
    cfg: Config,
    reports: Vec<Report>,
}

impl Analyzer {
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            reports: Vec::new(),
        }
    }

    pub fn add_file<P: AsRef<Path>>(&mut self, file: P) -> Result<()> {
        let file = file.as_ref();
        let data = load_csv(file).context("failed to load table")?;
        log::info!("loaded {file:?} ({} patients, {} days)", data.nrows(), data.ncols());

        let name = file
            .file_name()
            .context("file has no name")?
            .to_string_lossy()
            .into_owned();
        let report = Report::new(name, data.view(), &self.cfg)
            .with_context(|| format!("failed to analyze {file:?}"))?;
        self.reports.push(report);
        Ok(())
    }

    pub fn save_results<P: AsRef<Path>>(&self, file: P) -> Result<()> {
        let file = file.as_ref();
        let results = Results {
            report: &self.reports,
        };
        let contents = toml::to_string(&results).context("failed to serialize results")?;
        fs::write(file, contents).with_context(|| format!("failed to write {file:?}"))?;
        Ok(())
    }
}
