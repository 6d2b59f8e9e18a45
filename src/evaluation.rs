//! Classifier evaluation artifacts
//!
//! Three externally produced files are shown read-only: a metrics report, a
//! confusion matrix and the best hyperparameters of a grid search. All three
//! are needed; with any of them missing the section is skipped.

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Notice shown instead of the evaluation section when an artifact is missing
pub const MISSING_ARTIFACTS_NOTICE: &str = "Upload all 3 files (metrics.json, confusion_matrix.csv, best_params.json) to view model evaluation.";

/// Locations of the three evaluation artifacts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvaluationPaths {
    pub metrics: Option<PathBuf>,
    pub confusion_matrix: Option<PathBuf>,
    pub best_params: Option<PathBuf>,
}

impl EvaluationPaths {
    /// All three paths, if every one is set and exists
    fn complete(&self) -> Option<(&Path, &Path, &Path)> {
        Some((
            existing(&self.metrics)?,
            existing(&self.confusion_matrix)?,
            existing(&self.best_params)?,
        ))
    }
}

fn existing(path: &Option<PathBuf>) -> Option<&Path> {
    path.as_deref().filter(|p| p.exists())
}

/// Weighted-average scores from the metrics report
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelMetrics {
    /// Read from the report's weighted-average precision, not from its accuracy
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

impl ModelMetrics {
    /// Extract scores from a classification report (`"weighted avg"` entry)
    pub fn from_report(report: &Value) -> Result<Self> {
        let weighted = report
            .get("weighted avg")
            .context("Metrics report has no 'weighted avg' entry")?;
        let score = |key: &str| -> Result<f64> {
            weighted
                .get(key)
                .and_then(Value::as_f64)
                .with_context(|| format!("'weighted avg' has no numeric '{}'", key))
        };

        let precision = score("precision")?;
        Ok(Self {
            accuracy: precision,
            precision,
            recall: score("recall")?,
            f1: score("f1-score")?,
        })
    }
}

/// Everything the evaluation section shows
#[derive(Debug, Clone, PartialEq)]
pub struct ModelEvaluation {
    pub metrics: ModelMetrics,
    /// Rows are actual classes, columns predicted ones
    pub confusion_matrix: Vec<Vec<i64>>,
    pub best_params: Map<String, Value>,
}

impl ModelEvaluation {
    /// Load all three artifacts, `Ok(None)` when any of them is missing
    pub fn load(paths: &EvaluationPaths) -> Result<Option<Self>> {
        let Some((metrics, matrix, params)) = paths.complete() else {
            return Ok(None);
        };

        let report = read_json(metrics)?;
        let evaluation = Self {
            metrics: ModelMetrics::from_report(&report)?,
            confusion_matrix: read_confusion_matrix(matrix)?,
            best_params: read_params(params)?,
        };
        Ok(Some(evaluation))
    }
}

fn read_json(path: &Path) -> Result<Value> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", path.display()))
}

fn read_params(path: &Path) -> Result<Map<String, Value>> {
    match read_json(path)? {
        Value::Object(map) => Ok(map),
        other => bail!(
            "{} must contain a JSON object, found {}",
            path.display(),
            other
        ),
    }
}

/// Read a confusion matrix CSV; the first line is a header and is skipped
pub fn read_confusion_matrix(path: &Path) -> Result<Vec<Vec<i64>>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    parse_confusion_matrix(file)
}

pub fn parse_confusion_matrix<R: std::io::Read>(reader: R) -> Result<Vec<Vec<i64>>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut matrix = Vec::new();
    for (line, record) in csv_reader.records().enumerate() {
        let record = record?;
        let row = record
            .iter()
            .map(|cell| {
                cell.trim().parse::<i64>().with_context(|| {
                    format!("Confusion matrix row {}: '{}' is not a count", line + 1, cell)
                })
            })
            .collect::<Result<Vec<_>>>()?;
        matrix.push(row);
    }
    Ok(matrix)
}
