//! Model evaluation handler

use crate::TaskDashboardHandler;
use crate::evaluation::{MISSING_ARTIFACTS_NOTICE, ModelEvaluation};
use crate::formatting;
use mcp_attr::{Result as McpResult, bail_public};
use std::path::PathBuf;
use tracing::info;

impl TaskDashboardHandler {
    /// Shows the evaluation artifacts; paths given here win over configured ones.
    pub async fn handle_model_evaluation(
        &self,
        metrics_path: Option<String>,
        confusion_matrix_path: Option<String>,
        best_params_path: Option<String>,
    ) -> McpResult<String> {
        let mut paths = self.evaluation.clone();
        if let Some(p) = metrics_path {
            paths.metrics = Some(PathBuf::from(p));
        }
        if let Some(p) = confusion_matrix_path {
            paths.confusion_matrix = Some(PathBuf::from(p));
        }
        if let Some(p) = best_params_path {
            paths.best_params = Some(PathBuf::from(p));
        }

        match ModelEvaluation::load(&paths) {
            Ok(Some(evaluation)) => Ok(formatting::format_evaluation(&evaluation)),
            Ok(None) => {
                info!("evaluation artifacts incomplete, section skipped");
                Ok(MISSING_ARTIFACTS_NOTICE.to_string())
            }
            Err(e) => bail_public!(_, "Failed to load evaluation artifacts: {:#}", e),
        }
    }
}
