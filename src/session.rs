use std::fmt;
use std::future::Future;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{info, warn};

use crate::config::Config;
use crate::core::targets::TargetModelRegistry;
use crate::core::{concentration, differ, normalizer, parser};
use crate::error::AnalysisError;
use crate::models::{AnalysisResult, Holdings, ModelType};
use crate::remote::PortfolioBackend;

/// Where the session is in the upload -> analyze -> suggest flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Empty,
    Ready,
    Analyzing,
    Analyzed,
    Suggesting,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Empty => write!(f, "empty"),
            SessionState::Ready => write!(f, "ready"),
            SessionState::Analyzing => write!(f, "analyzing"),
            SessionState::Analyzed => write!(f, "analyzed"),
            SessionState::Suggesting => write!(f, "suggesting"),
        }
    }
}

/// One user's analysis session. Owns the single in-memory `AnalysisResult`
/// and sequences the pipeline per command. Operations take `&mut self`, so
/// at most one analyze or suggestion call can be in flight; a failed
/// operation restores the prior state and leaves the previous result
/// untouched so the user can retry.
pub struct AnalysisSession {
    config: Config,
    backend: Box<dyn PortfolioBackend>,
    registry: TargetModelRegistry,
    state: SessionState,
    file_name: Option<String>,
    raw_contents: Option<String>,
    holdings: Holdings,
    selected_model: ModelType,
    result: Option<AnalysisResult>,
    diversification_score: Option<f64>,
}

impl AnalysisSession {
    pub fn new(config: Config, backend: Box<dyn PortfolioBackend>) -> Self {
        let selected_model = config.default_model;
        Self {
            config,
            backend,
            registry: TargetModelRegistry::builtin(),
            state: SessionState::Empty,
            file_name: None,
            raw_contents: None,
            holdings: Holdings::default(),
            selected_model,
            result: None,
            diversification_score: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// `None` distinguishes "not analyzed yet" from an analyzed result with
    /// zero warnings or suggestions.
    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn holdings(&self) -> &Holdings {
        &self.holdings
    }

    pub fn selected_model(&self) -> ModelType {
        self.selected_model
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn diversification_score(&self) -> Option<f64> {
        self.diversification_score
    }

    /// Record the model for the next analyze. Never recomputes: the differ
    /// always runs against the model selected at analyze time.
    pub fn set_model(&mut self, model: ModelType) {
        self.selected_model = model;
    }

    /// Gate and stage an uploaded file. The parser itself is
    /// format-agnostic; the `.csv` extension and the byte ceiling are
    /// enforced here. A rejected file leaves the session untouched.
    pub fn select_file(&mut self, name: &str, contents: &str) -> Result<(), AnalysisError> {
        if !name.ends_with(".csv") {
            return Err(AnalysisError::Validation(format!(
                "'{}' is not a .csv file",
                name
            )));
        }
        if contents.len() > self.config.max_upload_bytes {
            return Err(AnalysisError::Validation(format!(
                "file is {} bytes, over the {} byte limit",
                contents.len(),
                self.config.max_upload_bytes
            )));
        }

        self.file_name = Some(name.to_string());
        self.raw_contents = Some(contents.to_string());
        self.holdings = Holdings::default();
        self.result = None;
        self.diversification_score = None;
        self.state = SessionState::Ready;
        info!("Staged {} ({} bytes)", name, contents.len());
        Ok(())
    }

    /// Run the full analysis: parse the staged file, send it to the
    /// aggregation service, diff against the currently selected model and
    /// render the service's concentration flags. A fresh result (with empty
    /// suggestions) is committed only on success.
    pub async fn analyze(&mut self) -> Result<(), AnalysisError> {
        let (name, raw) = match (&self.file_name, &self.raw_contents) {
            (Some(n), Some(r)) => (n.clone(), r.clone()),
            _ => {
                return Err(AnalysisError::Validation(
                    "no file selected".to_string(),
                ))
            }
        };

        let prior_state = self.state;
        self.state = SessionState::Analyzing;
        info!("Analyzing {} against the {} model", name, self.selected_model);

        match self.run_analysis(&name, &raw).await {
            Ok((holdings, result, score)) => {
                info!(
                    "Analysis complete: {} holding(s), {} sector(s), {} warning(s)",
                    holdings.len(),
                    result.sectors.len(),
                    result.warnings.len()
                );
                self.holdings = holdings;
                self.diversification_score = score;
                self.result = Some(result);
                self.state = SessionState::Analyzed;
                Ok(())
            }
            Err(e) => {
                self.state = prior_state;
                warn!("Analysis failed: {}", e);
                Err(e)
            }
        }
    }

    async fn run_analysis(
        &self,
        name: &str,
        raw: &str,
    ) -> Result<(Holdings, AnalysisResult, Option<f64>), AnalysisError> {
        let report = parser::parse(raw)?;
        if report.holdings.is_empty() {
            return Err(AnalysisError::Schema(
                "file contains no valid holdings".to_string(),
            ));
        }

        let snapshot = self.remote_call(self.backend.aggregate(name, raw)).await?;

        let model = self.registry.get(self.selected_model);
        let sectors = differ::diff(&snapshot.sectors, model);
        let warnings = concentration::detect(&snapshot.sectors, &snapshot.concentrated_sectors);

        let result = AnalysisResult {
            total_value: snapshot.total_value,
            sectors,
            warnings,
            suggestions: Vec::new(),
        };

        Ok((report.holdings, result, snapshot.diversification_score))
    }

    /// Request advisory recommendations and merge them into the existing
    /// result. Only `suggestions` is replaced; `sectors` and `warnings` stay
    /// as analyzed. The model may differ from the one used to analyze; the
    /// two calls are independent. A failure keeps the previous suggestions.
    pub async fn generate_suggestions(
        &mut self,
        model: ModelType,
    ) -> Result<usize, AnalysisError> {
        if self.result.is_none() {
            return Err(AnalysisError::Validation(
                "analyze a portfolio before requesting suggestions".to_string(),
            ));
        }
        if self.holdings.is_empty() {
            return Err(AnalysisError::Validation(
                "no holdings in memory; analyze a portfolio first".to_string(),
            ));
        }

        let prior_state = self.state;
        self.state = SessionState::Suggesting;
        info!(
            "Requesting {} suggestions for {} holding(s)",
            model,
            self.holdings.len()
        );

        let outcome = match self
            .remote_call(self.backend.recommend(model, &self.holdings))
            .await
        {
            Ok(raw) => normalizer::normalize(&raw),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(suggestions) => {
                let count = suggestions.len();
                if let Some(result) = self.result.as_mut() {
                    result.suggestions = suggestions;
                }
                self.state = SessionState::Analyzed;
                if count == 0 {
                    info!("No rebalancing needed; portfolio is aligned with {}", model);
                } else {
                    info!("{} suggestion(s) merged into the result", count);
                }
                Ok(count)
            }
            Err(e) => {
                self.state = prior_state;
                warn!("Suggestion generation failed: {}", e);
                Err(e)
            }
        }
    }

    /// Serialize the current result as the downloadable artifact.
    pub fn export_json(&self) -> Result<String, AnalysisError> {
        match &self.result {
            Some(result) => result
                .to_json_pretty()
                .map_err(|e| AnalysisError::Validation(format!("could not serialize result: {}", e))),
            None => Err(AnalysisError::Validation(
                "nothing analyzed yet".to_string(),
            )),
        }
    }

    /// Bound every remote call; expiry is a recoverable remote error, not a
    /// hung session.
    async fn remote_call<T>(
        &self,
        fut: impl Future<Output = anyhow::Result<T>>,
    ) -> Result<T, AnalysisError> {
        let limit = Duration::from_secs(self.config.request_timeout_secs);
        match timeout(limit, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(AnalysisError::Remote(format!("{:#}", e))),
            Err(_) => Err(AnalysisError::Remote(format!(
                "no response within {}s",
                limit.as_secs()
            ))),
        }
    }
}
