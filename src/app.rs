use anyhow::Result;
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};

use rebalance_advisor::config::Config;
use rebalance_advisor::models::ModelType;
use rebalance_advisor::remote::PortfolioBackend;
use rebalance_advisor::session::AnalysisSession;

/// Terminal front-end: reads commands and dispatches each one to the
/// session. All pipeline state lives in the session; this layer never
/// touches sectors or warnings directly.
pub struct RebalanceApp {
    session: AnalysisSession,
}

impl RebalanceApp {
    pub fn new(config: Config, backend: Box<dyn PortfolioBackend>) -> Self {
        info!("{}", "=".repeat(60));
        info!("Portfolio rebalancing advisor starting up");
        info!("Backend: {}", config.backend_url);
        info!("Default model: {}", config.default_model);
        info!("Upload limit: {} bytes", config.max_upload_bytes);
        info!("{}", "=".repeat(60));

        Self {
            session: AnalysisSession::new(config, backend),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        info!("Commands: load <path> | analyze | model <name> | suggest [model] | export [path] | status | quit");

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    info!("Session ended.");
                    return Ok(());
                }
                line = lines.next_line() => {
                    match line? {
                        Some(input) => {
                            if !self.dispatch(input.trim()).await {
                                return Ok(());
                            }
                        }
                        None => {
                            info!("Session ended.");
                            return Ok(());
                        }
                    }
                }
            }
        }
    }

    /// Route one user command; returns false when the session should end.
    async fn dispatch(&mut self, input: &str) -> bool {
        let (cmd, rest) = match input.split_once(' ') {
            Some((c, r)) => (c, r.trim()),
            None => (input, ""),
        };

        match cmd {
            "" => {}
            "load" => self.load(rest),
            "analyze" => self.analyze().await,
            "model" => self.set_model(rest),
            "suggest" => self.suggest(rest).await,
            "export" => self.export(rest),
            "status" => self.print_status(),
            "quit" | "exit" => {
                info!("Session ended.");
                return false;
            }
            other => error!("Unknown command: {}", other),
        }
        true
    }

    fn load(&mut self, path: &str) {
        if path.is_empty() {
            error!("Usage: load <path>");
            return;
        }

        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                error!("Could not read {}: {}", path, e);
                return;
            }
        };

        let name = Path::new(path)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string());

        if let Err(e) = self.session.select_file(&name, &contents) {
            error!("{}", e);
        }
    }

    async fn analyze(&mut self) {
        if let Err(e) = self.session.analyze().await {
            error!("{}", e);
            return;
        }

        let Some(result) = self.session.result() else {
            return;
        };

        info!("{}", "=".repeat(60));
        info!("PORTFOLIO ANALYSIS — {} model", self.session.selected_model());
        info!("  Total value: ${:.2}", result.total_value);
        info!("  Sector breakdown:");
        for sector in &result.sectors {
            let weight = if sector.is_overweight() {
                format!("overweight by {:.1}%", sector.difference)
            } else if sector.is_underweight() {
                format!("underweight by {:.1}%", -sector.difference)
            } else {
                "on target".to_string()
            };
            info!(
                "    {}: ${:.2} ({:.1}% vs target {:.1}%) — {}",
                sector.sector,
                sector.current_value,
                sector.current_percent,
                sector.target_percent,
                weight
            );
        }

        if result.warnings.is_empty() {
            info!("  No concentration warnings; portfolio appears well-diversified.");
        } else {
            info!("  Concentration alerts:");
            for warning in &result.warnings {
                info!("    [{} risk] {}", warning.severity, warning.message);
            }
        }

        if let Some(score) = self.session.diversification_score() {
            info!("  Diversification score: {:.2}", score);
        }
        info!("{}", "=".repeat(60));
    }

    fn set_model(&mut self, name: &str) {
        match ModelType::from_str_loose(name) {
            Some(model) => {
                self.session.set_model(model);
                info!("Target model set to {} (takes effect on the next analyze)", model);
            }
            None => error!(
                "Unknown model '{}'; expected conservative, balanced or growth",
                name
            ),
        }
    }

    async fn suggest(&mut self, rest: &str) {
        let model = if rest.is_empty() {
            self.session.selected_model()
        } else {
            match ModelType::from_str_loose(rest) {
                Some(m) => m,
                None => {
                    error!(
                        "Unknown model '{}'; expected conservative, balanced or growth",
                        rest
                    );
                    return;
                }
            }
        };

        match self.session.generate_suggestions(model).await {
            Ok(0) => {
                info!("No rebalancing needed. Your portfolio is well-aligned with target allocations.");
            }
            Ok(_) => {
                let Some(result) = self.session.result() else {
                    return;
                };
                info!("{}", "=".repeat(60));
                info!("REBALANCING SUGGESTIONS — {} model", model);
                for suggestion in &result.suggestions {
                    let subject = match (&suggestion.ticker, &suggestion.sector) {
                        (Some(t), Some(s)) => format!("{} ({})", t, s),
                        (Some(t), None) => t.clone(),
                        (None, Some(s)) => s.clone(),
                        (None, None) => "portfolio".to_string(),
                    };
                    let tag = if suggestion.ai_generated { " [AI]" } else { "" };
                    info!(
                        "  {} {} ${:.2}{}",
                        suggestion.action.as_str().to_uppercase(),
                        subject,
                        suggestion.amount,
                        tag
                    );
                    info!("    {}", suggestion.reason);
                }
                info!("{}", "=".repeat(60));
            }
            Err(e) => error!("{}", e),
        }
    }

    fn export(&mut self, rest: &str) {
        let json = match self.session.export_json() {
            Ok(j) => j,
            Err(e) => {
                error!("{}", e);
                return;
            }
        };

        let path = if rest.is_empty() {
            format!(
                "portfolio-analysis-{}.json",
                chrono::Utc::now().format("%Y-%m-%d")
            )
        } else {
            rest.to_string()
        };

        match std::fs::write(&path, &json) {
            Ok(()) => info!("Exported analysis to {}", path),
            Err(e) => error!("Could not write {}: {}", path, e),
        }
    }

    fn print_status(&self) {
        info!("State: {}", self.session.state());
        match self.session.file_name() {
            Some(name) => info!("File: {}", name),
            None => info!("File: none"),
        }
        info!("Holdings: {}", self.session.holdings().len());
        info!("Selected model: {}", self.session.selected_model());

        match self.session.result() {
            Some(result) => {
                info!("Total value: ${:.2}", result.total_value);
                info!(
                    "Sectors: {} | Warnings: {} | Suggestions: {}",
                    result.sectors.len(),
                    result.warnings.len(),
                    result.suggestions.len()
                );
                if let Some(score) = self.session.diversification_score() {
                    info!("Diversification score: {:.2}", score);
                }
            }
            None => info!("No analysis yet."),
        }
    }
}
