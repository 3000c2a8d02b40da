use serde_json::Value;

use crate::state::AppState;
use crate::workflow::{Controller, Outcome};
use crate::workflows::portfolio::{
    AnalyzeGithub, CustomizePortfolio, CustomizeRequest, DeployPortfolio, Deployment,
    GeneratePortfolio, Portfolio, UserData,
};

/// Portfolio page. Whichever of GitHub analysis, generation or customization
/// succeeded last provides the portfolio that `deploy` publishes.
pub struct PortfolioSession {
    pub analyze: Controller<AnalyzeGithub>,
    pub generate: Controller<GeneratePortfolio>,
    pub customize: Controller<CustomizePortfolio>,
    pub deploy: Controller<DeployPortfolio>,
    portfolio: Option<Portfolio>,
}

impl PortfolioSession {
    pub fn new(app: &AppState) -> Self {
        Self {
            analyze: Controller::configure(AnalyzeGithub, app),
            generate: Controller::configure(GeneratePortfolio, app),
            customize: Controller::configure(CustomizePortfolio, app),
            deploy: Controller::configure(DeployPortfolio, app),
            portfolio: None,
        }
    }

    pub async fn analyze_github(&mut self, username: &str) -> Outcome<Portfolio> {
        let outcome = self.analyze.submit(&username.to_string()).await;
        self.keep(&outcome);
        outcome
    }

    pub async fn generate_portfolio(&mut self, user: &UserData) -> Outcome<Portfolio> {
        let outcome = self.generate.submit(user).await;
        self.keep(&outcome);
        outcome
    }

    pub async fn customize_portfolio(&mut self, customization: Value) -> Outcome<Portfolio> {
        let request = CustomizeRequest {
            portfolio: self.portfolio.clone(),
            customization,
        };
        let outcome = self.customize.submit(&request).await;
        self.keep(&outcome);
        outcome
    }

    /// Publishes the current portfolio. Rejected when nothing has been generated yet.
    pub async fn deploy_portfolio(&self) -> Outcome<Deployment> {
        self.deploy.submit(&self.portfolio).await
    }

    pub fn portfolio(&self) -> Option<&Portfolio> {
        self.portfolio.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.analyze.is_in_flight()
            || self.generate.is_in_flight()
            || self.customize.is_in_flight()
            || self.deploy.is_in_flight()
    }

    fn keep(&mut self, outcome: &Outcome<Portfolio>) {
        if let Outcome::Succeeded(portfolio) = outcome {
            self.portfolio = Some(portfolio.clone());
            // an earlier deployment refers to a different document
            self.deploy.reset();
        }
    }
}
