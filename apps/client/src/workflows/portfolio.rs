//! Portfolio site generation from GitHub activity or hand-entered profile data.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::transport::Payload;
use crate::workflow::{require, Workflow};
use crate::workflows::lenient_text;

/// Portfolio document as produced by the service. Kept opaque because it is
/// passed back verbatim to customize and deploy; accessors read the parts
/// that get displayed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Portfolio(pub Value);

impl Portfolio {
    fn text(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn html(&self) -> Option<&str> {
        self.text("html")
    }

    pub fn css(&self) -> Option<&str> {
        self.text("css")
    }

    pub fn js(&self) -> Option<&str> {
        self.text("js")
    }

    /// Repository names from a GitHub analysis, in service order.
    pub fn repository_names(&self) -> Vec<&str> {
        self.0
            .get("repositories")
            .and_then(Value::as_array)
            .map(|repos| {
                repos
                    .iter()
                    .filter_map(|r| r.get("name").and_then(Value::as_str))
                    .collect()
            })
            .unwrap_or_default()
    }
}

pub struct AnalyzeGithub;

impl Workflow for AnalyzeGithub {
    type Input = String;
    type Output = Portfolio;

    const NAME: &'static str = "portfolio.analyze_github";
    const ENDPOINT: &'static str = "/api/portfolio/analyze-github";
    const SUCCESS_MESSAGE: &'static str = "GitHub profile analyzed successfully!";
    const FAILURE_MESSAGE: &'static str = "Failed to analyze GitHub profile";

    fn validate(&self, username: &String) -> Result<(), String> {
        require(username, "Please enter a GitHub username")
    }

    fn payload(&self, username: &String) -> Payload {
        Payload::Json(json!({ "github_username": username.trim() }))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserData {
    pub name: String,
    pub title: String,
    pub about: String,
    pub skills: String,
    pub experience: String,
}

pub struct GeneratePortfolio;

impl Workflow for GeneratePortfolio {
    type Input = UserData;
    type Output = Portfolio;

    const NAME: &'static str = "portfolio.generate";
    const ENDPOINT: &'static str = "/api/portfolio/generate";
    const SUCCESS_MESSAGE: &'static str = "Portfolio generated successfully!";
    const FAILURE_MESSAGE: &'static str = "Failed to generate portfolio";

    fn validate(&self, user: &UserData) -> Result<(), String> {
        if user.name.trim().is_empty() || user.title.trim().is_empty() {
            Err("Please fill in the required fields".to_string())
        } else {
            Ok(())
        }
    }

    fn payload(&self, user: &UserData) -> Payload {
        Payload::Json(json!({ "user_data": user }))
    }
}

#[derive(Debug, Clone, Default)]
pub struct CustomizeRequest {
    pub portfolio: Option<Portfolio>,
    /// Free-form options: colour scheme, layout, typography and so on.
    pub customization: Value,
}

pub struct CustomizePortfolio;

impl Workflow for CustomizePortfolio {
    type Input = CustomizeRequest;
    type Output = Portfolio;

    const NAME: &'static str = "portfolio.customize";
    const ENDPOINT: &'static str = "/api/portfolio/customize";
    const SUCCESS_MESSAGE: &'static str = "Portfolio customized successfully!";
    const FAILURE_MESSAGE: &'static str = "Failed to customize portfolio";

    fn validate(&self, input: &CustomizeRequest) -> Result<(), String> {
        match input.portfolio {
            Some(_) => Ok(()),
            None => Err("Please generate a portfolio first".to_string()),
        }
    }

    fn payload(&self, input: &CustomizeRequest) -> Payload {
        Payload::Json(json!({
            "portfolio_data": input.portfolio,
            "customization": input.customization,
        }))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Deployment {
    #[serde(default, deserialize_with = "lenient_text")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub deployed_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub message: Option<String>,
}

impl Deployment {
    /// Public address of the deployed site; older services report it as `deployed_url`.
    pub fn link(&self) -> Option<&str> {
        self.url.as_deref().or(self.deployed_url.as_deref())
    }
}

pub struct DeployPortfolio;

impl Workflow for DeployPortfolio {
    type Input = Option<Portfolio>;
    type Output = Deployment;

    const NAME: &'static str = "portfolio.deploy";
    const ENDPOINT: &'static str = "/api/portfolio/deploy";
    const SUCCESS_MESSAGE: &'static str = "Portfolio deployed successfully!";
    const FAILURE_MESSAGE: &'static str = "Failed to deploy portfolio";

    fn validate(&self, portfolio: &Option<Portfolio>) -> Result<(), String> {
        match portfolio {
            Some(_) => Ok(()),
            None => Err("Please generate a portfolio first".to_string()),
        }
    }

    fn payload(&self, portfolio: &Option<Portfolio>) -> Payload {
        Payload::Json(json!({ "portfolio_data": portfolio }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portfolio_accessors_tolerate_missing_parts() {
        let portfolio = Portfolio(json!({"html": "<h1>Hi</h1>", "css": 42}));
        assert_eq!(portfolio.html(), Some("<h1>Hi</h1>"));
        assert_eq!(portfolio.css(), None, "non-string css is treated as absent");
        assert_eq!(portfolio.js(), None);
    }

    #[test]
    fn test_repository_names_from_github_analysis() {
        let analysis = Portfolio(json!({
            "user": {"name": "Ada"},
            "repositories": [{"name": "engine"}, {"description": "no name"}, {"name": "notes"}]
        }));
        assert_eq!(analysis.repository_names(), vec!["engine", "notes"]);
        assert!(Portfolio::default().repository_names().is_empty());
    }

    #[test]
    fn test_generate_requires_name_and_title() {
        let user = UserData {
            name: "Ada".into(),
            ..Default::default()
        };
        assert_eq!(
            GeneratePortfolio.validate(&user),
            Err("Please fill in the required fields".to_string())
        );
    }

    #[test]
    fn test_generate_wraps_user_data() {
        let user = UserData {
            name: "Ada".into(),
            title: "Engineer".into(),
            ..Default::default()
        };
        let Payload::Json(body) = GeneratePortfolio.payload(&user) else {
            panic!("expected json payload");
        };
        assert_eq!(body["user_data"]["name"], "Ada");
        assert_eq!(body["user_data"]["experience"], "");
    }

    #[test]
    fn test_github_username_is_trimmed() {
        assert_eq!(
            AnalyzeGithub.payload(&"  octocat ".to_string()),
            Payload::Json(json!({"github_username": "octocat"}))
        );
    }

    #[test]
    fn test_deploy_without_portfolio_is_invalid() {
        assert_eq!(
            DeployPortfolio.validate(&None),
            Err("Please generate a portfolio first".to_string())
        );
    }

    #[test]
    fn test_deploy_sends_portfolio_verbatim() {
        let portfolio = Portfolio(json!({"html": "<p/>", "meta": {"title": "Ada"}}));
        assert_eq!(
            DeployPortfolio.payload(&Some(portfolio)),
            Payload::Json(json!({"portfolio_data": {"html": "<p/>", "meta": {"title": "Ada"}}}))
        );
    }

    #[test]
    fn test_deployment_link_prefers_url() {
        let both: Deployment = serde_json::from_str(
            r#"{"url": "https://a.example", "deployed_url": "https://b.example"}"#,
        )
        .unwrap();
        assert_eq!(both.link(), Some("https://a.example"));

        let legacy: Deployment =
            serde_json::from_str(r#"{"status": "success", "deployed_url": "https://b.example"}"#)
                .unwrap();
        assert_eq!(legacy.link(), Some("https://b.example"));
        assert_eq!(Deployment::default().link(), None);
    }
}
