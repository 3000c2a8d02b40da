use serde_json::Value;

use crate::state::AppState;
use crate::workflow::{Controller, Outcome};
use crate::workflows::linkedin::{
    AnalyzeProfile, KeywordSuggestions, ProfileAnalysis, SuggestKeywords,
};

pub struct LinkedInSession {
    pub analyze: Controller<AnalyzeProfile>,
    pub keywords: Controller<SuggestKeywords>,
}

impl LinkedInSession {
    pub fn new(app: &AppState) -> Self {
        Self {
            analyze: Controller::configure(AnalyzeProfile, app),
            keywords: Controller::configure(SuggestKeywords, app),
        }
    }

    pub async fn analyze_profile(&self, profile_url: &str) -> Outcome<ProfileAnalysis> {
        self.analyze.submit(&profile_url.to_string()).await
    }

    pub async fn suggest_keywords(&self, profile: &Value) -> Outcome<KeywordSuggestions> {
        self.keywords.submit(profile).await
    }

    pub fn is_loading(&self) -> bool {
        self.analyze.is_in_flight() || self.keywords.is_in_flight()
    }
}
