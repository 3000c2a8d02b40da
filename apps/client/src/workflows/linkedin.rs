use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::transport::Payload;
use crate::workflow::{require, Workflow};
use crate::workflows::{lenient_list, lenient_text, string_or_list};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileAnalysis {
    #[serde(default, deserialize_with = "lenient_text")]
    pub analysis: Option<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub keywords: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub suggestions: Vec<String>,
}

pub struct AnalyzeProfile;

impl Workflow for AnalyzeProfile {
    type Input = String;
    type Output = ProfileAnalysis;

    const NAME: &'static str = "linkedin.analyze";
    const ENDPOINT: &'static str = "/api/linkedin/analyze";
    const SUCCESS_MESSAGE: &'static str = "Profile analyzed successfully!";
    const FAILURE_MESSAGE: &'static str = "Failed to analyze profile";

    fn validate(&self, profile_url: &String) -> Result<(), String> {
        require(profile_url, "Please enter a LinkedIn profile URL")
    }

    fn payload(&self, profile_url: &String) -> Payload {
        Payload::Json(json!({ "profile_url": profile_url.trim() }))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordSuggestions {
    #[serde(default, deserialize_with = "string_or_list")]
    pub keywords: Vec<String>,
}

pub struct SuggestKeywords;

impl Workflow for SuggestKeywords {
    /// Profile sections as the service's profile schema defines them.
    type Input = Value;
    type Output = KeywordSuggestions;

    const NAME: &'static str = "linkedin.suggest_keywords";
    const ENDPOINT: &'static str = "/api/linkedin/suggest-keywords";
    const SUCCESS_MESSAGE: &'static str = "Keywords suggested!";
    const FAILURE_MESSAGE: &'static str = "Failed to suggest keywords";

    fn validate(&self, profile: &Value) -> Result<(), String> {
        match profile {
            Value::Object(fields) if !fields.is_empty() => Ok(()),
            _ => Err("Please provide profile data".to_string()),
        }
    }

    fn payload(&self, profile: &Value) -> Payload {
        Payload::Json(json!({ "profile_data": profile }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_url_is_invalid() {
        assert_eq!(
            AnalyzeProfile.validate(&"".to_string()),
            Err("Please enter a LinkedIn profile URL".to_string())
        );
    }

    #[test]
    fn test_profile_payload() {
        assert_eq!(
            AnalyzeProfile.payload(&"https://www.linkedin.com/in/ada ".to_string()),
            Payload::Json(json!({"profile_url": "https://www.linkedin.com/in/ada"}))
        );
    }

    #[test]
    fn test_suggest_keywords_requires_object() {
        assert!(SuggestKeywords.validate(&json!({})).is_err());
        assert!(SuggestKeywords.validate(&json!("headline")).is_err());
        assert!(SuggestKeywords.validate(&json!({"headline": "Engineer"})).is_ok());
    }

    #[test]
    fn test_analysis_without_suggestions() {
        let analysis: ProfileAnalysis =
            serde_json::from_str(r#"{"analysis": "Strong headline", "keywords": ["Rust"]}"#)
                .unwrap();
        assert!(analysis.suggestions.is_empty());
        assert_eq!(analysis.keywords, vec!["Rust"]);
    }
}
