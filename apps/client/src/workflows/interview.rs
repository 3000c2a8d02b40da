//! Interview practice: question generation, sample answers, response analysis.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::transport::Payload;
use crate::workflow::{require, Workflow};
use crate::workflows::{lenient_list, lenient_score, lenient_text, Difficulty};

#[derive(Debug, Clone, Default, Serialize)]
pub struct QuestionsRequest {
    pub job_description: String,
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Questions {
    #[serde(default, deserialize_with = "lenient_list")]
    pub questions: Vec<String>,
}

pub struct GenerateQuestions;

impl Workflow for GenerateQuestions {
    type Input = QuestionsRequest;
    type Output = Questions;

    const NAME: &'static str = "interview.generate_questions";
    const ENDPOINT: &'static str = "/api/interview/generate-questions";
    const SUCCESS_MESSAGE: &'static str = "Questions generated successfully!";
    const FAILURE_MESSAGE: &'static str = "Failed to generate questions. Please try again.";

    fn validate(&self, input: &QuestionsRequest) -> Result<(), String> {
        require(&input.job_description, "Please enter a job description")
    }

    fn payload(&self, input: &QuestionsRequest) -> Payload {
        Payload::Json(json!(input))
    }

    fn check(&self, output: &Questions) -> Result<(), String> {
        if output.questions.iter().any(|q| !q.trim().is_empty()) {
            Ok(())
        } else {
            Err("No questions were generated".to_string())
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AnswersRequest {
    pub question: String,
    pub job_context: String,
    pub difficulty: Difficulty,
}

/// Model answers for one question. Every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleAnswers {
    #[serde(default, deserialize_with = "lenient_text")]
    pub strong_answer: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub weak_answer: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub key_points: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub common_pitfalls: Vec<String>,
}

pub struct GenerateAnswers;

impl Workflow for GenerateAnswers {
    type Input = AnswersRequest;
    type Output = SampleAnswers;

    const NAME: &'static str = "interview.generate_answers";
    const ENDPOINT: &'static str = "/api/interview/generate-answers";
    const SUCCESS_MESSAGE: &'static str = "Sample answers ready";
    const FAILURE_MESSAGE: &'static str = "Failed to generate answers. Please try again.";

    fn validate(&self, input: &AnswersRequest) -> Result<(), String> {
        require(&input.question, "Please select a question")
    }

    fn payload(&self, input: &AnswersRequest) -> Payload {
        Payload::Json(json!(input))
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ResponseRequest {
    pub response: String,
    pub question: String,
    pub job_context: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseAnalysis {
    #[serde(default, deserialize_with = "lenient_text")]
    pub analysis: Option<String>,
    #[serde(default, deserialize_with = "lenient_score")]
    pub score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub suggestions: Vec<String>,
}

impl ResponseAnalysis {
    /// Score clamped into `0..=100`, suitable for a progress bar width.
    pub fn score_percent(&self) -> Option<u8> {
        self.score
            .filter(|s| s.is_finite())
            .map(|s| s.clamp(0.0, 100.0).round() as u8)
    }
}

pub struct AnalyzeResponse;

impl Workflow for AnalyzeResponse {
    type Input = ResponseRequest;
    type Output = ResponseAnalysis;

    const NAME: &'static str = "interview.analyze_response";
    const ENDPOINT: &'static str = "/api/interview/analyze-response";
    const SUCCESS_MESSAGE: &'static str = "Response analyzed successfully!";
    const FAILURE_MESSAGE: &'static str = "Failed to analyze response. Please try again.";

    fn validate(&self, input: &ResponseRequest) -> Result<(), String> {
        require(&input.response, "Please provide a response")?;
        require(&input.question, "Please select a question")
    }

    fn payload(&self, input: &ResponseRequest) -> Payload {
        Payload::Json(json!(input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_questions_payload_includes_difficulty() {
        let input = QuestionsRequest {
            job_description: "Platform engineer".into(),
            difficulty: Difficulty::Hard,
        };
        assert_eq!(
            GenerateQuestions.payload(&input),
            Payload::Json(json!({"job_description": "Platform engineer", "difficulty": "hard"}))
        );
    }

    #[test]
    fn test_empty_question_list_is_rejected() {
        let empty = Questions { questions: vec![] };
        assert_eq!(
            GenerateQuestions.check(&empty),
            Err("No questions were generated".to_string())
        );
        let blank = Questions {
            questions: vec!["  ".into()],
        };
        assert!(GenerateQuestions.check(&blank).is_err());
    }

    #[test]
    fn test_blank_job_description_is_invalid() {
        let input = QuestionsRequest::default();
        assert_eq!(
            GenerateQuestions.validate(&input),
            Err("Please enter a job description".to_string())
        );
    }

    #[test]
    fn test_analyze_requires_response_before_question() {
        let input = ResponseRequest::default();
        assert_eq!(
            AnalyzeResponse.validate(&input),
            Err("Please provide a response".to_string())
        );
    }

    #[test]
    fn test_sample_answers_missing_lists_default_empty() {
        let answers: SampleAnswers =
            serde_json::from_str(r#"{"strong_answer": "Use STAR"}"#).unwrap();
        assert_eq!(answers.strong_answer.as_deref(), Some("Use STAR"));
        assert!(answers.key_points.is_empty());
        assert!(answers.common_pitfalls.is_empty());
        assert_eq!(answers.weak_answer, None);
    }

    #[test]
    fn test_response_analysis_with_text_score_and_null_suggestions() {
        let analysis: ResponseAnalysis = serde_json::from_str(
            r#"{"analysis": "Clear structure", "score": "85", "suggestions": null}"#,
        )
        .unwrap();
        assert_eq!(analysis.score_percent(), Some(85));
        assert!(analysis.suggestions.is_empty());
        assert_eq!(analysis.analysis.as_deref(), Some("Clear structure"));
    }

    #[test]
    fn test_score_percent_clamps() {
        let mut analysis = ResponseAnalysis {
            score: Some(85.4),
            ..Default::default()
        };
        assert_eq!(analysis.score_percent(), Some(85));
        analysis.score = Some(140.0);
        assert_eq!(analysis.score_percent(), Some(100));
        analysis.score = Some(-3.0);
        assert_eq!(analysis.score_percent(), Some(0));
        analysis.score = None;
        assert_eq!(analysis.score_percent(), None);
    }
}
