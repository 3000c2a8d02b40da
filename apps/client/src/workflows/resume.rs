//! Resume analysis, tailored generation, cover letters and content enhancement.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::transport::{FileBlob, FormPart, Payload};
use crate::workflow::{require, Workflow};
use crate::workflows::{lenient_list, lenient_score, lenient_text, string_or_list};

/// Upload formats the analysis service can read.
pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "doc", "docx"];

/// Result of both analysis and generation. Generation fills `resume`,
/// analysis fills `analysis`; either may carry `keywords`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeAnalysis {
    #[serde(default, deserialize_with = "lenient_text")]
    pub analysis: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub resume: Option<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub keywords: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub suggestions: Vec<String>,
    #[serde(default, deserialize_with = "lenient_score")]
    pub score: Option<f64>,
}

// ────────────────────────────────────────────────────────────────────────────
// Analyze an uploaded resume
// ────────────────────────────────────────────────────────────────────────────

pub struct AnalyzeResume;

impl Workflow for AnalyzeResume {
    type Input = Option<FileBlob>;
    type Output = ResumeAnalysis;

    const NAME: &'static str = "resume.analyze";
    const ENDPOINT: &'static str = "/api/resume/analyze";
    const SUCCESS_MESSAGE: &'static str = "Resume analyzed successfully!";
    const FAILURE_MESSAGE: &'static str = "Failed to analyze resume";

    fn validate(&self, input: &Option<FileBlob>) -> Result<(), String> {
        let file = input
            .as_ref()
            .ok_or_else(|| "Please upload a resume first".to_string())?;
        if file.file_name.trim().is_empty() {
            return Err("No file selected".to_string());
        }
        match file.extension() {
            Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
            _ => Err("Invalid file type. Please upload a PDF or DOC file.".to_string()),
        }
    }

    fn payload(&self, input: &Option<FileBlob>) -> Payload {
        let parts = input
            .iter()
            .map(|file| FormPart::File {
                name: "resume".to_string(),
                file: file.clone(),
            })
            .collect();
        Payload::Multipart(parts)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Generate a resume tailored to a job description
// ────────────────────────────────────────────────────────────────────────────

pub struct GenerateResume;

impl Workflow for GenerateResume {
    type Input = String;
    type Output = ResumeAnalysis;

    const NAME: &'static str = "resume.generate";
    const ENDPOINT: &'static str = "/api/resume/generate";
    const SUCCESS_MESSAGE: &'static str = "Resume generated successfully!";
    const FAILURE_MESSAGE: &'static str = "Failed to generate resume";

    fn validate(&self, job_description: &String) -> Result<(), String> {
        require(job_description, "Please enter a job description")
    }

    fn payload(&self, job_description: &String) -> Payload {
        Payload::Json(json!({ "job_description": job_description }))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Cover letter
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize)]
pub struct CoverLetterRequest {
    pub job_description: String,
    pub resume: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverLetter {
    #[serde(default, deserialize_with = "lenient_text")]
    pub cover_letter: Option<String>,
}

pub struct GenerateCoverLetter;

impl Workflow for GenerateCoverLetter {
    type Input = CoverLetterRequest;
    type Output = CoverLetter;

    const NAME: &'static str = "resume.cover_letter";
    const ENDPOINT: &'static str = "/api/resume/cover-letter";
    const SUCCESS_MESSAGE: &'static str = "Cover letter generated successfully!";
    const FAILURE_MESSAGE: &'static str = "Failed to generate cover letter";

    fn validate(&self, input: &CoverLetterRequest) -> Result<(), String> {
        require(&input.job_description, "Please enter a job description")?;
        require(&input.resume, "Please provide your resume")
    }

    fn payload(&self, input: &CoverLetterRequest) -> Payload {
        Payload::Json(json!(input))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Enhance builder content (projects, experience, skills)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize)]
pub struct EnhanceRequest {
    pub projects: String,
    #[serde(rename = "workExperience")]
    pub work_experience: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnhancedResume {
    #[serde(default, deserialize_with = "lenient_text")]
    pub projects: Option<String>,
    #[serde(default, rename = "workExperience", deserialize_with = "lenient_text")]
    pub work_experience: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub suggestions: Vec<String>,
}

pub struct EnhanceResume;

impl Workflow for EnhanceResume {
    type Input = EnhanceRequest;
    type Output = EnhancedResume;

    const NAME: &'static str = "resume.enhance";
    const ENDPOINT: &'static str = "/api/enhance-resume";
    const SUCCESS_MESSAGE: &'static str = "Resume content enhanced!";
    const FAILURE_MESSAGE: &'static str = "Failed to enhance resume content";

    fn validate(&self, input: &EnhanceRequest) -> Result<(), String> {
        let has_content = !input.projects.trim().is_empty()
            || !input.work_experience.trim().is_empty()
            || input.skills.iter().any(|s| !s.trim().is_empty());
        if has_content {
            Ok(())
        } else {
            Err("Please add projects, experience or skills to enhance".to_string())
        }
    }

    fn payload(&self, input: &EnhanceRequest) -> Payload {
        Payload::Json(json!(input))
    }
}
