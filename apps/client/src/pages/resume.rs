use crate::state::AppState;
use crate::transport::FileBlob;
use crate::workflow::{Controller, Outcome};
use crate::workflows::resume::{
    AnalyzeResume, CoverLetter, CoverLetterRequest, EnhanceRequest, EnhanceResume,
    EnhancedResume, GenerateCoverLetter, GenerateResume, ResumeAnalysis,
};

/// Resume page. Analysis and generation share one result panel: the most
/// recent success of either is what the page shows.
pub struct ResumeSession {
    pub analyze: Controller<AnalyzeResume>,
    pub generate: Controller<GenerateResume>,
    pub cover_letter: Controller<GenerateCoverLetter>,
    pub enhance: Controller<EnhanceResume>,
    analysis: Option<ResumeAnalysis>,
}

impl ResumeSession {
    pub fn new(app: &AppState) -> Self {
        Self {
            analyze: Controller::configure(AnalyzeResume, app),
            generate: Controller::configure(GenerateResume, app),
            cover_letter: Controller::configure(GenerateCoverLetter, app),
            enhance: Controller::configure(EnhanceResume, app),
            analysis: None,
        }
    }

    pub async fn analyze_resume(&mut self, file: Option<FileBlob>) -> Outcome<ResumeAnalysis> {
        let outcome = self.analyze.submit(&file).await;
        self.keep(&outcome);
        outcome
    }

    pub async fn generate_resume(&mut self, job_description: &str) -> Outcome<ResumeAnalysis> {
        let outcome = self.generate.submit(&job_description.to_string()).await;
        self.keep(&outcome);
        outcome
    }

    pub async fn generate_cover_letter(&self, request: &CoverLetterRequest) -> Outcome<CoverLetter> {
        self.cover_letter.submit(request).await
    }

    pub async fn enhance_content(&self, request: &EnhanceRequest) -> Outcome<EnhancedResume> {
        self.enhance.submit(request).await
    }

    pub fn analysis(&self) -> Option<&ResumeAnalysis> {
        self.analysis.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.analyze.is_in_flight()
            || self.generate.is_in_flight()
            || self.cover_letter.is_in_flight()
            || self.enhance.is_in_flight()
    }

    fn keep(&mut self, outcome: &Outcome<ResumeAnalysis>) {
        match outcome {
            Outcome::Succeeded(analysis) => self.analysis = Some(analysis.clone()),
            // a stale panel must not sit next to a fresh error
            Outcome::Failed(_) => self.analysis = None,
            Outcome::Rejected(_) | Outcome::Discarded => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use serde_json::json;

    use super::*;
    use crate::testing::{app_with, ScriptedTransport};
    use crate::transport::{FormPart, Payload};

    #[tokio::test]
    async fn test_upload_is_sent_as_resume_part() {
        let transport = ScriptedTransport::new()
            .reply_json(200, json!({"analysis": "Strong", "keywords": ["Rust"]}));
        let (app, _) = app_with(transport.clone());
        let mut session = ResumeSession::new(&app);
        let file = FileBlob::new("cv.pdf", Bytes::from_static(b"%PDF-1.7"));

        session.analyze_resume(Some(file.clone())).await;

        assert_eq!(session.analysis().and_then(|a| a.analysis.as_deref()), Some("Strong"));
        let (_, payload) = &transport.requests()[0];
        assert_eq!(
            payload,
            &Payload::Multipart(vec![FormPart::File {
                name: "resume".into(),
                file
            }])
        );
    }

    #[tokio::test]
    async fn test_failure_clears_shared_panel() {
        let transport = ScriptedTransport::new()
            .reply_json(200, json!({"resume": "Tailored"}))
            .reply_json(400, json!({"error": "No job description provided"}));
        let (app, _) = app_with(transport);
        let mut session = ResumeSession::new(&app);

        session.generate_resume("JD").await;
        assert!(session.analysis().is_some());

        let outcome = session
            .analyze_resume(Some(FileBlob::new("cv.docx", Bytes::new())))
            .await;

        assert_eq!(outcome, Outcome::Failed("No job description provided".into()));
        assert!(session.analysis().is_none());
    }

    #[tokio::test]
    async fn test_missing_upload_keeps_panel_and_sends_nothing() {
        let transport = ScriptedTransport::new().reply_json(200, json!({"resume": "Tailored"}));
        let (app, notices) = app_with(transport.clone());
        let mut session = ResumeSession::new(&app);

        session.generate_resume("JD").await;
        notices.drain();
        session.analyze_resume(None).await;

        assert!(session.analysis().is_some());
        assert_eq!(transport.request_count(), 1);
        assert_eq!(notices.drain()[0].message, "Please upload a resume first");
    }
}
