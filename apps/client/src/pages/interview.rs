use tracing::debug;

use crate::state::AppState;
use crate::workflow::{Controller, Outcome};
use crate::workflows::interview::{
    AnalyzeResponse, AnswersRequest, GenerateAnswers, GenerateQuestions, Questions,
    QuestionsRequest, ResponseAnalysis, ResponseRequest, SampleAnswers,
};
use crate::workflows::Difficulty;

/// Interview practice page: generate questions, walk through them one at a
/// time with sample answers, and get feedback on typed responses.
pub struct InterviewSession {
    pub questions: Controller<GenerateQuestions>,
    pub answers: Controller<GenerateAnswers>,
    pub analysis: Controller<AnalyzeResponse>,
    job_description: String,
    difficulty: Difficulty,
    current: Option<usize>,
    user_response: String,
}

impl InterviewSession {
    pub fn new(app: &AppState) -> Self {
        Self {
            questions: Controller::configure(GenerateQuestions, app),
            answers: Controller::configure(GenerateAnswers, app),
            analysis: Controller::configure(AnalyzeResponse, app),
            job_description: String::new(),
            difficulty: Difficulty::default(),
            current: None,
            user_response: String::new(),
        }
    }

    /// Generates questions and, on success, selects the first one and
    /// fetches its sample answers.
    pub async fn generate_questions(
        &mut self,
        job_description: &str,
        difficulty: Difficulty,
    ) -> Outcome<Questions> {
        self.job_description = job_description.to_string();
        self.difficulty = difficulty;

        let request = QuestionsRequest {
            job_description: self.job_description.clone(),
            difficulty,
        };
        let outcome = self.questions.submit(&request).await;

        if outcome.succeeded().is_some() {
            self.select(0);
            self.request_answers().await;
        }
        outcome
    }

    /// Moves to the next question. `None` when already on the last one.
    pub async fn next_question(&mut self) -> Option<Outcome<SampleAnswers>> {
        let next = self.current? + 1;
        if next >= self.question_list().len() {
            debug!("already at the last question");
            return None;
        }
        self.select(next);
        self.request_answers().await
    }

    pub fn set_response(&mut self, response: &str) {
        self.user_response = response.to_string();
    }

    pub fn response(&self) -> &str {
        &self.user_response
    }

    /// Scores the typed response against the current question.
    pub async fn analyze_response(&self) -> Outcome<ResponseAnalysis> {
        let request = ResponseRequest {
            response: self.user_response.clone(),
            question: self.current_question().unwrap_or_default(),
            job_context: self.job_description.clone(),
        };
        self.analysis.submit(&request).await
    }

    pub fn question_list(&self) -> Vec<String> {
        self.questions
            .result()
            .map(|q| q.questions)
            .unwrap_or_default()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_question(&self) -> Option<String> {
        self.current
            .and_then(|i| self.question_list().get(i).cloned())
    }

    pub fn is_last_question(&self) -> bool {
        match self.current {
            Some(i) => i + 1 >= self.question_list().len(),
            None => true,
        }
    }

    /// True while any of the page's requests is unresolved.
    pub fn is_loading(&self) -> bool {
        self.questions.is_in_flight() || self.answers.is_in_flight() || self.analysis.is_in_flight()
    }

    fn select(&mut self, index: usize) {
        self.current = Some(index);
        self.user_response.clear();
        // results computed for the previous question no longer apply
        self.analysis.reset();
        self.answers.reset();
    }

    async fn request_answers(&self) -> Option<Outcome<SampleAnswers>> {
        let question = self.current_question()?;
        let request = AnswersRequest {
            question,
            job_context: self.job_description.clone(),
            difficulty: self.difficulty,
        };
        Some(self.answers.submit(&request).await)
    }
}
