use crate::state::AppState;
use crate::workflow::{Controller, Outcome};
use crate::workflows::social::{
    GeneratePost, GenerateThread, HashtagRequest, Hashtags, OptimizeTiming, PostRequest,
    PostingTimes, SocialContent, SuggestHashtags, ThreadRequest, TimingRequest,
};

/// Social content page. Posts and threads share one content panel.
pub struct SocialSession {
    pub post: Controller<GeneratePost>,
    pub thread: Controller<GenerateThread>,
    pub hashtags: Controller<SuggestHashtags>,
    pub timing: Controller<OptimizeTiming>,
    content: Option<SocialContent>,
}

impl SocialSession {
    pub fn new(app: &AppState) -> Self {
        Self {
            post: Controller::configure(GeneratePost, app),
            thread: Controller::configure(GenerateThread, app),
            hashtags: Controller::configure(SuggestHashtags, app),
            timing: Controller::configure(OptimizeTiming, app),
            content: None,
        }
    }

    pub async fn generate_post(&mut self, request: &PostRequest) -> Outcome<SocialContent> {
        let outcome = self.post.submit(request).await;
        self.keep(&outcome);
        outcome
    }

    pub async fn generate_thread(&mut self, request: &ThreadRequest) -> Outcome<SocialContent> {
        let outcome = self.thread.submit(request).await;
        self.keep(&outcome);
        outcome
    }

    pub async fn suggest_hashtags(&self, request: &HashtagRequest) -> Outcome<Hashtags> {
        self.hashtags.submit(request).await
    }

    pub async fn posting_times(&self, request: &TimingRequest) -> Outcome<PostingTimes> {
        self.timing.submit(request).await
    }

    pub fn content(&self) -> Option<&SocialContent> {
        self.content.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.post.is_in_flight()
            || self.thread.is_in_flight()
            || self.hashtags.is_in_flight()
            || self.timing.is_in_flight()
    }

    fn keep(&mut self, outcome: &Outcome<SocialContent>) {
        match outcome {
            Outcome::Succeeded(content) => self.content = Some(content.clone()),
            Outcome::Failed(_) => self.content = None,
            Outcome::Rejected(_) | Outcome::Discarded => {}
        }
    }
}
