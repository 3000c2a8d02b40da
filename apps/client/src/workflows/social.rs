//! Social content: single posts, threads, hashtag suggestions, posting times.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::transport::Payload;
use crate::workflow::{require, Workflow};
use crate::workflows::{
    lenient, lenient_list, lenient_text, string_or_list, Length, Platform, Tone,
};

pub const DEFAULT_THREAD_LENGTH: u8 = 5;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    #[serde(default, deserialize_with = "lenient")]
    pub day: String,
    #[serde(default, deserialize_with = "lenient")]
    pub time: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostingTimes {
    #[serde(default, deserialize_with = "lenient_text")]
    pub platform: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub timezone: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub best_times: Vec<TimeSlot>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub next_optimal_time: Option<String>,
}

/// `best_time` arrives either as a schedule object or as prose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BestTime {
    Schedule(PostingTimes),
    Text(String),
}

/// Output of post and thread generation. A post fills `post`, a thread fills `thread`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialContent {
    #[serde(default, deserialize_with = "lenient_text")]
    pub post: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub thread: Vec<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub hashtags: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub best_time: Option<BestTime>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PostRequest {
    pub topic: String,
    pub platform: Platform,
    pub tone: Tone,
    pub length: Length,
}

pub struct GeneratePost;

impl Workflow for GeneratePost {
    type Input = PostRequest;
    type Output = SocialContent;

    const NAME: &'static str = "social.generate_post";
    const ENDPOINT: &'static str = "/api/social/generate-post";
    const SUCCESS_MESSAGE: &'static str = "Content generated successfully!";
    const FAILURE_MESSAGE: &'static str = "Failed to generate content";

    fn validate(&self, input: &PostRequest) -> Result<(), String> {
        require(&input.topic, "Please enter a topic")
    }

    fn payload(&self, input: &PostRequest) -> Payload {
        Payload::Json(json!(input))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ThreadRequest {
    pub topic: String,
    pub platform: Platform,
    pub num_tweets: u8,
}

impl Default for ThreadRequest {
    fn default() -> Self {
        Self {
            topic: String::new(),
            platform: Platform::default(),
            num_tweets: DEFAULT_THREAD_LENGTH,
        }
    }
}

pub struct GenerateThread;

impl Workflow for GenerateThread {
    type Input = ThreadRequest;
    type Output = SocialContent;

    const NAME: &'static str = "social.generate_thread";
    const ENDPOINT: &'static str = "/api/social/generate-thread";
    const SUCCESS_MESSAGE: &'static str = "Thread generated successfully!";
    const FAILURE_MESSAGE: &'static str = "Failed to generate thread";

    fn validate(&self, input: &ThreadRequest) -> Result<(), String> {
        require(&input.topic, "Please enter a topic")?;
        if input.num_tweets == 0 {
            return Err("A thread needs at least one post".to_string());
        }
        Ok(())
    }

    fn payload(&self, input: &ThreadRequest) -> Payload {
        Payload::Json(json!(input))
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct HashtagRequest {
    pub content: String,
    pub platform: Platform,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hashtags {
    #[serde(default, deserialize_with = "string_or_list")]
    pub hashtags: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub trending: Vec<String>,
}

pub struct SuggestHashtags;

impl Workflow for SuggestHashtags {
    type Input = HashtagRequest;
    type Output = Hashtags;

    const NAME: &'static str = "social.suggest_hashtags";
    const ENDPOINT: &'static str = "/api/social/suggest-hashtags";
    const SUCCESS_MESSAGE: &'static str = "Hashtags suggested!";
    const FAILURE_MESSAGE: &'static str = "Failed to suggest hashtags";

    fn validate(&self, input: &HashtagRequest) -> Result<(), String> {
        require(&input.content, "Please enter some content")
    }

    fn payload(&self, input: &HashtagRequest) -> Payload {
        Payload::Json(json!(input))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TimingRequest {
    pub platform: Platform,
    pub timezone: String,
}

impl Default for TimingRequest {
    fn default() -> Self {
        Self {
            platform: Platform::default(),
            timezone: "UTC".to_string(),
        }
    }
}

pub struct OptimizeTiming;

impl Workflow for OptimizeTiming {
    type Input = TimingRequest;
    type Output = PostingTimes;

    const NAME: &'static str = "social.optimize_timing";
    const ENDPOINT: &'static str = "/api/social/optimize-timing";
    const SUCCESS_MESSAGE: &'static str = "Posting times ready";
    const FAILURE_MESSAGE: &'static str = "Failed to fetch posting times";

    fn payload(&self, input: &TimingRequest) -> Payload {
        let timezone = match input.timezone.trim() {
            "" => "UTC",
            tz => tz,
        };
        Payload::Json(json!({ "platform": input.platform, "timezone": timezone }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_payload_carries_all_options() {
        let input = PostRequest {
            topic: "Rust at work".into(),
            platform: Platform::Twitter,
            tone: Tone::Casual,
            length: Length::Short,
        };
        assert_eq!(
            GeneratePost.payload(&input),
            Payload::Json(json!({
                "topic": "Rust at work",
                "platform": "twitter",
                "tone": "casual",
                "length": "short"
            }))
        );
    }

    #[test]
    fn test_thread_defaults_to_five_posts() {
        let input = ThreadRequest {
            topic: "Ownership".into(),
            ..Default::default()
        };
        let Payload::Json(body) = GenerateThread.payload(&input) else {
            panic!("expected json payload");
        };
        assert_eq!(body["num_tweets"], 5);
        assert_eq!(body["platform"], "linkedin");
    }

    #[test]
    fn test_empty_topic_is_invalid() {
        assert_eq!(
            GeneratePost.validate(&PostRequest::default()),
            Err("Please enter a topic".to_string())
        );
        assert!(GenerateThread.validate(&ThreadRequest::default()).is_err());
    }

    #[test]
    fn test_blank_timezone_defaults_to_utc() {
        let input = TimingRequest {
            platform: Platform::Twitter,
            timezone: " ".into(),
        };
        assert_eq!(
            OptimizeTiming.payload(&input),
            Payload::Json(json!({"platform": "twitter", "timezone": "UTC"}))
        );
    }

    #[test]
    fn test_content_with_schedule_best_time() {
        let content: SocialContent = serde_json::from_str(
            r##"{
                "post": "Shipping Rust",
                "hashtags": ["#rust"],
                "best_time": {
                    "platform": "linkedin",
                    "best_times": [{"day": "Tuesday", "time": "10:00-12:00"}]
                }
            }"##,
        )
        .unwrap();
        let Some(BestTime::Schedule(times)) = content.best_time else {
            panic!("expected schedule");
        };
        assert_eq!(times.best_times[0].day, "Tuesday");
        assert!(content.thread.is_empty());
    }

    #[test]
    fn test_time_slot_missing_time_still_decodes() {
        let times: PostingTimes =
            serde_json::from_str(r#"{"best_times": [{"day": "Monday"}], "timezone": null}"#)
                .unwrap();
        assert_eq!(times.best_times[0].day, "Monday");
        assert_eq!(times.best_times[0].time, "");
        assert_eq!(times.timezone, None);
    }

    #[test]
    fn test_malformed_best_time_reads_as_absent() {
        let content: SocialContent =
            serde_json::from_str(r#"{"post": "Hi", "best_time": 9, "thread": null}"#).unwrap();
        assert_eq!(content.post.as_deref(), Some("Hi"));
        assert_eq!(content.best_time, None);
        assert!(content.thread.is_empty());
    }

    #[test]
    fn test_content_with_text_best_time_and_hashtag_string() {
        let content: SocialContent = serde_json::from_str(
            r##"{"thread": ["1/", "2/"], "hashtags": "#rust, #systems", "best_time": "Tuesday morning"}"##,
        )
        .unwrap();
        assert_eq!(content.thread.len(), 2);
        assert_eq!(content.hashtags, vec!["#rust", "#systems"]);
        assert_eq!(content.best_time, Some(BestTime::Text("Tuesday morning".into())));
        assert_eq!(content.post, None);
    }
}
