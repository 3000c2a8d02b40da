use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use client::pages::InterviewSession;
use client::transport::FileBlob;
use client::workflows::interview::{AnalyzeResponse, ResponseRequest};
use client::workflows::linkedin::AnalyzeProfile;
use client::workflows::portfolio::{AnalyzeGithub, GeneratePortfolio, UserData};
use client::workflows::resume::{
    AnalyzeResume, CoverLetterRequest, EnhanceRequest, EnhanceResume, GenerateCoverLetter,
    GenerateResume,
};
use client::workflows::social::{
    GeneratePost, GenerateThread, HashtagRequest, OptimizeTiming, PostRequest, SuggestHashtags,
    ThreadRequest, TimingRequest,
};
use client::workflows::{Difficulty, Length, Platform, Tone};
use client::{AppState, Config, Controller, Outcome, TracingNotifier, Workflow};

#[derive(Parser, Debug)]
#[command(version, about = "Personal-branding assistant client")]
struct Cli {
    /// Overrides API_URL from the environment.
    #[arg(long)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Upload a resume (pdf, doc, docx) for analysis.
    AnalyzeResume { path: PathBuf },
    GenerateResume { job_description: String },
    CoverLetter {
        job_description: String,
        /// File holding the resume text.
        resume: PathBuf,
    },
    Enhance {
        #[arg(long, default_value = "")]
        projects: String,
        #[arg(long, default_value = "")]
        work_experience: String,
        #[arg(long, value_delimiter = ',')]
        skills: Vec<String>,
    },
    /// Generate questions and sample answers for the first one.
    Interview {
        job_description: String,
        #[arg(long, value_enum, default_value_t)]
        difficulty: Difficulty,
    },
    AnalyzeResponse {
        question: String,
        response: String,
        #[arg(long, default_value = "")]
        job_context: String,
    },
    Github { username: String },
    Portfolio {
        name: String,
        title: String,
        #[arg(long, default_value = "")]
        about: String,
        #[arg(long, default_value = "")]
        skills: String,
        #[arg(long, default_value = "")]
        experience: String,
    },
    Post {
        topic: String,
        #[arg(long, value_enum, default_value_t)]
        platform: Platform,
        #[arg(long, value_enum, default_value_t)]
        tone: Tone,
        #[arg(long, value_enum, default_value_t)]
        length: Length,
    },
    Thread {
        topic: String,
        #[arg(long, value_enum, default_value_t)]
        platform: Platform,
        #[arg(long, default_value_t = 5)]
        num_tweets: u8,
    },
    Hashtags {
        content: String,
        #[arg(long, value_enum, default_value_t)]
        platform: Platform,
    },
    Timing {
        #[arg(long, value_enum, default_value_t)]
        platform: Platform,
        #[arg(long, default_value = "UTC")]
        timezone: String,
    },
    Linkedin { profile_url: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(api_url) = &cli.api_url {
        config = config.with_api_url(api_url);
    }

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},notice=info",
                env!("CARGO_PKG_NAME"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Backend: {}", config.api_url);

    let app = AppState::with_http(config, Arc::new(TracingNotifier))
        .context("Failed to build HTTP client")?;

    match cli.command {
        Command::AnalyzeResume { path } => {
            let file = FileBlob::from_path(&path).await?;
            run(AnalyzeResume, &Some(file), &app).await
        }
        Command::GenerateResume { job_description } => {
            run(GenerateResume, &job_description, &app).await
        }
        Command::CoverLetter {
            job_description,
            resume,
        } => {
            let resume = tokio::fs::read_to_string(&resume)
                .await
                .with_context(|| format!("Could not read {}", resume.display()))?;
            let request = CoverLetterRequest {
                job_description,
                resume,
            };
            run(GenerateCoverLetter, &request, &app).await
        }
        Command::Enhance {
            projects,
            work_experience,
            skills,
        } => {
            let request = EnhanceRequest {
                projects,
                work_experience,
                skills,
            };
            run(EnhanceResume, &request, &app).await
        }
        Command::Interview {
            job_description,
            difficulty,
        } => interview(&job_description, difficulty, &app).await,
        Command::AnalyzeResponse {
            question,
            response,
            job_context,
        } => {
            let request = ResponseRequest {
                response,
                question,
                job_context,
            };
            run(AnalyzeResponse, &request, &app).await
        }
        Command::Github { username } => run(AnalyzeGithub, &username, &app).await,
        Command::Portfolio {
            name,
            title,
            about,
            skills,
            experience,
        } => {
            let user = UserData {
                name,
                title,
                about,
                skills,
                experience,
            };
            run(GeneratePortfolio, &user, &app).await
        }
        Command::Post {
            topic,
            platform,
            tone,
            length,
        } => {
            let request = PostRequest {
                topic,
                platform,
                tone,
                length,
            };
            run(GeneratePost, &request, &app).await
        }
        Command::Thread {
            topic,
            platform,
            num_tweets,
        } => {
            let request = ThreadRequest {
                topic,
                platform,
                num_tweets,
            };
            run(GenerateThread, &request, &app).await
        }
        Command::Hashtags { content, platform } => {
            run(SuggestHashtags, &HashtagRequest { content, platform }, &app).await
        }
        Command::Timing { platform, timezone } => {
            run(OptimizeTiming, &TimingRequest { platform, timezone }, &app).await
        }
        Command::Linkedin { profile_url } => run(AnalyzeProfile, &profile_url, &app).await,
    }
}

/// Runs one workflow and prints its result as JSON on stdout.
async fn run<W>(workflow: W, input: &W::Input, app: &AppState) -> Result<()>
where
    W: Workflow,
    W::Output: Serialize,
{
    let controller = Controller::configure(workflow, app);
    let output = finish(controller.submit(input).await)?;
    print_json(&output)
}

async fn interview(job_description: &str, difficulty: Difficulty, app: &AppState) -> Result<()> {
    let mut session = InterviewSession::new(app);
    let questions = finish(session.generate_questions(job_description, difficulty).await)?;

    print_json(&serde_json::json!({
        "questions": questions.questions,
        "current_question": session.current_question(),
        "answers": session.answers.result(),
    }))
}

fn finish<T>(outcome: Outcome<T>) -> Result<T> {
    match outcome {
        Outcome::Succeeded(output) => Ok(output),
        Outcome::Failed(message) => bail!(message),
        Outcome::Rejected(rejection) => bail!("Request not sent: {rejection:?}"),
        Outcome::Discarded => bail!("Result was discarded"),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
