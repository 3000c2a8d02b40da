//! Per-page sessions. Each page owns its controllers and page-local
//! selection state; sessions never share state with each other.

pub mod interview;
pub mod linkedin;
pub mod portfolio;
pub mod resume;
pub mod social;

pub use interview::InterviewSession;
pub use linkedin::LinkedInSession;
pub use portfolio::PortfolioSession;
pub use resume::ResumeSession;
pub use social::SocialSession;
