use crate::error::BrowserError;
use crate::session::BrowserSession;

/// Driver arguments applied when the caller supplies none.
pub const DEFAULT_ARGS: &[&str] = &["--window-size=1200x600"];

/// How to configure a session at launch.
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    /// Override the instance identity. `None` leaves the driver's own
    /// user-agent in place.
    pub user_agent: Option<String>,
    /// Extra driver arguments.
    pub args: Vec<String>,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            user_agent: None,
            args: DEFAULT_ARGS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl LaunchOptions {
    pub fn with_user_agent(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: Some(user_agent.into()),
            ..Self::default()
        }
    }
}

/// Factory for live sessions. A launcher with no usable driver binary fails
/// with [`BrowserError::MissingDriver`] before any page interaction.
#[async_trait::async_trait]
pub trait BrowserLauncher: Send + Sync {
    type Session: BrowserSession;

    async fn launch(&self, options: LaunchOptions) -> Result<Self::Session, BrowserError>;
}
