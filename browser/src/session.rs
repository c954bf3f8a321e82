use std::time::Duration;

use crate::cookie::Cookie;
use crate::error::BrowserError;
use crate::selector::Selector;

/// Opaque handle to a located page element, meaningful only to the session
/// that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementHandle(u64);

impl ElementHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// One live browser instance.
///
/// `locate` blocks the flow up to `wait` before failing with
/// [`BrowserError::ElementNotFound`]; there is no cancellation, so a lookup
/// ends by success or by timeout. Ownership of the session transfers to
/// whoever holds the value; teardown is the owner's concern.
#[async_trait::async_trait]
pub trait BrowserSession: Send + Sync {
    async fn navigate(&self, url: &str) -> Result<(), BrowserError>;

    /// The identity string this instance reports (its user-agent).
    async fn current_user_agent(&self) -> Result<String, BrowserError>;

    async fn current_cookies(&self) -> Result<Vec<Cookie>, BrowserError>;

    async fn inject_cookies(&self, cookies: &[Cookie]) -> Result<(), BrowserError>;

    async fn clear_cookies(&self) -> Result<(), BrowserError>;

    async fn locate(
        &self,
        selector: &Selector,
        wait: Duration,
    ) -> Result<ElementHandle, BrowserError>;

    async fn fill(&self, element: &ElementHandle, text: &str) -> Result<(), BrowserError>;

    async fn click(&self, element: &ElementHandle) -> Result<(), BrowserError>;
}
