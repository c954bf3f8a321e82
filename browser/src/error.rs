use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BrowserError {
    /// No usable driver behind the launcher. Raised before any page
    /// interaction begins.
    #[error("browser driver not found: {0}")]
    MissingDriver(String),

    /// An element lookup exhausted its wait bound. Fatal everywhere except
    /// the one call site that deliberately tolerates it (the post-injection
    /// session check).
    #[error("element {selector} not found within {wait:?}")]
    ElementNotFound { selector: String, wait: Duration },

    /// Any other driver-side failure (navigation, cookie plumbing, input).
    #[error("driver failure: {0}")]
    Driver(String),
}
