use thiserror::Error;

use browser::BrowserError;
use store::StoreError;

#[derive(Error, Debug)]
pub enum AuthError {
    /// The fresh-login path reached the credential form without externally
    /// supplied login/password. Raised before any field is touched.
    #[error("login and password must be provided")]
    MissingCredentials,

    #[error(transparent)]
    Browser(#[from] BrowserError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// A cookie jar failed to (de)serialize.
    #[error("invalid cookie jar: {0}")]
    CookieJar(#[from] serde_json::Error),
}
