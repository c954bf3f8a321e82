//! Session acquisition for the storefront.
//!
//! Either replays a previously captured browser identity (user-agent
//! fingerprint plus serialized cookie jar) into a fresh browser instance, or
//! drives an interactive login, then persists the resulting identity for the
//! next run. The decision is made once per [`manager::AuthManager::exec`]
//! call; the live session is handed to the caller, who owns it thereafter.

pub mod config;
pub mod elements;
pub mod error;
pub mod login;
pub mod manager;
pub mod model;
pub mod repository;
pub mod util;

pub use config::{AuthConfig, Credentials};
pub use error::AuthError;
pub use manager::AuthManager;
pub use model::SessionCredential;
pub use repository::CredentialRepository;
