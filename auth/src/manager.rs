use std::sync::Arc;

use tracing::Instrument;

use browser::{BrowserLauncher, BrowserSession, LaunchOptions};
use common::logger::{FlowId, flow_span, step_span};
use store::KeyedStore;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::login::LoginSequence;
use crate::repository::CredentialRepository;

/// Single-pass session acquisition.
///
/// `exec` makes the reuse-or-login decision once, persists the resulting
/// live identity exactly once, and hands the session to the caller, who
/// owns it (and its teardown) thereafter. There are no retries: a missing
/// element is a hard stop, and a failed write after a successful login only
/// costs the cache, not the session.
pub struct AuthManager<S: KeyedStore, L: BrowserLauncher> {
    repository: CredentialRepository<S>,
    launcher: L,
    config: AuthConfig,
}

impl<S: KeyedStore, L: BrowserLauncher> AuthManager<S, L> {
    pub fn new(store: Arc<S>, launcher: L, config: AuthConfig) -> Self {
        let repository =
            CredentialRepository::with_table(store, config.table_name.clone(), config.table_limit);

        Self {
            repository,
            launcher,
            config,
        }
    }

    pub async fn exec(&self) -> Result<L::Session, AuthError> {
        let flow_id = FlowId::default();
        let span = flow_span("session_acquisition", &flow_id);

        self.run().instrument(span).await
    }

    async fn run(&self) -> Result<L::Session, AuthError> {
        self.repository.ensure_schema().await?;

        let login_url = self.config.login_url();
        let credentials = self.config.credentials();

        // One account, one flow at a time; concurrent multi-account
        // acquisition is future work.
        let session = match self.repository.best_valid_credential().await? {
            Some(cred) => {
                tracing::info!(fingerprint = %cred.fingerprint, "reusing cached identity");

                let cookies = cred.cookies()?;
                let session = self
                    .launcher
                    .launch(LaunchOptions::with_user_agent(cred.fingerprint.as_str()))
                    .await?;

                LoginSequence::new(
                    &session,
                    login_url.as_str(),
                    credentials,
                    self.config.element_wait,
                )
                .exec(Some(&cookies))
                .instrument(step_span("cookie_replay"))
                .await?;

                session
            }
            None => {
                tracing::info!("no valid cached identity, performing interactive login");

                let session = self.launcher.launch(LaunchOptions::default()).await?;

                LoginSequence::new(
                    &session,
                    login_url.as_str(),
                    credentials,
                    self.config.element_wait,
                )
                .exec(None)
                .instrument(step_span("interactive_login"))
                .await?;

                session
            }
        };

        let fingerprint = session.current_user_agent().await?;
        let cookie_jar = serde_json::to_string(&session.current_cookies().await?)?;

        // Failing to cache is not fatal: the caller still gets the live
        // session, only the next run's reuse opportunity is lost.
        if let Err(e) = self.repository.save(&fingerprint, &cookie_jar).await {
            tracing::warn!(error = %e, "failed to persist session credential");
        }

        Ok(session)
    }
}
