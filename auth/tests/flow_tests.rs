use std::sync::Arc;

use sqlx::SqlitePool;

use auth::repository::CredentialRepository;
use auth::{AuthConfig, AuthError, AuthManager, elements};
use browser::{BrowserError, BrowserSession, Cookie};
use store::sqlite::SqliteStore;
use store::{KeyedStore, Value};


use mock_browser::{DEFAULT_USER_AGENT, MockLauncher};
use mock_store::PoisonedUpsertStore;

///
/// End-to-end suite for the acquisition flow, over a real SQLite store and a
/// scripted browser.
///
/// Covers both decision branches, the replay fallthrough, the precondition
/// and driver failures, and the non-fatal persistence failure.
///
fn config_with_credentials() -> AuthConfig {
    AuthConfig {
        login: Some("user".into()),
        password: Some("hunter2".into()),
        ..AuthConfig::default()
    }
}

/// Login page as the anonymous visitor sees it: just the credential form.
fn fresh_login_page() -> MockLauncher {
    MockLauncher::new(&[
        &elements::LOGIN_FIELD,
        &elements::PASSWORD_FIELD,
        &elements::AUTH_BUTTON,
    ])
}

/// Page that recognizes the injected session: the sign-in control resolves
/// and the credential form never appears.
fn confirmed_session_page() -> MockLauncher {
    MockLauncher::new(&[&elements::GLOBAL_LOGIN_BUTTON])
}

/// Page that rejects the injected session: the credential form is still
/// there after the sign-in control is clicked.
fn rejected_session_page() -> MockLauncher {
    MockLauncher::new(&[
        &elements::GLOBAL_LOGIN_BUTTON,
        &elements::AUTH_BUTTON,
        &elements::LOGIN_FIELD,
        &elements::PASSWORD_FIELD,
    ])
}

/// Canonical serialization, so an untouched replay round-trips verbatim.
fn cached_jar() -> String {
    serde_json::to_string(&vec![Cookie {
        name: "sessionid".into(),
        value: "cached".into(),
        domain: ".steam.com".into(),
        path: "/".into(),
        ..Default::default()
    }])
    .unwrap()
}

async fn seed_credential(
    db: &Arc<SqliteStore>,
    fingerprint: &str,
    cookie_jar: &str,
) -> anyhow::Result<()> {
    CredentialRepository::new(db.clone()).ensure_schema().await?;

    db.insert(
        "auth",
        &[
            ("created_at", Value::from("2023-01-01 00:00:00")),
            ("updated_at", Value::from("2023-01-01 00:00:00")),
            ("fingerprint", Value::from(fingerprint)),
            ("cookie_jar", Value::from(cookie_jar)),
        ],
    )
    .await?;
    Ok(())
}

#[sqlx::test]
async fn fresh_login_persists_the_live_identity(pool: SqlitePool) -> anyhow::Result<()> {
    common::logger::init_logger("auth-tests");

    let db = Arc::new(SqliteStore::from_pool(pool));
    let launcher = fresh_login_page();
    let recorder = launcher.recorder.clone();

    let manager = AuthManager::new(db.clone(), launcher, config_with_credentials());
    let session = manager.exec().await?;

    // Fresh path: driver's own identity, credential form driven.
    assert_eq!(session.current_user_agent().await?, DEFAULT_USER_AGENT);
    {
        let filled = recorder.filled.lock().await;
        assert_eq!(filled.len(), 2);
        assert_eq!(
            filled[0],
            (elements::LOGIN_FIELD.query().to_string(), "user".to_string())
        );
        assert_eq!(filled[1].1, "hunter2");
    }
    assert_eq!(
        *recorder.clicked.lock().await,
        vec![elements::AUTH_BUTTON.query().to_string()]
    );

    // Exactly one row: the live fingerprint with a non-empty jar.
    let rows = db.select("auth", None, 50).await?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][3].as_text(), Some(DEFAULT_USER_AGENT));
    let jar = rows[0][4].as_text().unwrap();
    assert!(jar.contains("sessionid"));
    assert_ne!(jar, "[]");

    Ok(())
}

#[sqlx::test]
async fn cached_identity_is_replayed(pool: SqlitePool) -> anyhow::Result<()> {
    let db = Arc::new(SqliteStore::from_pool(pool));
    let jar = cached_jar();
    seed_credential(&db, "UA-1", &jar).await?;

    let launcher = confirmed_session_page();
    let recorder = launcher.recorder.clone();

    // No secrets supplied: the replay path must not need them.
    let manager = AuthManager::new(db.clone(), launcher, AuthConfig::default());
    let session = manager.exec().await?;

    assert_eq!(session.current_user_agent().await?, "UA-1");

    // Pinned launch, cleared jar, cached cookies injected, form untouched.
    assert_eq!(
        recorder.launches.lock().await[0].user_agent.as_deref(),
        Some("UA-1")
    );
    assert_eq!(*recorder.clears.lock().await, 1);
    assert_eq!(recorder.injected.lock().await.len(), 1);
    assert!(recorder.filled.lock().await.is_empty());

    // Same row: jar and created_at untouched, updated_at advanced.
    let rows = db.select("auth", None, 50).await?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][1].as_text(), Some("2023-01-01 00:00:00"));
    assert_ne!(rows[0][2].as_text(), Some("2023-01-01 00:00:00"));
    assert_eq!(rows[0][3].as_text(), Some("UA-1"));
    assert_eq!(rows[0][4].as_text(), Some(jar.as_str()));

    Ok(())
}

#[sqlx::test]
async fn empty_jar_is_not_worth_replaying(pool: SqlitePool) -> anyhow::Result<()> {
    let db = Arc::new(SqliteStore::from_pool(pool));
    seed_credential(&db, "UA-1", "[]").await?;

    let launcher = fresh_login_page();
    let recorder = launcher.recorder.clone();

    let manager = AuthManager::new(db.clone(), launcher, config_with_credentials());
    manager.exec().await?;

    // Matching fingerprint or not, an empty jar forces the fresh path.
    assert!(recorder.launches.lock().await[0].user_agent.is_none());
    assert_eq!(recorder.filled.lock().await.len(), 2);

    // The live identity lands alongside the invalid row.
    let rows = db.select("auth", None, 50).await?;
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1][3].as_text(), Some(DEFAULT_USER_AGENT));

    Ok(())
}

#[sqlx::test]
async fn rejected_replay_falls_through_to_credentials(pool: SqlitePool) -> anyhow::Result<()> {
    let db = Arc::new(SqliteStore::from_pool(pool));
    seed_credential(&db, "UA-1", &cached_jar()).await?;

    let launcher = rejected_session_page();
    let recorder = launcher.recorder.clone();

    let manager = AuthManager::new(db.clone(), launcher, config_with_credentials());
    let session = manager.exec().await?;

    // Injection happened, then the form was driven on the primed session.
    assert_eq!(recorder.injected.lock().await.len(), 1);
    assert_eq!(recorder.filled.lock().await.len(), 2);
    assert_eq!(
        *recorder.clicked.lock().await,
        vec![
            elements::GLOBAL_LOGIN_BUTTON.query().to_string(),
            elements::AUTH_BUTTON.query().to_string(),
        ]
    );

    // Live jar holds the cached cookie plus the freshly granted one.
    let cookies = session.current_cookies().await?;
    assert_eq!(cookies.len(), 2);

    Ok(())
}

#[sqlx::test]
async fn missing_credentials_abort_before_any_fill(pool: SqlitePool) -> anyhow::Result<()> {
    let db = Arc::new(SqliteStore::from_pool(pool));
    let launcher = fresh_login_page();
    let recorder = launcher.recorder.clone();

    // No secrets, nothing cached: the form is unreachable.
    let manager = AuthManager::new(db.clone(), launcher, AuthConfig::default());
    let err = manager.exec().await.unwrap_err();

    assert!(matches!(err, AuthError::MissingCredentials));
    assert!(recorder.filled.lock().await.is_empty());
    assert!(db.select("auth", None, 50).await?.is_empty());

    Ok(())
}

#[sqlx::test]
async fn missing_driver_is_fatal(pool: SqlitePool) -> anyhow::Result<()> {
    let db = Arc::new(SqliteStore::from_pool(pool));
    let launcher = MockLauncher::without_driver();

    let manager = AuthManager::new(db.clone(), launcher, config_with_credentials());
    let err = manager.exec().await.unwrap_err();

    assert!(matches!(
        err,
        AuthError::Browser(BrowserError::MissingDriver(_))
    ));

    Ok(())
}

#[sqlx::test]
async fn missing_form_field_is_a_hard_stop(pool: SqlitePool) -> anyhow::Result<()> {
    let db = Arc::new(SqliteStore::from_pool(pool));

    // A page with a submit control but no inputs: the first fill times out.
    let launcher = MockLauncher::new(&[&elements::AUTH_BUTTON]);

    let manager = AuthManager::new(db.clone(), launcher, config_with_credentials());
    let err = manager.exec().await.unwrap_err();

    assert!(matches!(
        err,
        AuthError::Browser(BrowserError::ElementNotFound { .. })
    ));
    assert!(db.select("auth", None, 50).await?.is_empty());

    Ok(())
}

#[sqlx::test]
async fn persistence_failure_still_returns_the_session(pool: SqlitePool) -> anyhow::Result<()> {
    let db = Arc::new(PoisonedUpsertStore {
        inner: SqliteStore::from_pool(pool),
    });
    let launcher = fresh_login_page();

    let manager = AuthManager::new(db.clone(), launcher, config_with_credentials());
    let session = manager.exec().await?;

    // The login succeeded and the caller owns the session; only the cache
    // write was lost.
    assert_eq!(session.current_user_agent().await?, DEFAULT_USER_AGENT);
    assert!(db.inner.select("auth", None, 50).await?.is_empty());

    Ok(())
}
