use std::time::Duration;

/// Externally supplied account secrets.
#[derive(Clone, Debug)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// Database connection string. `DEBUG=1` switches the default to the
    /// test database location; `DATABASE_URL` overrides both.
    pub database_url: String,

    /// Account login, absent unless supplied via environment. Absence is
    /// only fatal when the fresh-login path actually reaches the form.
    pub login: Option<String>,
    pub password: Option<String>,

    /// Storefront base URL.
    pub base_url: String,

    /// Credential table name.
    pub table_name: String,

    /// Row-fetch window for credential lookups. A credential past this many
    /// rows is invisible to the repository.
    pub table_limit: u32,

    /// Bound on every element lookup.
    pub element_wait: Duration,

    pub debug: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://trade_bot.db?mode=rwc".to_string(),
            login: None,
            password: None,
            base_url: "https://store.steampowered.com".to_string(),
            table_name: "auth".to_string(),
            table_limit: store::DEFAULT_LIMIT,
            element_wait: Duration::from_secs(10),
            debug: false,
        }
    }
}

impl AuthConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let debug = std::env::var("DEBUG")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let database_url = std::env::var("DATABASE_URL").unwrap_or_else(|_| {
            if debug {
                "sqlite://tests/test_bot.db?mode=rwc".to_string()
            } else {
                defaults.database_url.clone()
            }
        });

        Self {
            database_url,
            login: std::env::var("STEAM_LOGIN").ok(),
            password: std::env::var("STEAM_PASSWORD").ok(),
            base_url: std::env::var("STEAM_MAIN").unwrap_or_else(|_| defaults.base_url.clone()),
            debug,
            ..defaults
        }
    }

    /// Login page of the storefront.
    pub fn login_url(&self) -> String {
        format!("{}/login/home", self.base_url)
    }

    /// Both secrets, or `None` when either is missing.
    pub fn credentials(&self) -> Option<Credentials> {
        match (&self.login, &self.password) {
            (Some(login), Some(password)) => Some(Credentials {
                login: login.clone(),
                password: password.clone(),
            }),
            _ => None,
        }
    }
}
