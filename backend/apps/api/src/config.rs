//! Server configuration from environment variables
//!
//! | Variable | Default |
//! |---|---|
//! | `APP_PORT` | `8080` (`:8080` also accepted) |
//! | `DATABASE_URL` | built from the `DB_*` variables |
//! | `DB_USER`, `DB_PASSWORD`, `DB_NAME` | none |
//! | `DB_HOST` / `DB_PORT` | `localhost` / `5432` |
//! | `DB_CHARSET` | `UTF8` |
//! | `JWT_ACCESS_SECRET`, `JWT_REFRESH_SECRET` | random in debug builds |
//! | `JWT_ACCESS_TTL` / `JWT_REFRESH_TTL` | `30m` / `72h` |
//! | `COOKIE_SECURE` | `false` |
//! | `FRONTEND_ORIGINS` | `http://localhost:3000` |
//! | `RBAC_POLICY_PATH` | `config/rbac_policy.csv` |
//! | `PASSWORD_PEPPER` | none |

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use platform::duration::parse_duration;
use platform::password::Argon2Hasher;
use sqlx::postgres::PgConnectOptions;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_ORIGIN: &str = "http://localhost:3000";
const DEFAULT_POLICY_PATH: &str = "config/rbac_policy.csv";

#[derive(Clone)]
pub struct DatabaseConfig {
    /// Takes precedence over the individual fields
    pub url: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub host: String,
    pub port: u16,
    pub name: Option<String>,
    pub charset: String,
}

impl DatabaseConfig {
    pub fn connect_options(&self) -> anyhow::Result<PgConnectOptions> {
        let options = match &self.url {
            Some(url) => url
                .parse::<PgConnectOptions>()
                .context("DATABASE_URL is not a valid Postgres URL")?,
            None => {
                let mut options = PgConnectOptions::new().host(&self.host).port(self.port);
                if let Some(user) = &self.user {
                    options = options.username(user);
                }
                if let Some(password) = &self.password {
                    options = options.password(password);
                }
                if let Some(name) = &self.name {
                    options = options.database(name);
                }
                options
            }
        };

        Ok(options.options([("client_encoding", self.charset.as_str())]))
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub port: u16,
    pub database: DatabaseConfig,
    pub access_secret: String,
    pub refresh_secret: String,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
    pub cookie_secure: bool,
    pub frontend_origins: Vec<String>,
    pub rbac_policy_path: PathBuf,
    /// Appended to every password before hashing; changing it invalidates
    /// all stored hashes
    pub password_pepper: Option<String>,
}

impl AppConfig {
    /// Read the process environment; secrets are mandatory in release builds
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok(), !cfg!(debug_assertions))
    }

    /// Build from an arbitrary variable source
    ///
    /// With `require_secrets` unset, missing JWT secrets are replaced by
    /// random ones, which invalidates every token on restart.
    pub fn from_lookup<F>(lookup: F, require_secrets: bool) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match var("APP_PORT") {
            Some(raw) => parse_port(&raw).with_context(|| format!("APP_PORT={raw:?}"))?,
            None => DEFAULT_PORT,
        };

        let database = DatabaseConfig {
            url: var("DATABASE_URL"),
            user: var("DB_USER"),
            password: var("DB_PASSWORD"),
            host: var("DB_HOST").unwrap_or_else(|| "localhost".to_string()),
            port: match var("DB_PORT") {
                Some(raw) => raw
                    .parse()
                    .with_context(|| format!("DB_PORT={raw:?} is not a port"))?,
                None => 5432,
            },
            name: var("DB_NAME"),
            charset: var("DB_CHARSET").unwrap_or_else(|| "UTF8".to_string()),
        };
        if database.url.is_none() && database.name.is_none() {
            bail!("either DATABASE_URL or DB_NAME must be set");
        }

        let defaults = AuthConfig::with_random_secrets();
        let (access_secret, refresh_secret) =
            match (var("JWT_ACCESS_SECRET"), var("JWT_REFRESH_SECRET")) {
                (Some(access), Some(refresh)) => (access, refresh),
                _ if require_secrets => {
                    bail!("JWT_ACCESS_SECRET and JWT_REFRESH_SECRET must be set")
                }
                (access, refresh) => (
                    access.unwrap_or(defaults.access_secret),
                    refresh.unwrap_or(defaults.refresh_secret),
                ),
            };
        if access_secret == refresh_secret {
            bail!("JWT_ACCESS_SECRET and JWT_REFRESH_SECRET must differ");
        }

        let ttl = |key: &str, default: Duration| -> anyhow::Result<Duration> {
            match var(key) {
                Some(raw) => parse_duration(&raw).with_context(|| format!("invalid {key}")),
                None => Ok(default),
            }
        };
        let access_ttl = ttl("JWT_ACCESS_TTL", defaults.access_ttl)?;
        let refresh_ttl = ttl("JWT_REFRESH_TTL", defaults.refresh_ttl)?;
        if access_ttl.is_zero() || refresh_ttl.is_zero() {
            bail!("token lifetimes must be positive");
        }

        let cookie_secure = match var("COOKIE_SECURE") {
            Some(raw) => parse_bool(&raw).with_context(|| format!("COOKIE_SECURE={raw:?}"))?,
            None => false,
        };

        let frontend_origins = var("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_ORIGIN.to_string())
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();

        let rbac_policy_path = var("RBAC_POLICY_PATH")
            .unwrap_or_else(|| DEFAULT_POLICY_PATH.to_string())
            .into();

        let password_pepper = var("PASSWORD_PEPPER");

        Ok(Self {
            port,
            database,
            access_secret,
            refresh_secret,
            access_ttl,
            refresh_ttl,
            cookie_secure,
            frontend_origins,
            rbac_policy_path,
            password_pepper,
        })
    }

    pub fn password_hasher(&self) -> Argon2Hasher {
        match &self.password_pepper {
            Some(pepper) => Argon2Hasher::with_pepper(pepper.as_bytes()),
            None => Argon2Hasher::new(),
        }
    }

    pub fn auth_config(&self) -> AuthConfig {
        AuthConfig {
            access_secret: self.access_secret.clone(),
            refresh_secret: self.refresh_secret.clone(),
            access_ttl: self.access_ttl,
            refresh_ttl: self.refresh_ttl,
            cookie_secure: self.cookie_secure,
            ..AuthConfig::default()
        }
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field("database_url_set", &self.database.url.is_some())
            .field("db_host", &self.database.host)
            .field("db_port", &self.database.port)
            .field("db_name", &self.database.name)
            .field("access_secret", &"[REDACTED]")
            .field("refresh_secret", &"[REDACTED]")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .field("cookie_secure", &self.cookie_secure)
            .field("frontend_origins", &self.frontend_origins)
            .field("rbac_policy_path", &self.rbac_policy_path)
            .field("password_pepper_set", &self.password_pepper.is_some())
            .finish()
    }
}

fn parse_port(raw: &str) -> anyhow::Result<u16> {
    let port: u16 = raw.strip_prefix(':').unwrap_or(raw).parse()?;
    if port == 0 {
        bail!("port must be non-zero");
    }
    Ok(port)
}

fn parse_bool(raw: &str) -> anyhow::Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => bail!("expected true or false"),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    const MINIMAL: &[(&str, &str)] = &[("DB_NAME", "shop")];

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(MINIMAL), false).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.database.host, "localhost");
        assert_eq!(config.database.port, 5432);
        assert_eq!(config.database.charset, "UTF8");
        assert_eq!(config.access_ttl, Duration::from_secs(30 * 60));
        assert_eq!(config.refresh_ttl, Duration::from_secs(72 * 3600));
        assert!(!config.cookie_secure);
        assert_eq!(config.frontend_origins, vec!["http://localhost:3000"]);
        assert_eq!(config.rbac_policy_path, PathBuf::from("config/rbac_policy.csv"));
        // Generated secrets are distinct
        assert_ne!(config.access_secret, config.refresh_secret);
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(
            lookup(&[
                ("APP_PORT", ":9090"),
                ("DATABASE_URL", "postgres://u:p@db:5433/shop"),
                ("JWT_ACCESS_SECRET", "access"),
                ("JWT_REFRESH_SECRET", "refresh"),
                ("JWT_ACCESS_TTL", "15m"),
                ("JWT_REFRESH_TTL", "1h30m"),
                ("COOKIE_SECURE", "true"),
                ("FRONTEND_ORIGINS", "https://a.example, https://b.example,"),
            ]),
            true,
        )
        .unwrap();

        assert_eq!(config.port, 9090);
        assert_eq!(config.access_ttl, Duration::from_secs(15 * 60));
        assert_eq!(config.refresh_ttl, Duration::from_secs(90 * 60));
        assert!(config.cookie_secure);
        assert_eq!(
            config.frontend_origins,
            vec!["https://a.example", "https://b.example"]
        );
        assert!(config.database.connect_options().is_ok());

        let auth = config.auth_config();
        assert_eq!(auth.access_secret, "access");
        assert_eq!(auth.refresh_secret, "refresh");
        assert!(auth.cookie_secure);
    }

    #[test]
    fn test_secrets_required_in_release() {
        assert!(AppConfig::from_lookup(lookup(MINIMAL), true).is_err());

        let one_missing = lookup(&[("DB_NAME", "shop"), ("JWT_ACCESS_SECRET", "access")]);
        assert!(AppConfig::from_lookup(one_missing, true).is_err());
    }

    #[test]
    fn test_identical_secrets_rejected() {
        let same = lookup(&[
            ("DB_NAME", "shop"),
            ("JWT_ACCESS_SECRET", "same"),
            ("JWT_REFRESH_SECRET", "same"),
        ]);
        assert!(AppConfig::from_lookup(same, false).is_err());
    }

    #[test]
    fn test_invalid_values() {
        for (key, value) in [
            ("APP_PORT", "http"),
            ("APP_PORT", "0"),
            ("DB_PORT", "x"),
            ("JWT_ACCESS_TTL", "30"),
            ("JWT_REFRESH_TTL", "0s"),
            ("COOKIE_SECURE", "maybe"),
        ] {
            let vars = lookup(&[("DB_NAME", "shop"), (key, value)]);
            assert!(
                AppConfig::from_lookup(vars, false).is_err(),
                "{key}={value} should be rejected"
            );
        }
    }

    #[test]
    fn test_database_location_required() {
        assert!(AppConfig::from_lookup(lookup(&[]), false).is_err());
    }

    #[test]
    fn test_password_pepper() {
        use platform::password::{ClearTextPassword, CredentialHasher};

        let plain = AppConfig::from_lookup(lookup(MINIMAL), false).unwrap();
        assert!(plain.password_pepper.is_none());

        let peppered = AppConfig::from_lookup(
            lookup(&[("DB_NAME", "shop"), ("PASSWORD_PEPPER", " pepper ")]),
            false,
        )
        .unwrap();
        assert_eq!(peppered.password_pepper.as_deref(), Some("pepper"));

        let password = ClearTextPassword::new("secret123".to_string()).unwrap();
        let hashed = peppered.password_hasher().hash(&password).unwrap();
        assert!(peppered.password_hasher().verify(&password, &hashed));
        assert!(!plain.password_hasher().verify(&password, &hashed));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = AppConfig::from_lookup(
            lookup(&[
                ("DB_NAME", "shop"),
                ("JWT_ACCESS_SECRET", "hunter2-access"),
                ("JWT_REFRESH_SECRET", "hunter2-refresh"),
                ("PASSWORD_PEPPER", "hunter2-pepper"),
            ]),
            false,
        )
        .unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("[REDACTED]"));
    }
}
