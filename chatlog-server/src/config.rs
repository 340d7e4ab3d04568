//! Database configuration read from the process environment

use std::fmt;
use std::time::Duration;

use sqlx::postgres::PgConnectOptions;

/// Default maximum connections for the pool.
/// Kept low for a single-instance service.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Default bounded wait for a free pool slot.
pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Default server-side statement timeout.
pub const DEFAULT_STATEMENT_TIMEOUT: Duration = Duration::from_secs(10);

pub const ENV_HOST: &str = "CHATLOG_DB_HOST";
pub const ENV_PORT: &str = "CHATLOG_DB_PORT";
pub const ENV_USER: &str = "CHATLOG_DB_USER";
pub const ENV_PASSWORD: &str = "CHATLOG_DB_PASSWORD";
pub const ENV_NAME: &str = "CHATLOG_DB_NAME";
pub const ENV_MAX_CONNECTIONS: &str = "CHATLOG_DB_MAX_CONNECTIONS";
pub const ENV_ACQUIRE_TIMEOUT: &str = "CHATLOG_DB_ACQUIRE_TIMEOUT_SECS";
pub const ENV_STATEMENT_TIMEOUT: &str = "CHATLOG_DB_STATEMENT_TIMEOUT_SECS";

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is not set")]
    Missing { var: &'static str },

    #[error("{var}={value:?} is invalid: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Connection settings for the Postgres pool.
#[derive(Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub statement_timeout: Duration,
}

// Manual impl so the password never reaches the logs.
impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .field("database", &self.database)
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout", &self.acquire_timeout)
            .field("statement_timeout", &self.statement_timeout)
            .finish()
    }
}

impl DatabaseConfig {
    /// Read configuration from `CHATLOG_DB_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when a required variable is unset and
    /// [`ConfigError::Invalid`] when a numeric variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |var: &'static str| -> Result<String, ConfigError> {
            lookup(var)
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing { var })
        };

        let port_raw = required(ENV_PORT)?;
        let port = parse_value(ENV_PORT, &port_raw)?;

        let max_connections = match lookup(ENV_MAX_CONNECTIONS) {
            Some(v) => parse_value(ENV_MAX_CONNECTIONS, &v)?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        if max_connections == 0 {
            return Err(ConfigError::Invalid {
                var: ENV_MAX_CONNECTIONS,
                value: "0".into(),
                reason: "must be at least 1".into(),
            });
        }

        let acquire_timeout = match lookup(ENV_ACQUIRE_TIMEOUT) {
            Some(v) => Duration::from_secs(parse_value(ENV_ACQUIRE_TIMEOUT, &v)?),
            None => DEFAULT_ACQUIRE_TIMEOUT,
        };
        let statement_timeout = match lookup(ENV_STATEMENT_TIMEOUT) {
            Some(v) => Duration::from_secs(parse_value(ENV_STATEMENT_TIMEOUT, &v)?),
            None => DEFAULT_STATEMENT_TIMEOUT,
        };

        Ok(Self {
            host: required(ENV_HOST)?,
            port,
            user: required(ENV_USER)?,
            password: lookup(ENV_PASSWORD).unwrap_or_default(),
            database: required(ENV_NAME)?,
            max_connections,
            acquire_timeout,
            statement_timeout,
        })
    }

    /// Connection options, including the per-connection statement timeout.
    pub fn connect_options(&self) -> PgConnectOptions {
        let statement_timeout_ms = self.statement_timeout.as_millis().to_string();
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
            .options([("statement_timeout", statement_timeout_ms.as_str())])
    }
}

fn parse_value<T>(var: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        var,
        value: raw.to_owned(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn base() -> HashMap<String, String> {
        env(&[
            (ENV_HOST, "db.internal"),
            (ENV_PORT, "5432"),
            (ENV_USER, "chatlog"),
            (ENV_PASSWORD, "secret"),
            (ENV_NAME, "chatlog"),
        ])
    }

    #[test]
    fn reads_required_values_and_defaults() {
        let vars = base();
        let config = DatabaseConfig::from_lookup(|k| vars.get(k).cloned()).unwrap();

        assert_eq!(config.host, "db.internal");
        assert_eq!(config.port, 5432);
        assert_eq!(config.database, "chatlog");
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(config.acquire_timeout, DEFAULT_ACQUIRE_TIMEOUT);
        assert_eq!(config.statement_timeout, DEFAULT_STATEMENT_TIMEOUT);
    }

    #[test]
    fn overrides_pool_tuning() {
        let mut vars = base();
        vars.insert(ENV_MAX_CONNECTIONS.into(), "12".into());
        vars.insert(ENV_ACQUIRE_TIMEOUT.into(), "2".into());
        vars.insert(ENV_STATEMENT_TIMEOUT.into(), "30".into());

        let config = DatabaseConfig::from_lookup(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(config.max_connections, 12);
        assert_eq!(config.acquire_timeout, Duration::from_secs(2));
        assert_eq!(config.statement_timeout, Duration::from_secs(30));
    }

    #[test]
    fn missing_host_is_reported() {
        let mut vars = base();
        vars.remove(ENV_HOST);

        let err = DatabaseConfig::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::Missing { var } if var == ENV_HOST));
    }

    #[test]
    fn empty_value_counts_as_missing() {
        let mut vars = base();
        vars.insert(ENV_NAME.into(), String::new());

        let err = DatabaseConfig::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::Missing { var } if var == ENV_NAME));
    }

    #[test]
    fn bad_port_is_invalid() {
        let mut vars = base();
        vars.insert(ENV_PORT.into(), "not-a-port".into());

        let err = DatabaseConfig::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var, .. } if var == ENV_PORT));
        assert!(err.to_string().contains("not-a-port"));
    }

    #[test]
    fn zero_connections_rejected() {
        let mut vars = base();
        vars.insert(ENV_MAX_CONNECTIONS.into(), "0".into());

        let err = DatabaseConfig::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var, .. } if var == ENV_MAX_CONNECTIONS));
    }

    #[test]
    fn debug_hides_password() {
        let vars = base();
        let config = DatabaseConfig::from_lookup(|k| vars.get(k).cloned()).unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("secret"));
    }
}
