use std::ops::RangeInclusive;
use std::time::Duration;

use shared::Role;
use thiserror::Error;

use crate::auth::JwtConfig;
use crate::auth::jwt::generate_secure_printable_jwt_secret;

/// Minimum signing secret length outside development
const MIN_SECRET_LEN: usize = 32;

/// One year
const MAX_LIFETIME_MINUTES: u64 = 525_600;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be set in {environment} environment")]
    MissingSecret { name: String, environment: String },

    #[error("{name} must be at least {min} characters")]
    WeakSecret { name: String, min: usize },

    #[error("invalid value for {name}: {value}")]
    Invalid { name: String, value: String },

    #[error("failed to generate development secret: {0}")]
    SecretGeneration(String),
}

/// Server configuration, loaded once at startup and never mutated
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | HTTP_PORT | 3000 | HTTP listen port |
/// | DATABASE_URL | sqlite:buffet.db | SQLite database |
/// | ENVIRONMENT | development | development / staging / production |
/// | JWT_SECRET | random in development | HS256 signing secret |
/// | JWT_EXPIRATION_MINUTES | 1440 | staff token lifetime, 1..=525600 |
/// | JWT_ISSUER | buffet-pos | token issuer |
/// | JWT_AUDIENCE | buffet-staff | token audience |
/// | MANAGE_ROLES | employee,manager | roles admitted to /manage |
/// | ACCESS_CODE_TTL_MINUTES | 720 | access code lifetime, 0 disables, at most 525600 |
/// | REQUEST_TIMEOUT_MS | 30000 | per-request timeout |
/// | DB_ACQUIRE_TIMEOUT_MS | 5000 | pool acquire timeout |
/// | LOG_LEVEL | info | tracing level |
/// | LOG_DIR | - | daily rolling log directory |
#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    pub database_url: String,
    /// development | staging | production
    pub environment: String,
    pub jwt: JwtConfig,
    /// No JWT_SECRET was given and a random development key is in use
    pub jwt_secret_generated: bool,
    pub manage_roles: Vec<Role>,
    pub access_code_ttl_minutes: u64,
    pub request_timeout_ms: u64,
    pub db_acquire_timeout_ms: u64,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let environment = var("ENVIRONMENT").unwrap_or_else(|| "development".into());

        let jwt_secret_generated = var("JWT_SECRET").is_none();
        let expiration_minutes: u64 = parse_in_range(
            "JWT_EXPIRATION_MINUTES",
            var("JWT_EXPIRATION_MINUTES"),
            1440,
            1..=MAX_LIFETIME_MINUTES,
        )?;
        let jwt = JwtConfig {
            secret: require_secret("JWT_SECRET", var("JWT_SECRET"), &environment)?,
            expiration_minutes: expiration_minutes as i64,
            issuer: var("JWT_ISSUER").unwrap_or_else(|| "buffet-pos".into()),
            audience: var("JWT_AUDIENCE").unwrap_or_else(|| "buffet-staff".into()),
        };

        let manage_roles = match var("MANAGE_ROLES") {
            Some(raw) => parse_roles(&raw)?,
            None => vec![Role::Employee, Role::Manager],
        };

        Ok(Self {
            http_port: parse_or("HTTP_PORT", var("HTTP_PORT"), 3000)?,
            database_url: var("DATABASE_URL").unwrap_or_else(|| "sqlite:buffet.db".into()),
            environment,
            jwt,
            jwt_secret_generated,
            manage_roles,
            access_code_ttl_minutes: parse_in_range(
                "ACCESS_CODE_TTL_MINUTES",
                var("ACCESS_CODE_TTL_MINUTES"),
                720,
                0..=MAX_LIFETIME_MINUTES,
            )?,
            request_timeout_ms: parse_or("REQUEST_TIMEOUT_MS", var("REQUEST_TIMEOUT_MS"), 30_000)?,
            db_acquire_timeout_ms: parse_or("DB_ACQUIRE_TIMEOUT_MS", var("DB_ACQUIRE_TIMEOUT_MS"), 5_000)?,
            log_level: var("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_dir: var("LOG_DIR"),
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// `None` when access codes never expire
    pub fn access_code_ttl(&self) -> Option<Duration> {
        self.access_code_ttl_minutes
            .checked_mul(60)
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn db_acquire_timeout(&self) -> Duration {
        Duration::from_millis(self.db_acquire_timeout_ms)
    }
}

/// Secret must be set outside development; development falls back to a random key
fn require_secret(name: &str, value: Option<String>, environment: &str) -> Result<String, ConfigError> {
    match value {
        Some(secret) if secret.len() >= MIN_SECRET_LEN => Ok(secret),
        Some(_) => Err(ConfigError::WeakSecret {
            name: name.to_string(),
            min: MIN_SECRET_LEN,
        }),
        None if environment == "development" => {
            generate_secure_printable_jwt_secret()
                .map_err(|e| ConfigError::SecretGeneration(e.to_string()))
        }
        None => Err(ConfigError::MissingSecret {
            name: name.to_string(),
            environment: environment.to_string(),
        }),
    }
}

fn parse_or<T: std::str::FromStr>(name: &str, value: Option<String>, default: T) -> Result<T, ConfigError> {
    match value {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            name: name.to_string(),
            value: raw,
        }),
        None => Ok(default),
    }
}

fn parse_in_range(
    name: &str,
    value: Option<String>,
    default: u64,
    range: RangeInclusive<u64>,
) -> Result<u64, ConfigError> {
    let parsed = parse_or(name, value, default)?;
    if range.contains(&parsed) {
        Ok(parsed)
    } else {
        Err(ConfigError::Invalid {
            name: name.to_string(),
            value: format!("{parsed} (expected {}..={})", range.start(), range.end()),
        })
    }
}

fn parse_roles(raw: &str) -> Result<Vec<Role>, ConfigError> {
    let roles = raw
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.parse::<Role>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ConfigError::Invalid {
            name: "MANAGE_ROLES".to_string(),
            value: e.0,
        })?;

    if roles.is_empty() {
        return Err(ConfigError::Invalid {
            name: "MANAGE_ROLES".to_string(),
            value: raw.to_string(),
        });
    }
    Ok(roles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.http_port, 3000);
        assert_eq!(config.database_url, "sqlite:buffet.db");
        assert!(config.is_development());
        assert_eq!(config.jwt.expiration_minutes, 1440);
        assert_eq!(config.jwt.secret.len(), 64);
        assert!(config.jwt_secret_generated);
        assert_eq!(config.manage_roles, vec![Role::Employee, Role::Manager]);
        assert_eq!(config.access_code_ttl(), Some(Duration::from_secs(720 * 60)));
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn test_production_requires_secret() {
        let err = load(&[("ENVIRONMENT", "production")]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingSecret { .. }));

        let err = load(&[("ENVIRONMENT", "production"), ("JWT_SECRET", "short")]).unwrap_err();
        assert!(matches!(err, ConfigError::WeakSecret { .. }));

        let config = load(&[
            ("ENVIRONMENT", "production"),
            ("JWT_SECRET", "0123456789abcdef0123456789abcdef"),
        ])
        .unwrap();
        assert_eq!(config.environment, "production");
        assert!(!config.jwt_secret_generated);
    }

    #[test]
    fn test_manage_roles() {
        let config = load(&[("MANAGE_ROLES", "Manager")]).unwrap();
        assert_eq!(config.manage_roles, vec![Role::Manager]);

        let err = load(&[("MANAGE_ROLES", "manager,guest")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));

        let err = load(&[("MANAGE_ROLES", " , ")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_ttl_zero_disables() {
        let config = load(&[("ACCESS_CODE_TTL_MINUTES", "0")]).unwrap();
        assert_eq!(config.access_code_ttl(), None);
    }

    #[test]
    fn test_jwt_expiration_range() {
        for bad in ["0", "-5", "525601", "9223372036854775807"] {
            let err = load(&[("JWT_EXPIRATION_MINUTES", bad)]).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid { .. }), "value: {bad}");
        }

        let config = load(&[("JWT_EXPIRATION_MINUTES", "525600")]).unwrap();
        assert_eq!(config.jwt.expiration_minutes, 525_600);
        let jwt = crate::auth::JwtService::new(config.jwt);
        assert!(jwt.generate_token("u1", "Ann", Role::Manager).is_ok());
    }

    #[test]
    fn test_access_code_ttl_range() {
        for bad in ["-1", "525601", "18446744073709551615"] {
            let err = load(&[("ACCESS_CODE_TTL_MINUTES", bad)]).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid { .. }), "value: {bad}");
        }

        let config = load(&[("ACCESS_CODE_TTL_MINUTES", "525600")]).unwrap();
        assert_eq!(config.access_code_ttl(), Some(Duration::from_secs(525_600 * 60)));
    }

    #[test]
    fn test_bad_number() {
        let err = load(&[("HTTP_PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }
}
