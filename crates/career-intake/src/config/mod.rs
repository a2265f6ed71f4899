use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

const DEFAULT_OUTBOUND_TIMEOUT_SECS: u64 = 5;
const DEFAULT_SMTP_PORT: u16 = 587;
const DEFAULT_CONTENT_URL: &str = "http://localhost:1337";
const DEFAULT_SENDER: &str = "Career Applications <onboarding@resend.dev>";
const DEFAULT_RECIPIENT: &str = "careers@example.com";

/// Top-level configuration for the application.
///
/// Loaded once at startup; components receive the slice they need at
/// construction time rather than reading process state themselves.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub outbound: OutboundConfig,
    pub verification: VerificationConfig,
    pub notifications: NotificationConfig,
    pub content: ContentConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let timeout_secs = match optional_env("APP_OUTBOUND_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidOutboundTimeout)?,
            None => DEFAULT_OUTBOUND_TIMEOUT_SECS,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            outbound: OutboundConfig {
                timeout: Duration::from_secs(timeout_secs),
            },
            verification: VerificationConfig {
                secret: optional_env("RECAPTCHA_SECRET_KEY"),
            },
            notifications: NotificationConfig::load()?,
            content: ContentConfig {
                base_url: optional_env("CONTENT_API_URL")
                    .unwrap_or_else(|| DEFAULT_CONTENT_URL.to_string())
                    .trim_end_matches('/')
                    .to_string(),
                token: optional_env("CONTENT_API_TOKEN"),
            },
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Bound on every outbound call so a slow third party cannot hang a request.
#[derive(Debug, Clone, Copy)]
pub struct OutboundConfig {
    pub timeout: Duration,
}

/// Bot-verification settings. An absent secret means every check fails closed.
#[derive(Debug, Clone)]
pub struct VerificationConfig {
    pub secret: Option<String>,
}

/// Notification credentials; presence/absence selects the dispatch tier.
#[derive(Debug, Clone)]
pub struct NotificationConfig {
    pub resend_api_key: Option<String>,
    pub sender: String,
    pub recipient: String,
    pub smtp: Option<SmtpConfig>,
}

impl NotificationConfig {
    fn load() -> Result<Self, ConfigError> {
        Ok(Self {
            resend_api_key: optional_env("RESEND_API_KEY"),
            sender: optional_env("RESEND_FROM").unwrap_or_else(|| DEFAULT_SENDER.to_string()),
            recipient: optional_env("CAREERS_RECIPIENT")
                .unwrap_or_else(|| DEFAULT_RECIPIENT.to_string()),
            smtp: SmtpConfig::load()?,
        })
    }
}

/// Legacy mail-transport settings; only complete host/user/pass triples count
/// as configured.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
}

impl SmtpConfig {
    fn load() -> Result<Option<Self>, ConfigError> {
        let (Some(host), Some(user), Some(pass)) = (
            optional_env("SMTP_HOST"),
            optional_env("SMTP_USER"),
            optional_env("SMTP_PASS"),
        ) else {
            return Ok(None);
        };

        let port = match optional_env("SMTP_PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidSmtpPort)?,
            None => DEFAULT_SMTP_PORT,
        };

        Ok(Some(Self {
            host,
            port,
            user,
            pass,
        }))
    }
}

/// Content-store (headless CMS) connection settings.
#[derive(Debug, Clone)]
pub struct ContentConfig {
    pub base_url: String,
    pub token: Option<String>,
}

fn optional_env(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidOutboundTimeout,
    InvalidSmtpPort,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidOutboundTimeout => {
                write!(f, "APP_OUTBOUND_TIMEOUT_SECS must be a positive integer")
            }
            ConfigError::InvalidSmtpPort => write!(f, "SMTP_PORT must be a valid u16"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for name in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "APP_OUTBOUND_TIMEOUT_SECS",
            "RECAPTCHA_SECRET_KEY",
            "RESEND_API_KEY",
            "RESEND_FROM",
            "CAREERS_RECIPIENT",
            "SMTP_HOST",
            "SMTP_PORT",
            "SMTP_USER",
            "SMTP_PASS",
            "CONTENT_API_URL",
            "CONTENT_API_TOKEN",
        ] {
            env::remove_var(name);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.outbound.timeout, Duration::from_secs(5));
        assert!(config.verification.secret.is_none());
        assert!(config.notifications.resend_api_key.is_none());
        assert!(config.notifications.smtp.is_none());
        assert_eq!(config.notifications.recipient, DEFAULT_RECIPIENT);
        assert_eq!(config.content.base_url, DEFAULT_CONTENT_URL);
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
    }

    #[test]
    fn blank_verification_secret_counts_as_absent() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("RECAPTCHA_SECRET_KEY", "   ");
        let config = AppConfig::load().expect("config loads");
        assert!(config.verification.secret.is_none());
    }

    #[test]
    fn smtp_requires_complete_triple() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("SMTP_HOST", "mail.internal");
        env::set_var("SMTP_USER", "relay");
        let config = AppConfig::load().expect("config loads");
        assert!(config.notifications.smtp.is_none());

        env::set_var("SMTP_PASS", "hunter2");
        let config = AppConfig::load().expect("config loads");
        let smtp = config.notifications.smtp.expect("triple present");
        assert_eq!(smtp.host, "mail.internal");
        assert_eq!(smtp.port, DEFAULT_SMTP_PORT);
    }

    #[test]
    fn rejects_zero_outbound_timeout() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_OUTBOUND_TIMEOUT_SECS", "0");
        match AppConfig::load() {
            Err(ConfigError::InvalidOutboundTimeout) => {}
            other => panic!("expected timeout error, got {other:?}"),
        }
    }

    #[test]
    fn trims_trailing_slash_from_content_url() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("CONTENT_API_URL", "https://cms.internal/");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.content.base_url, "https://cms.internal");
    }
}
