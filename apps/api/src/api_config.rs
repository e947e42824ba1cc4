use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use printquote_core::AppError;
use tracing_subscriber::EnvFilter;
use url::Url;

const DEFAULT_EASYQUOTE_TIMEOUT_SECONDS: u64 = 15;

#[derive(Debug, Clone)]
pub struct EasyQuoteRuntimeConfig {
    pub base_url: Url,
    pub api_token: Option<String>,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub enum PricingEngineConfig {
    Http(EasyQuoteRuntimeConfig),
    Memory { catalog_file: Option<PathBuf> },
}

impl PricingEngineConfig {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Http(_) => "http",
            Self::Memory { .. } => "memory",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub frontend_url: String,
    pub api_host: String,
    pub api_port: u16,
    pub pricing_engine: PricingEngineConfig,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());
        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3001);

        let pricing_engine = match env::var("PRICING_ENGINE")
            .unwrap_or_else(|_| "http".to_owned())
            .as_str()
        {
            "http" => PricingEngineConfig::Http(EasyQuoteRuntimeConfig {
                base_url: parse_base_url(required_non_empty_env("EASYQUOTE_BASE_URL")?.as_str())?,
                api_token: optional_non_empty_env("EASYQUOTE_API_TOKEN"),
                timeout: parse_timeout(env::var("EASYQUOTE_TIMEOUT_SECONDS").ok().as_deref())?,
            }),
            "memory" => PricingEngineConfig::Memory {
                catalog_file: optional_non_empty_env("PRICING_CATALOG_FILE").map(PathBuf::from),
            },
            other => {
                return Err(AppError::Validation(format!(
                    "PRICING_ENGINE must be either 'http' or 'memory', got '{other}'"
                )));
            }
        };

        Ok(Self {
            frontend_url,
            api_host,
            api_port,
            pricing_engine,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn parse_base_url(value: &str) -> Result<Url, AppError> {
    let url = Url::parse(value.trim())
        .map_err(|error| AppError::Validation(format!("invalid EASYQUOTE_BASE_URL: {error}")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(AppError::Validation(format!(
            "EASYQUOTE_BASE_URL must use http or https, got '{}'",
            url.scheme()
        )));
    }

    Ok(url)
}

fn parse_timeout(value: Option<&str>) -> Result<Duration, AppError> {
    let Some(value) = value.map(str::trim).filter(|value| !value.is_empty()) else {
        return Ok(Duration::from_secs(DEFAULT_EASYQUOTE_TIMEOUT_SECONDS));
    };

    let seconds = value.parse::<u64>().map_err(|error| {
        AppError::Validation(format!("invalid EASYQUOTE_TIMEOUT_SECONDS: {error}"))
    })?;
    if seconds == 0 {
        return Err(AppError::Validation(
            "EASYQUOTE_TIMEOUT_SECONDS must be greater than zero".to_owned(),
        ));
    }

    Ok(Duration::from_secs(seconds))
}

fn optional_non_empty_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn required_env(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}

fn required_non_empty_env(name: &str) -> Result<String, AppError> {
    let value = required_env(name)?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }

    Ok(value)
}
