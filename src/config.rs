use std::env;

use crate::error::AppError;

const DEFAULT_HTTP_PORT: u16 = 3000;
const DEFAULT_LOG_LEVEL: &str = "info";

/// Startup settings, read from the environment or a `.env` file.
#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let _ = dotenvy::dotenv();

        Ok(Self {
            http_port: http_port(env::var("HTTP_PORT").ok())?,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string()),
        })
    }
}

fn http_port(raw: Option<String>) -> Result<u16, AppError> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_HTTP_PORT);
    };
    raw.trim()
        .parse()
        .map_err(|err| AppError::Internal(format!("HTTP_PORT {raw:?} is not a port: {err}")))
}

#[cfg(test)]
mod tests {
    use super::{http_port, DEFAULT_HTTP_PORT};
    use crate::error::AppError;

    #[test]
    fn unset_port_uses_default() {
        assert_eq!(http_port(None).unwrap(), DEFAULT_HTTP_PORT);
    }

    #[test]
    fn port_is_parsed_from_text() {
        assert_eq!(http_port(Some(" 8080 ".to_string())).unwrap(), 8080);
    }

    #[test]
    fn non_numeric_port_fails_startup() {
        let result = http_port(Some("not-a-port".to_string()));
        assert!(matches!(result, Err(AppError::Internal(msg)) if msg.contains("HTTP_PORT")));
    }
}
