use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FileDeckError {
    #[error("Invalid backend URL: {url}")]
    InvalidBackendUrl { url: String },

    #[error("Network error occurred: {message}")]
    Network { message: String },

    /// `after` is the limit that fired, when known.
    #[error("Request timed out{}", describe_limit(.after))]
    Timeout { after: Option<Duration> },

    #[error("Backend returned {status} for {endpoint}")]
    BackendStatus {
        endpoint: String,
        status: u16,
        detail: Option<String>,
    },

    #[error("Malformed response from {endpoint}: {message}")]
    MalformedResponse { endpoint: String, message: String },

    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Output file already exists: {path}")]
    OutputFileExists { path: String },

    #[error("Operation was cancelled by user")]
    Cancelled,
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for FileDeckError {
    fn user_message(&self) -> String {
        match self {
            FileDeckError::InvalidBackendUrl { url } => {
                format!("Invalid backend URL: {}", url)
            }
            FileDeckError::Network { message } => {
                format!("Could not reach the backend: {}", message)
            }
            FileDeckError::Timeout { after: Some(after) } => {
                format!("The backend did not answer within {}", format_limit(*after))
            }
            FileDeckError::Timeout { after: None } => {
                "The backend did not answer in time".to_string()
            }
            FileDeckError::BackendStatus {
                endpoint,
                status,
                detail,
            } => match detail {
                Some(detail) => format!("{} failed with status {}: {}", endpoint, status, detail),
                None => format!("{} failed with status {}", endpoint, status),
            },
            FileDeckError::MalformedResponse { endpoint, message } => {
                format!("Unexpected response from {}: {}", endpoint, message)
            }
            FileDeckError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            FileDeckError::OutputFileExists { path } => {
                format!("Output file already exists: {}", path)
            }
            FileDeckError::Cancelled => "Operation was cancelled by user".to_string(),
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            FileDeckError::InvalidBackendUrl { .. } => Some(
                "Use an http:// or https:// URL with a host, e.g. --backend-url http://127.0.0.1:8000".to_string()
            ),
            FileDeckError::Network { .. } => Some(
                "Check that the extraction backend is running and reachable at the configured URL.".to_string()
            ),
            FileDeckError::Timeout { .. } => Some(
                "The backend may be busy with an extraction. Try again or raise the limit with --timeout.".to_string()
            ),
            FileDeckError::BackendStatus { status, .. } if *status == 404 => Some(
                "The requested file does not exist on the backend. Run `filedeck list` to see available files.".to_string()
            ),
            FileDeckError::BackendStatus { .. } => Some(
                "The backend reported a failure. Check the backend logs for details.".to_string()
            ),
            FileDeckError::MalformedResponse { .. } => Some(
                "Make sure --backend-url points at the extraction service and not at another server.".to_string()
            ),
            FileDeckError::Config { .. } => Some(
                "Check your configuration file syntax and ensure all values are valid.".to_string()
            ),
            FileDeckError::OutputFileExists { .. } => Some(
                "Choose a different path with --output or use --force to overwrite.".to_string()
            ),
            _ => None,
        }
    }
}

impl From<url::ParseError> for FileDeckError {
    fn from(error: url::ParseError) -> Self {
        FileDeckError::InvalidBackendUrl {
            url: error.to_string(),
        }
    }
}

impl From<toml::de::Error> for FileDeckError {
    fn from(error: toml::de::Error) -> Self {
        FileDeckError::Config {
            message: error.to_string(),
        }
    }
}

/// Classify a transport error raised while talking to `endpoint`.
///
/// A timeout during connection setup is attributed to `connect_timeout`,
/// any other to the whole-request `timeout`.
pub fn classify_request_error(
    endpoint: &str,
    error: reqwest::Error,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
) -> FileDeckError {
    if error.is_timeout() {
        let after = if error.is_connect() {
            connect_timeout
        } else {
            timeout
        };
        FileDeckError::Timeout { after }
    } else if error.is_decode() {
        FileDeckError::MalformedResponse {
            endpoint: endpoint.to_string(),
            message: error.to_string(),
        }
    } else {
        FileDeckError::Network {
            message: error.to_string(),
        }
    }
}

fn describe_limit(after: &Option<Duration>) -> String {
    (*after)
        .map(|after| format!(" after {}", format_limit(after)))
        .unwrap_or_default()
}

fn format_limit(limit: Duration) -> String {
    if limit.subsec_millis() == 0 {
        format!("{}s", limit.as_secs())
    } else {
        format!("{}ms", limit.as_millis())
    }
}

pub type Result<T> = std::result::Result<T, FileDeckError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_friendly_messages() {
        let error = FileDeckError::InvalidBackendUrl {
            url: "ftp://nowhere".to_string(),
        };
        assert!(error.user_message().contains("Invalid backend URL"));
        assert!(error.suggestion().is_some());
    }

    #[test]
    fn test_backend_status_detail() {
        let error = FileDeckError::BackendStatus {
            endpoint: "POST /extract".to_string(),
            status: 500,
            detail: Some("credentials missing".to_string()),
        };
        assert_eq!(
            error.user_message(),
            "POST /extract failed with status 500: credentials missing"
        );

        let missing = FileDeckError::BackendStatus {
            endpoint: "GET /files/json/x.json".to_string(),
            status: 404,
            detail: None,
        };
        assert!(missing.suggestion().unwrap().contains("filedeck list"));
    }

    #[test]
    fn test_timeout_messages() {
        let known = FileDeckError::Timeout {
            after: Some(Duration::from_secs(30)),
        };
        assert_eq!(known.to_string(), "Request timed out after 30s");

        let sub_second = FileDeckError::Timeout {
            after: Some(Duration::from_millis(50)),
        };
        assert_eq!(sub_second.to_string(), "Request timed out after 50ms");
        assert_eq!(
            sub_second.user_message(),
            "The backend did not answer within 50ms"
        );

        let unknown = FileDeckError::Timeout { after: None };
        assert_eq!(unknown.to_string(), "Request timed out");
        assert!(!unknown.user_message().contains('0'));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_error = toml::from_str::<toml::Value>("= broken").unwrap_err();
        let error = FileDeckError::from(toml_error);
        assert!(matches!(error, FileDeckError::Config { .. }));
    }

    #[test]
    fn test_url_error_conversion() {
        let parse_error = url::Url::parse("not a url").unwrap_err();
        let error = FileDeckError::from(parse_error);
        assert!(matches!(error, FileDeckError::InvalidBackendUrl { .. }));
    }
}
