use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PortfolioClientError {
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },
    #[error("Token storage error: {0}")]
    TokenStorage(#[from] std::io::Error),
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
    field: Option<String>,
}

impl PortfolioClientError {
    /// Maps a non-2xx response onto the error taxonomy, keeping the server's
    /// `message` when the body carries one.
    pub async fn from_http_response(resp: reqwest::Response) -> Self {
        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        Self::from_status(status, &text)
    }

    fn from_status(status: StatusCode, body: &str) -> Self {
        let message = match serde_json::from_str::<ErrorBody>(body) {
            Ok(ErrorBody {
                message,
                field: Some(field),
            }) => format!("{field}: {message}"),
            Ok(ErrorBody { message, .. }) => message,
            Err(_) if body.is_empty() => status.to_string(),
            Err(_) => body.to_string(),
        };

        match status {
            StatusCode::BAD_REQUEST => Self::InvalidRequest(message),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::Unauthorized(message),
            StatusCode::NOT_FOUND => Self::NotFound(message),
            _ => Self::Server {
                status: status.as_u16(),
                message,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_body_keeps_field_name() {
        let err = PortfolioClientError::from_status(
            StatusCode::BAD_REQUEST,
            r#"{"message":"Valid URL is required","field":"url"}"#,
        );
        match err {
            PortfolioClientError::InvalidRequest(msg) => {
                assert_eq!(msg, "url: Valid URL is required")
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn status_decides_the_variant() {
        let not_found = PortfolioClientError::from_status(
            StatusCode::NOT_FOUND,
            r#"{"message":"Blog post not found"}"#,
        );
        assert!(matches!(not_found, PortfolioClientError::NotFound(m) if m == "Blog post not found"));

        let server = PortfolioClientError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "");
        assert!(matches!(server, PortfolioClientError::Server { status: 500, .. }));
    }
}
