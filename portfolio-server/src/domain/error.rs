use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: String,
    },
    #[error("Blog post not found")]
    PostNotFound(String),
    #[error("Not authorized")]
    Unauthorized,
    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        DomainError::Validation {
            field,
            message: message.into(),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'a str>,
}

impl ResponseError for DomainError {
    fn status_code(&self) -> StatusCode {
        match self {
            DomainError::Validation { .. } => StatusCode::BAD_REQUEST,
            DomainError::PostNotFound(_) => StatusCode::NOT_FOUND,
            DomainError::Unauthorized => StatusCode::UNAUTHORIZED,
            DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = self.to_string();
        let body = match self {
            DomainError::Validation { field, message } => ErrorBody {
                message: message.as_str(),
                field: Some(field),
            },
            DomainError::Internal(detail) => {
                // operators get the detail, callers get a generic failure
                error!(detail = %detail, "request failed with internal error");
                ErrorBody {
                    message: "Server error",
                    field: None,
                }
            }
            _ => ErrorBody {
                message: message.as_str(),
                field: None,
            },
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_web::test]
    async fn internal_errors_hide_their_detail() {
        let err = DomainError::Internal("connection refused on 10.0.0.3:5432".into());
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "message": "Server error" }));
    }

    #[actix_web::test]
    async fn validation_errors_name_the_field() {
        let err = DomainError::validation("url", "Valid URL is required");
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "Valid URL is required");
        assert_eq!(json["field"], "url");
    }

    #[test]
    fn not_found_is_distinct_from_validation() {
        assert_eq!(
            DomainError::PostNotFound("nope".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(DomainError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
    }
}
