use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use crate::render;

/// Errors surfaced to HTTP clients.
#[derive(Debug, Error)]
pub enum PortalError {
    #[error("Page not found")]
    NotFound,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Detail is logged, never sent to the client
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PortalError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            PortalError::NotFound => StatusCode::NOT_FOUND,
            PortalError::Unauthorized => StatusCode::UNAUTHORIZED,
            PortalError::BadRequest(_) => StatusCode::BAD_REQUEST,
            PortalError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message that is safe to show to anyone.
    fn public_message(&self) -> String {
        match self {
            PortalError::Internal(_) => "Something went wrong".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<anyhow::Error> for PortalError {
    fn from(err: anyhow::Error) -> Self {
        PortalError::Internal(format!("{:#}", err))
    }
}

impl IntoResponse for PortalError {
    fn into_response(self) -> Response {
        if let PortalError::Internal(detail) = &self {
            error!("Request failed: {}", detail);
        }

        let status = self.status_code();
        let body = Html(render::error_page(status.as_u16(), &self.public_message()));

        match self {
            PortalError::Unauthorized => {
                (status, [(header::WWW_AUTHENTICATE, "Bearer")], body).into_response()
            }
            _ => (status, body).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(PortalError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(PortalError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            PortalError::BadRequest("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            PortalError::Internal("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_detail_hidden() {
        let err = PortalError::from(anyhow::anyhow!("database password is hunter2"));
        assert_eq!(err.public_message(), "Something went wrong");
        assert!(err.to_string().contains("hunter2"));
    }

    #[test]
    fn test_unauthorized_has_challenge_header() {
        let response = PortalError::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }
}
