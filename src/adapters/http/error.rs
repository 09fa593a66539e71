use crate::application::RunnerError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Reasons `/stream` refuses a request before any frame is sent.
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("Streaming unsupported!")]
    TransportUnsupported,

    #[error(transparent)]
    Runner(#[from] RunnerError),
}

impl StreamError {
    pub fn status(&self) -> StatusCode {
        match self {
            StreamError::TransportUnsupported => StatusCode::INTERNAL_SERVER_ERROR,
            StreamError::Runner(RunnerError::Saturated { .. }) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for StreamError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            StreamError::TransportUnsupported => {
                tracing::error!("Stream requested but the transport cannot flush per frame")
            }
            StreamError::Runner(e) => tracing::warn!(error = %e, "Stream refused"),
        }
        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_transport_unsupported_is_plain_500() {
        let response = StreamError::TransportUnsupported.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let content_type = response.headers()["content-type"].to_str().unwrap().to_owned();
        assert!(content_type.starts_with("text/plain"));

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"Streaming unsupported!");
    }

    #[test]
    fn test_saturated_is_503() {
        let error = StreamError::from(RunnerError::Saturated { limit: 2 });
        assert_eq!(error.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(error.to_string().contains("limit 2"));
    }
}
