//! Transport seam between the editor view and the remote story service.

use thiserror::Error;

use crate::schema::wire::{StoryRequest, StoryResponse};

/// Address the original deployment serves from.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/generate-story";

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("story service returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed story response: {0}")]
    MalformedResponse(#[from] serde_json::Error),
    #[error("failed to encode request: {0}")]
    Encode(String),
}

#[cfg(feature = "native")]
impl From<ureq::Error> for ServiceError {
    fn from(err: ureq::Error) -> Self {
        ServiceError::Transport(err.to_string())
    }
}

/// Anything that can turn a `StoryRequest` into a story.
///
/// Implementations block until the request settles; callers that need the
/// UI to stay live run them off-thread (see `core::dispatch`).
pub trait StoryService: Send + Sync {
    fn generate(&self, request: &StoryRequest) -> Result<StoryResponse, ServiceError>;
}

/// Decode a raw HTTP status and body into a story.
///
/// Non-2xx statuses and bodies without a string `story` field are errors.
pub fn decode_response(status: u16, body: &str) -> Result<StoryResponse, ServiceError> {
    if !(200..300).contains(&status) {
        return Err(ServiceError::Status {
            status,
            body: body.to_string(),
        });
    }
    Ok(serde_json::from_str(body)?)
}

/// Blocking JSON-over-HTTP client for the story service.
#[cfg(feature = "native")]
pub struct HttpStoryService {
    agent: ureq::Agent,
    endpoint: String,
}

#[cfg(feature = "native")]
impl HttpStoryService {
    /// Build a client. `timeout` of `None` leaves the transport's own
    /// behaviour in charge.
    pub fn new(endpoint: impl Into<String>, timeout: Option<std::time::Duration>) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(timeout)
            .http_status_as_error(false)
            .build();
        Self {
            agent: config.into(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[cfg(feature = "native")]
impl StoryService for HttpStoryService {
    fn generate(&self, request: &StoryRequest) -> Result<StoryResponse, ServiceError> {
        tracing::debug!(
            endpoint = %self.endpoint,
            code_len = request.code.len(),
            style = %request.style,
            "Sending story request"
        );

        let mut response = self.agent.post(&self.endpoint).send_json(request)?;
        let status = response.status().as_u16();
        let body = response.body_mut().read_to_string()?;

        tracing::debug!(status, body_len = body.len(), "Received story response");

        decode_response(status, &body)
    }
}
