//! Error types for the API client.

use crate::decode::DecodeFailure;

/// Errors that can occur when making API requests.
///
/// Exactly one variant is produced per failed call. `Display` gives the
/// user-facing description; [`failure_reason`](Self::failure_reason) and
/// [`recovery_suggestion`](Self::recovery_suggestion) carry the developer
/// diagnostics that end up in the logs.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The URL could not be parsed. Raised before any transport call.
    #[error("The URL provided is invalid: {0}")]
    InvalidUrl(String),
    /// The transport returned something that is not an HTTP response.
    #[error("The server response was not a valid HTTP URL response.")]
    InvalidResponseShape,
    /// The server answered with a status outside 200-299. The body is kept
    /// verbatim for diagnosis.
    #[error("The status code returned by the server indicates an error.")]
    InvalidStatusCode { code: u16, body: Vec<u8> },
    /// The body did not match the requested shape.
    #[error("JSON decoding error")]
    DecodingFailure { reason: String, path: String },
    /// The transport itself failed; surfaced unchanged.
    #[error("{0}")]
    Transport(#[from] TransportError),
}

impl Error {
    pub fn failure_reason(&self) -> Option<String> {
        match self {
            Self::InvalidUrl(_) => {
                Some("The URL format was incorrect or could not be processed.".to_string())
            }
            Self::InvalidResponseShape => {
                Some("The response from the server did not meet HTTP standards.".to_string())
            }
            Self::InvalidStatusCode { code, body } => {
                let body = std::str::from_utf8(body).unwrap_or("No response body");
                Some(format!(
                    "The server returned an invalid status code: {}. Response data: {}",
                    code, body
                ))
            }
            Self::DecodingFailure { reason, .. } => Some(format!(
                "There was an issue decoding the data: {}",
                reason
            )),
            Self::Transport(e) => e.failure_reason(),
        }
    }

    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            Self::InvalidUrl(_) => Some("Please check the URL and try again."),
            Self::InvalidResponseShape => {
                Some("Try reloading the request or check your network connection.")
            }
            Self::InvalidStatusCode { .. } => {
                Some("Review the server response for further details or contact support.")
            }
            Self::DecodingFailure { .. } => Some("Review JSON structure & data model"),
            Self::Transport(_) => None,
        }
    }

    /// The status code, if the server answered with one we rejected.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::InvalidStatusCode { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl From<DecodeFailure> for Error {
    fn from(failure: DecodeFailure) -> Self {
        Error::DecodingFailure {
            reason: failure.reason(),
            path: failure.field_path(),
        }
    }
}

/// Failures raised by a [`Transport`](crate::Transport) before any response
/// was produced.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("An unknown error occurred")]
    Unknown,
    #[error("The request was cancelled.")]
    Cancelled,
    #[error("Could not connect to the server.")]
    Connect(String),
    #[error("A secure connection to the server could not be made.")]
    Tls(String),
    #[error("A server with the specified hostname could not be found.")]
    Dns(String),
    #[error("The request timed out.")]
    Timeout,
    #[error("{0}")]
    Other(String),
}

impl TransportError {
    /// Secondary detail behind the description, when the transport has one.
    pub fn failure_reason(&self) -> Option<String> {
        match self {
            Self::Connect(detail) | Self::Tls(detail) | Self::Dns(detail) => {
                Some(detail.clone())
            }
            Self::Unknown | Self::Cancelled | Self::Timeout | Self::Other(_) => None,
        }
    }
}
